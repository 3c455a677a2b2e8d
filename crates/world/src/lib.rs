//! Block world, farming registry and the replanter enchantment.

mod agent;
mod chunk;
mod dispatch;
mod events;
mod farming;
mod feedback;
mod inventory;
mod replant;
mod scheduler;
mod seeds;
mod session;
mod world;

pub use agent::*;
pub use chunk::*;
pub use dispatch::*;
pub use events::*;
pub use farming::*;
pub use feedback::*;
pub use inventory::*;
pub use replant::*;
pub use scheduler::*;
pub use seeds::*;
pub use session::*;
pub use world::*;
