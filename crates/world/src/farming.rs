//! Farming blocks and the seed/plant registry.
//!
//! Crop blocks encode their growth stage in the block id: each crop owns a
//! contiguous id range starting at its stage-0 block.

use replanter_core::{ItemType, SeedKind};

use crate::chunk::{BlockId, Voxel, BLOCK_SOUL_SAND};

/// Block IDs for farming system
pub mod farming_blocks {
    use crate::chunk::BlockId;

    pub const FARMLAND: BlockId = 47;
    pub const FARMLAND_WET: BlockId = 48;
    pub const WHEAT_0: BlockId = 49;
    pub const WHEAT_7: BlockId = 56;
    pub const CARROTS_0: BlockId = 57;
    pub const CARROTS_7: BlockId = 64;
    pub const POTATOES_0: BlockId = 65;
    pub const POTATOES_7: BlockId = 72;
    pub const BEETROOTS_0: BlockId = 73;
    pub const BEETROOTS_3: BlockId = 76;
    pub const MELON_STEM_0: BlockId = 77;
    pub const MELON_STEM_7: BlockId = 84;
    pub const PUMPKIN_STEM_0: BlockId = 85;
    pub const PUMPKIN_STEM_7: BlockId = 92;
    pub const NETHER_WART_0: BlockId = 93;
    pub const NETHER_WART_3: BlockId = 96;
    /// Stem bent towards a grown melon. Has no growth stage.
    pub const ATTACHED_MELON_STEM: BlockId = 97;
    /// Stem bent towards a grown pumpkin. Has no growth stage.
    pub const ATTACHED_PUMPKIN_STEM: BlockId = 98;
}

/// Type of crop (the placed plant block family)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CropType {
    Wheat,
    Beetroots,
    MelonStem,
    PumpkinStem,
    Potatoes,
    Carrots,
    NetherWart,
}

impl CropType {
    pub const ALL: [CropType; 7] = [
        CropType::Wheat,
        CropType::Beetroots,
        CropType::MelonStem,
        CropType::PumpkinStem,
        CropType::Potatoes,
        CropType::Carrots,
        CropType::NetherWart,
    ];

    /// Get the base block ID for this crop at stage 0
    pub fn base_block_id(self) -> BlockId {
        match self {
            CropType::Wheat => farming_blocks::WHEAT_0,
            CropType::Beetroots => farming_blocks::BEETROOTS_0,
            CropType::MelonStem => farming_blocks::MELON_STEM_0,
            CropType::PumpkinStem => farming_blocks::PUMPKIN_STEM_0,
            CropType::Potatoes => farming_blocks::POTATOES_0,
            CropType::Carrots => farming_blocks::CARROTS_0,
            CropType::NetherWart => farming_blocks::NETHER_WART_0,
        }
    }

    /// Highest growth stage (fully grown)
    pub fn max_stage(self) -> u8 {
        match self {
            CropType::Beetroots | CropType::NetherWart => 3,
            _ => 7,
        }
    }

    /// Get the block ID for a specific growth stage
    pub fn block_id_at_stage(self, stage: u8) -> BlockId {
        let stage = stage.min(self.max_stage());
        self.base_block_id() + stage as BlockId
    }

    /// Get crop type and stage from block ID
    pub fn from_block_id(block_id: BlockId) -> Option<(CropType, u8)> {
        Self::ALL.into_iter().find_map(|crop| {
            let base = crop.base_block_id();
            (base..=crop.block_id_at_stage(u8::MAX))
                .contains(&block_id)
                .then(|| (crop, (block_id - base) as u8))
        })
    }
}

/// Item a block would be placed from (and drops as its seed).
pub fn placement_seed(block_id: BlockId) -> Option<SeedKind> {
    match block_id {
        farming_blocks::ATTACHED_MELON_STEM => Some(SeedKind::MelonSeeds),
        farming_blocks::ATTACHED_PUMPKIN_STEM => Some(SeedKind::PumpkinSeeds),
        _ => {
            let (crop, _) = CropType::from_block_id(block_id)?;
            Some(match crop {
                CropType::Wheat => SeedKind::WheatSeeds,
                CropType::Beetroots => SeedKind::BeetrootSeeds,
                CropType::MelonStem => SeedKind::MelonSeeds,
                CropType::PumpkinStem => SeedKind::PumpkinSeeds,
                CropType::Potatoes => SeedKind::Potato,
                CropType::Carrots => SeedKind::Carrot,
                CropType::NetherWart => SeedKind::NetherWart,
            })
        }
    }
}

/// Growth capability of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantState {
    /// No growth stage (attached stems, or not a plant at all).
    NonAgeable,
    /// Crop with a growth stage; `crop` is its base form.
    Ageable { crop: CropType, stage: u8 },
}

impl PlantState {
    pub fn of(voxel: Voxel) -> Self {
        match CropType::from_block_id(voxel.id) {
            Some((crop, stage)) => PlantState::Ageable { crop, stage },
            None => PlantState::NonAgeable,
        }
    }
}

/// Ground a seed can be planted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroundSurface {
    /// Dry or hydrated farmland
    Farmland,
    SoulSand,
}

impl GroundSurface {
    pub fn from_block_id(block_id: BlockId) -> Option<Self> {
        match block_id {
            farming_blocks::FARMLAND | farming_blocks::FARMLAND_WET => {
                Some(GroundSurface::Farmland)
            }
            BLOCK_SOUL_SAND => Some(GroundSurface::SoulSand),
            _ => None,
        }
    }
}

/// One seed and the plant it grows into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlantPair {
    pub seed: SeedKind,
    pub plant: CropType,
}

/// Seed of the only family planted on soul sand.
pub const WART_SEED: SeedKind = SeedKind::NetherWart;

const STANDARD_PAIRS: [SeedPlantPair; 7] = [
    SeedPlantPair {
        seed: SeedKind::WheatSeeds,
        plant: CropType::Wheat,
    },
    SeedPlantPair {
        seed: SeedKind::BeetrootSeeds,
        plant: CropType::Beetroots,
    },
    SeedPlantPair {
        seed: SeedKind::MelonSeeds,
        plant: CropType::MelonStem,
    },
    SeedPlantPair {
        seed: SeedKind::PumpkinSeeds,
        plant: CropType::PumpkinStem,
    },
    SeedPlantPair {
        seed: SeedKind::Potato,
        plant: CropType::Potatoes,
    },
    SeedPlantPair {
        seed: SeedKind::Carrot,
        plant: CropType::Carrots,
    },
    SeedPlantPair {
        seed: SeedKind::NetherWart,
        plant: CropType::NetherWart,
    },
];

/// Fixed seed-to-plant table.
///
/// Built once and shared read-only. `pairs()` is the tie-break order used when
/// several carried seeds could be planted: earlier entries win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropRegistry {
    pairs: [SeedPlantPair; 7],
}

impl CropRegistry {
    pub fn standard() -> Self {
        Self {
            pairs: STANDARD_PAIRS,
        }
    }

    /// Pairs in registry order: wheat, beetroot, melon, pumpkin, potato, carrot, nether wart.
    pub fn pairs(&self) -> &[SeedPlantPair] {
        &self.pairs
    }

    /// Plant grown from `item`, if it is a registered seed.
    pub fn lookup_plant_for(&self, item: ItemType) -> Option<CropType> {
        let seed = item.seed()?;
        self.pairs
            .iter()
            .find(|pair| pair.seed == seed)
            .map(|pair| pair.plant)
    }

    /// Seed that produced the plant block `block_id`, resolved through its placement material.
    pub fn seed_of(&self, block_id: BlockId) -> Option<SeedKind> {
        let seed = placement_seed(block_id)?;
        self.pairs
            .iter()
            .any(|pair| pair.seed == seed)
            .then_some(seed)
    }

    pub fn is_plantable(&self, item: ItemType) -> bool {
        self.lookup_plant_for(item).is_some()
    }

    pub fn is_wart_family(&self, seed: SeedKind) -> bool {
        seed == WART_SEED
    }

    /// The only surface `seed` can be planted on.
    pub fn ground_for(&self, seed: SeedKind) -> GroundSurface {
        if self.is_wart_family(seed) {
            GroundSurface::SoulSand
        } else {
            GroundSurface::Farmland
        }
    }
}

impl Default for CropRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
