pub mod block;
pub mod campaign;
pub mod id_generator;
pub mod ranges;
pub mod settings;

pub use block::{block_count, find_block, find_block_mut, find_column_mut, Block, BlockKind, Column};
pub use campaign::{AutoSavePayload, AutoSaveResponse, Campaign, CampaignContent, CampaignStatus, Design};
pub use id_generator::{get_document_seed, IdGenerator};
pub use ranges::{EmphasisRange, EmphasisStyle, LinkRange};
pub use settings::*;
