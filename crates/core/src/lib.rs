//! `album-core` — sticker collection model.
//!
//! Pure data crate: owned counts, add-request validation, completion
//! stats. No CLI or IO dependencies.

pub mod add;
pub mod collection;

pub use add::{AddOutcome, AddRequest, ValidationError};
pub use collection::{Collection, CollectionStats};

/// Sticker identifier. Valid ids lie in `1..=domain`.
pub type StickerId = u32;

/// Number of distinct stickers in the album.
pub const TOTAL_STICKERS: u32 = 720;
