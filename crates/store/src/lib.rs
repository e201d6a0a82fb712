//! `album-store` — flat CSV record store for sticker collections.
//!
//! The on-disk format is a compatibility surface: header row
//! `sticker_number,amount`, then one `<id>,<count>` row per owned id,
//! ascending by id. Peer collections exchanged for comparison use the
//! same shape.

mod csv_store;
mod error;

pub use csv_store::{load, parse_peer, save, LoadReport, STORE_HEADER};
pub use error::StoreError;
