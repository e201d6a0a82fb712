//! `album-capture` — manual-trigger capture session.
//!
//! A small synchronous state machine turns recognized sticker numbers
//! into a vetted pending list, then hands that list to the collection
//! store boundary as a single add request. All OCR and device access
//! sits behind the [`Recognizer`] trait so tests can use a scripted
//! double.

pub mod enhance;
pub mod recognize;
pub mod session;

pub use recognize::{Recognizer, TesseractRecognizer};
pub use session::{AcceptRejection, CommitOutcome, DetectionState, PENDING_CAPACITY};
