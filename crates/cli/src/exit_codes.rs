//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Scripts rely on
//! these, so add new codes here and document what triggers them.
//!
//! | Code | Description                                    |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | CLI usage error (bad args, unparsable input)   |
//! | 3    | Validation error (sticker id outside 1..=720)  |
//! | 4    | Store I/O error (read/write of the record store)|
//! | 5    | Peer fetch error (network or unreadable peer)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unparsable id list.
pub const EXIT_USAGE: u8 = 2;

/// Add-request validation failed: at least one id out of range. The
/// store is untouched.
pub const EXIT_VALIDATION: u8 = 3;

/// Record store read/write failure.
pub const EXIT_STORE: u8 = 4;

/// Peer collection fetch failed (network error, HTTP status, or an
/// unreadable local path). The comparison is aborted.
pub const EXIT_FETCH: u8 = 5;
