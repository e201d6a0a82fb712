use std::fmt;

use crate::{Collection, StickerId};

/// One or more candidate ids fell outside `[1, domain]`. The whole
/// request is rejected; the message lists every offending id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub invalid: Vec<StickerId>,
    pub domain: u32,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.invalid.iter().map(|id| id.to_string()).collect();
        write!(
            f,
            "invalid sticker numbers: {} (valid range is 1-{})",
            ids.join(", "),
            self.domain
        )
    }
}

impl std::error::Error for ValidationError {}

/// A validated, ordered sequence of ids to add to a collection.
///
/// Construction rejects the entire sequence if any id is out of range,
/// so a request that exists can always be applied in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    ids: Vec<StickerId>,
}

impl AddRequest {
    pub fn new(ids: Vec<StickerId>, domain: u32) -> Result<Self, ValidationError> {
        let invalid: Vec<StickerId> = ids
            .iter()
            .copied()
            .filter(|id| !(1..=domain).contains(id))
            .collect();
        if invalid.is_empty() {
            Ok(Self { ids })
        } else {
            Err(ValidationError { invalid, domain })
        }
    }

    pub fn ids(&self) -> &[StickerId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Apply the request in order. Ids not yet owned are inserted with
    /// count 1. Ids already present are duplicate candidates: their
    /// count is incremented only when `confirm_duplicates` is set
    /// (declining is a no-op branch, not an error). A repeated id within
    /// the same request sees the collection as updated by its earlier
    /// occurrences, so the second occurrence is itself a duplicate
    /// candidate.
    pub fn apply(&self, collection: &mut Collection, confirm_duplicates: bool) -> AddOutcome {
        let mut added = Vec::new();
        let mut duplicates = Vec::new();
        for &id in &self.ids {
            if collection.add_one(id) {
                added.push(id);
            } else {
                duplicates.push(id);
                if confirm_duplicates {
                    collection.increment(id);
                }
            }
        }
        AddOutcome { added, duplicates }
    }
}

/// What an applied add request did, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Ids newly inserted with count 1.
    pub added: Vec<StickerId>,
    /// Ids that were already present when their turn came.
    pub duplicates: Vec<StickerId>,
}
