use serde::Serialize;

use album_core::StickerId;

/// An exchangeable excess: `extra` = owned count minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurplusEntry {
    pub id: StickerId,
    pub extra: u32,
}

/// Missing/surplus view of a single collection over the domain.
#[derive(Debug, Clone, Serialize)]
pub struct SideReport {
    /// Distinct ids owned.
    pub owned: usize,
    /// Ids in `[1, domain]` not owned, ascending.
    pub missing: Vec<StickerId>,
    /// Ids owned more than once with their excess, ascending.
    pub surplus: Vec<SurplusEntry>,
    /// Sum of all `extra` values.
    pub duplicate_total: u32,
}

/// Result of reconciling two collections. Derived, read-only, never
/// persisted. All sets enumerate ascending by id.
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeReport {
    pub domain_size: u32,
    pub mine: SideReport,
    pub theirs: SideReport,
    /// Ids I lack that they hold as surplus, with their excess counts.
    pub they_can_give: Vec<SurplusEntry>,
    /// Ids they lack that I hold as surplus, with my excess counts.
    pub i_can_give: Vec<SurplusEntry>,
}
