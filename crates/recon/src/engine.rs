use std::collections::BTreeSet;

use album_core::{Collection, StickerId};

use crate::model::{ExchangeReport, SideReport, SurplusEntry};

/// Reconcile two collections over `[1, domain]`.
///
/// Ids outside the domain are ignored on both sides: they count toward
/// neither missing nor surplus. An empty collection has the full domain
/// missing and empty surplus/exchange sets.
pub fn compare(mine: &Collection, theirs: &Collection, domain: u32) -> ExchangeReport {
    let my_side = side_report(mine, domain);
    let their_side = side_report(theirs, domain);

    let they_can_give = exchange_set(&my_side.missing, &their_side.surplus);
    let i_can_give = exchange_set(&their_side.missing, &my_side.surplus);

    ExchangeReport {
        domain_size: domain,
        mine: my_side,
        theirs: their_side,
        they_can_give,
        i_can_give,
    }
}

fn side_report(collection: &Collection, domain: u32) -> SideReport {
    let in_domain = |id: &StickerId| (1..=domain).contains(id);

    let owned: BTreeSet<StickerId> = collection.owned_ids().filter(in_domain).collect();
    let missing: Vec<StickerId> = (1..=domain).filter(|id| !owned.contains(id)).collect();
    let surplus: Vec<SurplusEntry> = collection
        .duplicate_surplus()
        .into_iter()
        .filter(|(id, _)| in_domain(&id))
        .map(|(id, extra)| SurplusEntry { id, extra })
        .collect();
    let duplicate_total = surplus.iter().map(|s| s.extra).sum();

    SideReport {
        owned: owned.len(),
        missing,
        surplus,
        duplicate_total,
    }
}

/// Surplus entries whose id the receiver is missing. Both inputs are
/// ascending, so the result is too.
fn exchange_set(receiver_missing: &[StickerId], giver_surplus: &[SurplusEntry]) -> Vec<SurplusEntry> {
    let missing: BTreeSet<StickerId> = receiver_missing.iter().copied().collect();
    giver_surplus
        .iter()
        .filter(|s| missing.contains(&s.id))
        .copied()
        .collect()
}
