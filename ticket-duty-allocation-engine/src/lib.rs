//! Decides who in the community should attempt the ticket purchase for each
//! wished-for convention event.
//!
//! The computation is a single synchronous pass with no I/O: declarations
//! are collapsed into per-event demand, demand is split into priority tiers,
//! and each tier is spread across the roster until everyone is at the duty
//! cap or already carries every event in the tier. Given the same ordered
//! roster and declarations the output is identical, so callers own the
//! ordering (and with it, reproducibility).

pub mod demand;
pub mod engine;
pub mod output;
pub mod tier;
pub mod types;

pub use types::{
    AllocationOutcome, AssignmentResult, AttendeeRef, EventDemand, InterestDeclaration, Priority,
    PurchaseDuty,
};

/// How many events one person may be asked to buy, unless configured
/// otherwise.
pub const DEFAULT_DUTY_CAP: usize = 50;

/// Computes the purchase duties for a whole community in one pass.
///
/// Every roster member gets an [`AssignmentResult`], including members with
/// an empty wishlist; they are recruited as redundant purchasers like
/// everyone else. An empty roster is the one fatal precondition and is
/// reported as a soft error with an empty assignment list, never as a
/// failure the caller has to unwrap.
#[must_use]
pub fn compute_assignments(
    roster: &[AttendeeRef],
    declarations: &[InterestDeclaration],
    cap: usize,
) -> AllocationOutcome {
    if roster.is_empty() {
        return AllocationOutcome {
            assignments: Vec::new(),
            soft_errors: vec!["No attendees found".to_owned()],
        };
    }

    let demands = demand::aggregate_demand(declarations);
    let tiers = tier::partition_tiers(demands);

    let mut ledger = engine::DutyLedger::new(roster.len());
    for tier in &tiers {
        engine::assign_tier(&mut ledger, roster, tier, cap);
    }

    output::assemble_results(roster, ledger, cap)
}
