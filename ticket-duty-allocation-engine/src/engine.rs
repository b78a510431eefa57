//! The iterative assignment loop: spread purchase duty for a tier's events
//! across the roster until either everyone is at the duty cap or every
//! capacity-holding attendee already carries every event in the tier.

use std::collections::HashSet;

use tracing::debug;

use crate::tier::PriorityTier;
use crate::types::{AttendeeRef, PurchaseDuty};

/// Working state carried across all tiers, indexed by roster position so
/// that every decision depends only on the caller-supplied roster order.
#[derive(Debug)]
pub struct DutyLedger {
    pub(crate) duty_counts: Vec<usize>,
    pub(crate) assigned_events: Vec<HashSet<i32>>,
    pub(crate) duties: Vec<Vec<PurchaseDuty>>,
}

impl DutyLedger {
    #[must_use]
    pub fn new(roster_size: usize) -> Self {
        Self {
            duty_counts: vec![0; roster_size],
            assigned_events: vec![HashSet::new(); roster_size],
            duties: vec![Vec::new(); roster_size],
        }
    }
}

/// Runs one tier to its stopping condition.
///
/// Any roster member with spare capacity can be recruited for any event in
/// the tier. Declared interest is deliberately not an eligibility filter:
/// uninvested members are extra purchase attempts for contested tickets.
pub fn assign_tier(
    ledger: &mut DutyLedger,
    roster: &[AttendeeRef],
    tier: &PriorityTier,
    cap: usize,
) {
    let mut buyer_counts = vec![0_usize; tier.events.len()];
    // Tier-scoped mirror of the global assigned set. Both are checked on
    // every pick so a bookkeeping slip in one cannot double-assign.
    let mut tier_assigned: Vec<HashSet<i32>> = vec![HashSet::new(); roster.len()];

    loop {
        let anyone_below_cap = ledger.duty_counts.iter().any(|&count| count < cap);
        if !anyone_below_cap {
            debug!(priority = ?tier.priority, "tier stopped: every attendee is at the duty cap");
            return;
        }

        let Some((event_index, buyer_position)) =
            pick_assignment(ledger, roster, tier, &buyer_counts, &tier_assigned, cap)
        else {
            debug!(priority = ?tier.priority, "tier stopped: maximum coverage reached");
            return;
        };

        let event = &tier.events[event_index];
        ledger.duty_counts[buyer_position] += 1;
        buyer_counts[event_index] += 1;
        ledger.assigned_events[buyer_position].insert(event.event_id);
        tier_assigned[buyer_position].insert(event.event_id);
        ledger.duties[buyer_position].push(PurchaseDuty {
            event_id: event.event_id,
            event_title: event.event_title.clone(),
            priority: event.priority,
            buying_for: event
                .interested
                .iter()
                .map(|attendee| attendee.display_name.clone())
                .collect(),
            cost: event.cost,
        });
    }
}

/// Picks the least-covered event that still has an eligible buyer, together
/// with that buyer. Event ties go to the bigger audience, then to tier
/// order; buyer ties go to the smaller duty count, then to roster order.
fn pick_assignment(
    ledger: &DutyLedger,
    roster: &[AttendeeRef],
    tier: &PriorityTier,
    buyer_counts: &[usize],
    tier_assigned: &[HashSet<i32>],
    cap: usize,
) -> Option<(usize, usize)> {
    let mut choice: Option<(usize, usize)> = None;

    for (event_index, event) in tier.events.iter().enumerate() {
        let Some(buyer_position) =
            pick_buyer(ledger, roster.len(), event.event_id, tier_assigned, cap)
        else {
            continue;
        };

        let better = match choice {
            None => true,
            Some((best_index, _)) => {
                buyer_counts[event_index] < buyer_counts[best_index]
                    || (buyer_counts[event_index] == buyer_counts[best_index]
                        && event.interested.len() > tier.events[best_index].interested.len())
            }
        };
        if better {
            choice = Some((event_index, buyer_position));
        }
    }

    choice
}

fn pick_buyer(
    ledger: &DutyLedger,
    roster_size: usize,
    event_id: i32,
    tier_assigned: &[HashSet<i32>],
    cap: usize,
) -> Option<usize> {
    let mut choice: Option<usize> = None;

    for position in 0..roster_size {
        if ledger.duty_counts[position] >= cap {
            continue;
        }
        if ledger.assigned_events[position].contains(&event_id)
            || tier_assigned[position].contains(&event_id)
        {
            continue;
        }

        let better = match choice {
            None => true,
            Some(best) => ledger.duty_counts[position] < ledger.duty_counts[best],
        };
        if better {
            choice = Some(position);
        }
    }

    choice
}
