//! Turns the engine's working state into per-attendee results.

use tracing::{debug, warn};

use crate::engine::DutyLedger;
use crate::types::{AllocationOutcome, AssignmentResult, AttendeeRef};

/// Builds one [`AssignmentResult`] per roster member, in roster order.
///
/// The duty cap is re-checked here even though the assignment loop already
/// enforces it; a violation is a defect, so it is reported as a soft error
/// naming the attendee instead of silently trusted or turned into a panic.
#[must_use]
pub fn assemble_results(
    roster: &[AttendeeRef],
    ledger: DutyLedger,
    cap: usize,
) -> AllocationOutcome {
    let mut soft_errors = Vec::new();
    let mut assigned_total = 0_usize;

    let assignments: Vec<AssignmentResult> = roster
        .iter()
        .zip(ledger.duties)
        .map(|(attendee, duties)| {
            let total_duties = duties.len();
            assigned_total += total_duties;
            if total_duties > cap {
                warn!(
                    attendee = %attendee.display_name,
                    total_duties,
                    cap,
                    "attendee ended up over the duty cap"
                );
                soft_errors.push(format!(
                    "{} holds {total_duties} duties, more than the cap of {cap}",
                    attendee.display_name
                ));
            }
            AssignmentResult {
                attendee_id: attendee.attendee_id,
                display_name: attendee.display_name.clone(),
                duties,
                total_duties,
            }
        })
        .collect();

    let theoretical_capacity = roster.len() * cap;
    debug!(
        assigned_total,
        unused_capacity = theoretical_capacity - assigned_total.min(theoretical_capacity),
        "allocation finished"
    );

    AllocationOutcome {
        assignments,
        soft_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::assemble_results;
    use crate::engine::DutyLedger;
    use crate::types::{AttendeeRef, Priority, PurchaseDuty};

    fn roster() -> Vec<AttendeeRef> {
        vec![
            AttendeeRef {
                attendee_id: 1,
                display_name: "Alice".to_owned(),
            },
            AttendeeRef {
                attendee_id: 2,
                display_name: "Bob".to_owned(),
            },
        ]
    }

    fn duty(event_id: i32) -> PurchaseDuty {
        PurchaseDuty {
            event_id,
            event_title: format!("event-{event_id}"),
            priority: Priority::Normal,
            buying_for: vec!["Alice".to_owned()],
            cost: 5.0,
        }
    }

    #[test]
    fn results_follow_roster_order_even_when_empty() {
        let ledger = DutyLedger::new(2);
        let outcome = assemble_results(&roster(), ledger, 50);

        let ids: Vec<i32> = outcome
            .assignments
            .iter()
            .map(|assignment| assignment.attendee_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(outcome
            .assignments
            .iter()
            .all(|assignment| assignment.total_duties == 0));
        assert!(outcome.soft_errors.is_empty());
    }

    #[test]
    fn an_over_cap_attendee_becomes_a_soft_error_not_a_panic() {
        let mut ledger = DutyLedger::new(2);
        ledger.duties[1] = vec![duty(10), duty(11)];
        ledger.duty_counts[1] = 2;

        let outcome = assemble_results(&roster(), ledger, 1);

        assert_eq!(outcome.soft_errors.len(), 1);
        assert!(outcome.soft_errors[0].contains("Bob"));
        // the result itself is still complete
        assert_eq!(outcome.assignments[1].total_duties, 2);
    }
}
