//! Collapses raw interest declarations into one demand record per event.

use std::collections::HashMap;

use crate::types::{AttendeeRef, EventDemand, InterestDeclaration, Priority};

/// Builds one [`EventDemand`] per distinct event, in the order the events
/// were first mentioned. A repeated `(attendee, event)` declaration collapses
/// into the first one; an event's priority is the highest ever requested for
/// it, `Normal` when nobody requested one.
#[must_use]
pub fn aggregate_demand(declarations: &[InterestDeclaration]) -> Vec<EventDemand> {
    let mut demands: Vec<EventDemand> = Vec::new();
    let mut index_of_event: HashMap<i32, usize> = HashMap::new();

    for declaration in declarations {
        let index = *index_of_event
            .entry(declaration.event_id)
            .or_insert_with(|| {
                demands.push(EventDemand {
                    event_id: declaration.event_id,
                    event_title: declaration.event_title.clone(),
                    cost: declaration.cost,
                    priority: Priority::Normal,
                    interested: Vec::new(),
                });
                demands.len() - 1
            });
        let demand = &mut demands[index];

        if let Some(requested) = declaration.requested_priority {
            if requested > demand.priority {
                demand.priority = requested;
            }
        }

        let already_interested = demand
            .interested
            .iter()
            .any(|attendee| attendee.attendee_id == declaration.attendee_id);
        if !already_interested {
            demand.interested.push(AttendeeRef {
                attendee_id: declaration.attendee_id,
                display_name: declaration.display_name.clone(),
            });
        }
    }

    demands
}

#[cfg(test)]
mod tests {
    use super::aggregate_demand;
    use crate::types::{InterestDeclaration, Priority};

    fn declaration(
        attendee_id: i32,
        event_id: i32,
        requested_priority: Option<Priority>,
    ) -> InterestDeclaration {
        InterestDeclaration {
            attendee_id,
            display_name: format!("attendee-{attendee_id}"),
            event_id,
            event_title: format!("event-{event_id}"),
            cost: 25.0,
            requested_priority,
        }
    }

    #[test]
    fn events_keep_first_seen_order() {
        let demands = aggregate_demand(&[
            declaration(1, 20, None),
            declaration(1, 10, None),
            declaration(2, 20, None),
        ]);
        let ids: Vec<i32> = demands.iter().map(|demand| demand.event_id).collect();
        assert_eq!(ids, vec![20, 10]);
    }

    #[test]
    fn duplicate_declarations_collapse() {
        let demands = aggregate_demand(&[
            declaration(1, 10, None),
            declaration(1, 10, None),
            declaration(2, 10, None),
        ]);
        assert_eq!(demands.len(), 1);
        let interested: Vec<i32> = demands[0]
            .interested
            .iter()
            .map(|attendee| attendee.attendee_id)
            .collect();
        assert_eq!(interested, vec![1, 2]);
    }

    #[test]
    fn priority_is_the_highest_requested() {
        let demands = aggregate_demand(&[
            declaration(1, 10, Some(Priority::Important)),
            declaration(2, 10, Some(Priority::Critical)),
            declaration(3, 10, Some(Priority::Normal)),
        ]);
        assert_eq!(demands[0].priority, Priority::Critical);
    }

    #[test]
    fn priority_defaults_to_normal() {
        let demands = aggregate_demand(&[declaration(1, 10, None)]);
        assert_eq!(demands[0].priority, Priority::Normal);
    }

    #[test]
    fn no_declarations_yield_no_demand() {
        assert!(aggregate_demand(&[]).is_empty());
    }
}
