use chrono::{DateTime, Utc};
use diesel::prelude::*;
use ticket_duty_allocation_engine::{
    AssignmentResult, AttendeeRef, InterestDeclaration, Priority, PurchaseDuty,
};

use crate::schema::{assignments, attendees, calculation_runs};

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = attendees)]
pub struct AttendeeRow {
    pub id: i32,
    pub display_name: String,
}

impl AttendeeRow {
    #[must_use]
    pub fn into_attendee_ref(self) -> AttendeeRef {
        AttendeeRef {
            attendee_id: self.id,
            display_name: self.display_name,
        }
    }
}

/// One wishlist entry joined with its attendee and (non-canceled) event.
pub type InterestParts = (i32, String, i32, String, f64, Option<i32>);

#[must_use]
pub fn declaration_from_parts(parts: InterestParts) -> InterestDeclaration {
    let (attendee_id, display_name, event_id, event_title, cost, priority) = parts;
    InterestDeclaration {
        attendee_id,
        display_name,
        event_id,
        event_title,
        cost,
        // the admin-set priority on the event catalog entry, when there is one
        requested_priority: priority.map(Priority::from_level),
    }
}

/// The envelope one allocation pass is stored under.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = calculation_runs)]
pub struct CalculationRun {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub total_attendees: i32,
    pub total_events: i32,
    pub soft_errors: Vec<String>,
}

#[derive(Insertable)]
#[diesel(table_name = calculation_runs)]
pub struct NewCalculationRun {
    pub total_attendees: i32,
    pub total_events: i32,
    pub soft_errors: Vec<String>,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = assignments)]
pub struct Assignment {
    pub id: i32,
    pub run_id: i32,
    pub attendee_id: i32,
    pub event_id: i32,
    pub event_title: String,
    pub priority: i32,
    pub buying_for: Vec<String>,
    pub cost: f64,
}

impl Assignment {
    #[must_use]
    pub fn into_duty(self) -> PurchaseDuty {
        PurchaseDuty {
            event_id: self.event_id,
            event_title: self.event_title,
            priority: Priority::from_level(self.priority),
            buying_for: self.buying_for,
            cost: self.cost,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = assignments)]
pub struct NewAssignment {
    pub run_id: i32,
    pub attendee_id: i32,
    pub event_id: i32,
    pub event_title: String,
    pub priority: i32,
    pub buying_for: Vec<String>,
    pub cost: f64,
}

/// Flattens the engine output into duty rows, keeping each attendee's duty
/// order so reading rows back in id order reproduces it.
#[must_use]
pub fn assignment_rows(run_id: i32, results: &[AssignmentResult]) -> Vec<NewAssignment> {
    results
        .iter()
        .flat_map(|result| {
            result.duties.iter().map(|duty| NewAssignment {
                run_id,
                attendee_id: result.attendee_id,
                event_id: duty.event_id,
                event_title: duty.event_title.clone(),
                priority: duty.priority.level(),
                buying_for: duty.buying_for.clone(),
                cost: duty.cost,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ticket_duty_allocation_engine::{AssignmentResult, Priority, PurchaseDuty};

    use super::{assignment_rows, declaration_from_parts};

    #[test]
    fn catalog_priority_becomes_a_requested_priority() {
        let declaration =
            declaration_from_parts((7, "Alice".to_owned(), 12, "Concert".to_owned(), 30.0, Some(3)));
        assert_eq!(declaration.requested_priority, Some(Priority::Critical));

        let declaration =
            declaration_from_parts((7, "Alice".to_owned(), 12, "Concert".to_owned(), 30.0, None));
        assert_eq!(declaration.requested_priority, None);
    }

    #[test]
    fn duty_rows_keep_per_attendee_order() {
        let duty = |event_id: i32| PurchaseDuty {
            event_id,
            event_title: format!("event-{event_id}"),
            priority: Priority::Important,
            buying_for: vec!["Alice".to_owned()],
            cost: 10.0,
        };
        let results = vec![
            AssignmentResult {
                attendee_id: 1,
                display_name: "Alice".to_owned(),
                duties: vec![duty(10), duty(11)],
                total_duties: 2,
            },
            AssignmentResult {
                attendee_id: 2,
                display_name: "Bob".to_owned(),
                duties: vec![duty(12)],
                total_duties: 1,
            },
        ];

        let rows = assignment_rows(99, &results);
        let flattened: Vec<(i32, i32)> = rows
            .iter()
            .map(|row| (row.attendee_id, row.event_id))
            .collect();
        assert_eq!(flattened, vec![(1, 10), (1, 11), (2, 12)]);
        assert!(rows.iter().all(|row| row.run_id == 99));
        assert!(rows.iter().all(|row| row.priority == 2));
    }
}
