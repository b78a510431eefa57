use serde::{Deserialize, Serialize};

/// How urgently an event needs redundant purchasers. Stored as 1..=3 in the
/// database, hence the explicit level conversions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    Normal,
    Important,
    Critical,
}

impl Priority {
    /// Unknown levels collapse to `Normal` rather than failing; the catalog
    /// collaborator is free to store whatever an admin typed.
    #[must_use]
    pub const fn from_level(level: i32) -> Self {
        match level {
            3 => Self::Critical,
            2 => Self::Important,
            _ => Self::Normal,
        }
    }

    #[must_use]
    pub const fn level(self) -> i32 {
        match self {
            Self::Normal => 1,
            Self::Important => 2,
            Self::Critical => 3,
        }
    }
}

/// A member of the community roster. Every member is a potential purchaser,
/// whether or not they put anything on their own wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeRef {
    pub attendee_id: i32,
    pub display_name: String,
}

/// One attendee's recorded wish to attend one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestDeclaration {
    pub attendee_id: i32,
    pub display_name: String,
    pub event_id: i32,
    pub event_title: String,
    pub cost: f64,
    pub requested_priority: Option<Priority>,
}

/// Collapsed demand for a single event: who wants it and how urgently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDemand {
    pub event_id: i32,
    pub event_title: String,
    pub cost: f64,
    pub priority: Priority,
    /// Unique by attendee, in the order their declarations were first seen.
    pub interested: Vec<AttendeeRef>,
}

/// An instruction for one attendee to attempt the ticket purchase for one
/// event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDuty {
    pub event_id: i32,
    pub event_title: String,
    pub priority: Priority,
    /// Display names of everyone who wants the event, so the purchaser knows
    /// who they are buying for. Context only, not an eligibility list.
    pub buying_for: Vec<String>,
    pub cost: f64,
}

/// The duty list for one roster member. Present for every member, empty or
/// not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub attendee_id: i32,
    pub display_name: String,
    pub duties: Vec<PurchaseDuty>,
    pub total_duties: usize,
}

/// Everything one allocation pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub assignments: Vec<AssignmentResult>,
    pub soft_errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::Priority;

    #[test]
    fn levels_round_trip() {
        for priority in [Priority::Normal, Priority::Important, Priority::Critical] {
            assert_eq!(Priority::from_level(priority.level()), priority);
        }
    }

    #[test]
    fn unknown_levels_collapse_to_normal() {
        assert_eq!(Priority::from_level(0), Priority::Normal);
        assert_eq!(Priority::from_level(-7), Priority::Normal);
        assert_eq!(Priority::from_level(99), Priority::Normal);
    }

    #[test]
    fn priorities_order_by_urgency() {
        assert!(Priority::Critical > Priority::Important);
        assert!(Priority::Important > Priority::Normal);
    }
}
