//! Groups aggregated demand into priority tiers, processed highest first.

use crate::types::{EventDemand, Priority};

/// All events sharing one priority level. Events keep their aggregation
/// order, which is what breaks remaining ties when buyers are picked.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityTier {
    pub priority: Priority,
    pub events: Vec<EventDemand>,
}

/// Splits demand into at most three tiers, ordered Critical, Important,
/// Normal. Priorities with no events produce no tier at all.
#[must_use]
pub fn partition_tiers(demands: Vec<EventDemand>) -> Vec<PriorityTier> {
    let mut critical = Vec::new();
    let mut important = Vec::new();
    let mut normal = Vec::new();

    for demand in demands {
        match demand.priority {
            Priority::Critical => critical.push(demand),
            Priority::Important => important.push(demand),
            Priority::Normal => normal.push(demand),
        }
    }

    [
        (Priority::Critical, critical),
        (Priority::Important, important),
        (Priority::Normal, normal),
    ]
    .into_iter()
    .filter(|(_, events)| !events.is_empty())
    .map(|(priority, events)| PriorityTier { priority, events })
    .collect()
}
