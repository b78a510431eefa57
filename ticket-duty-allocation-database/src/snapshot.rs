//! Reads the inputs of one allocation pass: the full roster and every
//! active interest declaration.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use ticket_duty_allocation_engine::{AttendeeRef, InterestDeclaration};

use crate::error::DatabaseError;
use crate::models::{declaration_from_parts, AttendeeRow, InterestParts};
use crate::schema::{attendees, events, wishlist_entries};
use crate::Pool;

/// Loads the roster and the declarations in one consistent order: attendees
/// by id, declarations by wishlist entry id. The engine breaks its ties by
/// these orders, so they must not depend on whatever the planner returns.
/// Canceled events are filtered out here; the engine never sees them.
pub async fn load_snapshot(
    pool: &Pool,
) -> Result<(Vec<AttendeeRef>, Vec<InterestDeclaration>), DatabaseError> {
    let mut connection = pool.get().await?;

    let roster: Vec<AttendeeRow> = attendees::table
        .order(attendees::id.asc())
        .select(AttendeeRow::as_select())
        .load(&mut connection)
        .await?;

    let declarations: Vec<InterestParts> = wishlist_entries::table
        .inner_join(attendees::table)
        .inner_join(events::table)
        .filter(events::canceled.eq(false))
        .order(wishlist_entries::id.asc())
        .select((
            wishlist_entries::attendee_id,
            attendees::display_name,
            wishlist_entries::event_id,
            events::title,
            events::cost,
            events::priority,
        ))
        .load(&mut connection)
        .await?;

    Ok((
        roster
            .into_iter()
            .map(AttendeeRow::into_attendee_ref)
            .collect(),
        declarations
            .into_iter()
            .map(declaration_from_parts)
            .collect(),
    ))
}
