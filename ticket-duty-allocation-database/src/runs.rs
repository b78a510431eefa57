//! Persists allocation passes and answers reads through the latest-run
//! pointer.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use ticket_duty_allocation_engine::{AllocationOutcome, PurchaseDuty};

use crate::error::DatabaseError;
use crate::models::{assignment_rows, Assignment, CalculationRun, NewCalculationRun};
use crate::schema::{assignments, calculation_runs, latest_run_pointer};
use crate::Pool;

/// Publishes a new run and retires the previous one in a single
/// transaction: insert the envelope and its duty rows, flip the pointer,
/// then delete everything the pointer no longer reaches. A reader joining
/// through the pointer sees the old run or the new one, never a mix and
/// never nothing.
pub async fn replace_latest_run(
    pool: &Pool,
    total_events: i32,
    outcome: &AllocationOutcome,
) -> Result<CalculationRun, DatabaseError> {
    let mut connection = pool.get().await?;

    connection
        .transaction::<CalculationRun, DatabaseError, _>(|connection| {
            async move {
                let run: CalculationRun = diesel::insert_into(calculation_runs::table)
                    .values(NewCalculationRun {
                        total_attendees: i32::try_from(outcome.assignments.len())
                            .unwrap_or(i32::MAX),
                        total_events,
                        soft_errors: outcome.soft_errors.clone(),
                    })
                    .returning(CalculationRun::as_returning())
                    .get_result(connection)
                    .await?;

                let rows = assignment_rows(run.id, &outcome.assignments);
                if !rows.is_empty() {
                    diesel::insert_into(assignments::table)
                        .values(&rows)
                        .execute(connection)
                        .await?;
                }

                diesel::insert_into(latest_run_pointer::table)
                    .values((
                        latest_run_pointer::singleton.eq(true),
                        latest_run_pointer::run_id.eq(run.id),
                    ))
                    .on_conflict(latest_run_pointer::singleton)
                    .do_update()
                    .set(latest_run_pointer::run_id.eq(run.id))
                    .execute(connection)
                    .await?;

                diesel::delete(assignments::table.filter(assignments::run_id.ne(run.id)))
                    .execute(connection)
                    .await?;
                diesel::delete(calculation_runs::table.filter(calculation_runs::id.ne(run.id)))
                    .execute(connection)
                    .await?;

                Ok(run)
            }
            .scope_boxed()
        })
        .await
}

/// The run the pointer currently reaches, if any pass ever finished.
pub async fn latest_run(pool: &Pool) -> Result<Option<CalculationRun>, DatabaseError> {
    let mut connection = pool.get().await?;

    Ok(latest_run_pointer::table
        .inner_join(calculation_runs::table)
        .select(CalculationRun::as_select())
        .first(&mut connection)
        .await
        .optional()?)
}

/// One attendee's current duties, resolved through the latest run in a
/// single statement so a concurrent swap cannot tear the read apart.
pub async fn duties_for_attendee(
    pool: &Pool,
    attendee_id: i32,
) -> Result<Vec<PurchaseDuty>, DatabaseError> {
    let mut connection = pool.get().await?;

    let rows: Vec<Assignment> = assignments::table
        .filter(
            assignments::run_id
                .eq_any(latest_run_pointer::table.select(latest_run_pointer::run_id)),
        )
        .filter(assignments::attendee_id.eq(attendee_id))
        .order(assignments::id.asc())
        .select(Assignment::as_select())
        .load(&mut connection)
        .await?;

    Ok(rows.into_iter().map(Assignment::into_duty).collect())
}
