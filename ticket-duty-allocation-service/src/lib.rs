//! The imperative shell around the allocation engine: it loads snapshots,
//! publishes calculation runs and serializes recomputation requests. The
//! CRUD layer in front of this only needs [`setup_service`] and
//! [`RecomputeHandle::trigger`].

pub mod error;
pub mod recompute;

use ticket_duty_allocation_config::get_config;
use ticket_duty_allocation_database::{get_database_connection, Pool};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use crate::error::ServiceError;
pub use crate::recompute::{
    run_recomputation, spawn_recompute_worker, spawn_single_flight, RecomputeHandle, RunSummary,
};

/// Stdout logging; `RUST_LOG` selects the level, `info` otherwise.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Reads the configuration, connects the pool and starts the recompute
/// worker. Must run inside a tokio runtime.
pub fn setup_service() -> Result<(Pool, RecomputeHandle, JoinHandle<()>), ServiceError> {
    let config = get_config()?;
    let pool = get_database_connection(&config.database_url)?;
    let (handle, worker) = spawn_recompute_worker(pool.clone(), config.duty_cap);
    info!(duty_cap = config.duty_cap, "recompute worker started");
    Ok((pool, handle, worker))
}
