use ticket_duty_allocation_config::ConfigError;
use ticket_duty_allocation_database::error::DatabaseError;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
