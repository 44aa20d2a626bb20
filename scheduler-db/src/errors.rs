//! Per-operation error enums, in the teacher's `db/src/errors.rs` style
//! (`CreateRegionError`, `TimeSlotError`, ...) — fine-grained rather than one
//! catch-all, so callers can match on the operation that failed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("database did not respond to ping")]
    Unreachable,
    #[error("database connection failed: {0}")]
    Connection(#[from] sea_orm::DbErr),
}

#[derive(Error, Debug)]
pub enum ReplaceDraftMatchesError {
    #[error("database operation failed: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("transaction failed: {0}")]
    Transaction(#[from] sea_orm::TransactionError<sea_orm::DbErr>),
}
