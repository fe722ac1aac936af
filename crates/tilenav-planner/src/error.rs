//! Planner error type.

use thiserror::Error;

use tilenav_paths::SearchCosts;

/// Errors produced when starting a [`Planner`](crate::Planner).
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("failed to spawn path worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("invalid search costs {0:?}: need 0 < cardinal < diagonal < 2 * cardinal")]
    InvalidCosts(SearchCosts),

    #[error("worker poll interval must be non-zero")]
    ZeroPollInterval,
}

pub type Result<T> = std::result::Result<T, PlannerError>;
