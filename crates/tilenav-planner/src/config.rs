//! Planner configuration.

use std::time::Duration;

use tilenav_paths::SearchCosts;

use crate::error::{PlannerError, Result};

/// Configuration for a [`Planner`](crate::Planner).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Step costs and heuristic scale used by every search.
    pub costs: SearchCosts,
    /// How long the worker waits for new jobs before re-checking its queue.
    pub poll_interval: Duration,
    /// Initial capacity of the pending and active job batches.
    pub batch_capacity: usize,
}

impl PlannerConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2);

    pub fn with_costs(mut self, costs: SearchCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_batch_capacity(mut self, batch_capacity: usize) -> Self {
        self.batch_capacity = batch_capacity;
        self
    }

    /// Check the configuration before a worker is started with it.
    pub fn validate(&self) -> Result<()> {
        if !self.costs.is_valid() {
            return Err(PlannerError::InvalidCosts(self.costs));
        }
        if self.poll_interval.is_zero() {
            return Err(PlannerError::ZeroPollInterval);
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            costs: SearchCosts::default(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            batch_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_costs_and_interval() {
        let bad = PlannerConfig::default().with_costs(SearchCosts {
            cardinal: 10,
            diagonal: 25,
            heuristic_scale: 1,
        });
        assert!(matches!(bad.validate(), Err(PlannerError::InvalidCosts(_))));
        let bad = PlannerConfig::default().with_poll_interval(Duration::ZERO);
        assert!(matches!(bad.validate(), Err(PlannerError::ZeroPollInterval)));
    }
}
