//! Metric entity.

use super::super::value_objects::Trend;
use crate::MetricId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observed dashboard metric. Read-only from the store's
/// perspective: the collection is only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: MetricId,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub trend: Trend,
    /// Signed percent change since the previous observation.
    pub change: f64,
    pub timestamp: DateTime<Utc>,
}

impl Metric {
    /// Creates a metric, deriving the trend from the sign of `change`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        change: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MetricId::new(id),
            name: name.into(),
            value,
            unit: unit.into(),
            trend: Trend::from_change(change),
            change,
            timestamp,
        }
    }
}
