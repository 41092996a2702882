use std::{fmt, str::FromStr};

use crate::model::Value;

/// Used when neither the cluster nor the caller provide a grace period.
pub const DEFAULT_NODE_DRAIN_GRACE_PERIOD: &str = "1 hour";

/// The choices offered when prompting for a grace period.
pub const NODE_DRAIN_GRACE_PERIOD_OPTIONS: [&str; 7] = [
    "15 minutes",
    "30 minutes",
    "45 minutes",
    "1 hour",
    "2 hours",
    "4 hours",
    "8 hours",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GracePeriodUnit {
    Minutes,
    Hours,
}

impl FromStr for GracePeriodUnit {
    type Err = GracePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" | "minutes" => Ok(Self::Minutes),
            "hour" | "hours" => Ok(Self::Hours),
            other => Err(GracePeriodError::InvalidUnit(other.to_owned())),
        }
    }
}

/// How long Pod Disruption Budget protected workloads are respected while a
/// node is drained, before they are forcibly evicted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDrainGracePeriod {
    value: f64,
    unit: GracePeriodUnit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GracePeriodError {
    #[error("'{0}' must be a number followed by a unit, e.g. '1 hour'")]
    Malformed(String),
    #[error("'{0}' is not a valid number")]
    InvalidValue(String),
    #[error("'{0}' must not be negative")]
    Negative(String),
    #[error("unit '{0}' must be one of 'minutes' or 'hours'")]
    InvalidUnit(String),
}

impl NodeDrainGracePeriod {
    pub fn new(value: f64, unit: GracePeriodUnit) -> Self {
        Self { value, unit }
    }

    /// The service only stores grace periods in minutes.
    pub fn minutes(&self) -> f64 {
        match self.unit {
            GracePeriodUnit::Minutes => self.value,
            GracePeriodUnit::Hours => self.value * 60.0,
        }
    }

    /// The payload sent to the service.
    pub fn to_value(&self) -> Value {
        Value {
            value: self.minutes(),
            unit: "minutes".to_owned(),
        }
    }
}

impl FromStr for NodeDrainGracePeriod {
    type Err = GracePeriodError;

    #[tracing::instrument(name = "NodeDrainGracePeriod::from_str", skip_all, fields(
        input = %s
    ))]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        let (value, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(value), Some(unit), None) => (value, unit),
            _ => return Err(GracePeriodError::Malformed(s.to_owned())),
        };

        let value: f64 = value
            .parse()
            .map_err(|_| GracePeriodError::InvalidValue(value.to_owned()))?;

        if !value.is_finite() {
            return Err(GracePeriodError::InvalidValue(s.to_owned()));
        }
        if value < 0.0 {
            return Err(GracePeriodError::Negative(s.to_owned()));
        }

        Ok(Self {
            value,
            unit: unit.parse()?,
        })
    }
}

impl fmt::Display for NodeDrainGracePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match (self.unit, self.value == 1.0) {
            (GracePeriodUnit::Minutes, true) => "minute",
            (GracePeriodUnit::Minutes, false) => "minutes",
            (GracePeriodUnit::Hours, true) => "hour",
            (GracePeriodUnit::Hours, false) => "hours",
        };
        write!(f, "{} {unit}", self.value)
    }
}

/// Renders the grace period stored on a cluster the way a user would type it.
/// Whole hours are shown in hours, anything else keeps the stored unit so it
/// parses back to exactly the stored minutes.
pub fn describe_stored(stored: &Value) -> String {
    if stored.value >= 60.0 && stored.value % 60.0 == 0.0 {
        NodeDrainGracePeriod::new(stored.value / 60.0, GracePeriodUnit::Hours).to_string()
    } else {
        format!("{} {}", stored.value, stored.unit)
    }
}
