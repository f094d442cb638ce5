use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// One timestamped wind generation measurement, in megawatts.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WindRecord {
    pub timestamp: DateTime<Utc>,
    pub wind_mw: f64,
}

/// Earliest and latest timestamps present in the dataset.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DateBounds {
    pub min_date: DateTime<Utc>,
    pub max_date: DateTime<Utc>,
}

/// Inclusive date window. `start_date` after `end_date` is accepted and
/// simply matches nothing.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DateRangeQuery {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end_date: DateTime<Utc>,
}

impl DateRangeQuery {
    pub fn contains(&self, time: &DateTime<Utc>) -> bool {
        *time >= self.start_date && *time <= self.end_date
    }
}

impl DateBounds {
    /// Folds timestamps into their min/max pair, `None` when there are none.
    pub fn from_timestamps<I>(timestamps: I) -> Option<DateBounds>
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        timestamps.into_iter().fold(None, |bounds, time| {
            Some(match bounds {
                None => DateBounds {
                    min_date: time,
                    max_date: time,
                },
                Some(DateBounds { min_date, max_date }) => DateBounds {
                    min_date: min_date.min(time),
                    max_date: max_date.max(time),
                },
            })
        })
    }

    pub fn as_query(&self) -> DateRangeQuery {
        DateRangeQuery {
            start_date: self.min_date,
            end_date: self.max_date,
        }
    }
}
