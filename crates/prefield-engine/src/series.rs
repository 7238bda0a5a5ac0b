//! Recorded outputs of a run: the aggregate time series and field snapshots.
//!
//! These are the only data handed to presentation code (plots, heatmaps,
//! CSV dumps), so they are plain, serializable values.

use indexmap::IndexMap;
use prefield_core::{Field, Period};
use serde::Serialize;

/// Aggregate statistics for one period.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PeriodRecord {
    /// Which period this is.
    pub period: Period,
    /// Mean intensity of the field produced in this period.
    pub average_preference: f64,
    /// Price ratio computed from that field.
    pub price_ratio: f64,
}

/// Per-period average preference and price ratio, indexed from period 0.
///
/// Both sequences always have the same length; after a completed run that
/// length is the configured period count.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    average_preference: Vec<f64>,
    price_ratio: Vec<f64>,
}

impl TimeSeries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            average_preference: Vec::with_capacity(capacity),
            price_ratio: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, average_preference: f64, price_ratio: f64) -> PeriodRecord {
        let period = Period(self.average_preference.len() as u64);
        self.average_preference.push(average_preference);
        self.price_ratio.push(price_ratio);
        PeriodRecord {
            period,
            average_preference,
            price_ratio,
        }
    }

    /// Number of recorded periods.
    pub fn len(&self) -> usize {
        self.average_preference.len()
    }

    /// `true` if no period has been recorded.
    pub fn is_empty(&self) -> bool {
        self.average_preference.is_empty()
    }

    /// Average preference per period.
    pub fn average_preference(&self) -> &[f64] {
        &self.average_preference
    }

    /// Price ratio per period.
    pub fn price_ratio(&self) -> &[f64] {
        &self.price_ratio
    }

    /// The record for `period`, if it has been reached.
    pub fn get(&self, period: Period) -> Option<PeriodRecord> {
        let i = usize::try_from(period.0).ok()?;
        Some(PeriodRecord {
            period,
            average_preference: *self.average_preference.get(i)?,
            price_ratio: *self.price_ratio.get(i)?,
        })
    }

    /// The most recent record.
    pub fn last(&self) -> Option<PeriodRecord> {
        let n = self.len().checked_sub(1)?;
        self.get(Period(n as u64))
    }

    /// Iterate over all records in period order.
    pub fn records(&self) -> impl Iterator<Item = PeriodRecord> + '_ {
        self.average_preference
            .iter()
            .zip(&self.price_ratio)
            .enumerate()
            .map(|(i, (&average_preference, &price_ratio))| PeriodRecord {
                period: Period(i as u64),
                average_preference,
                price_ratio,
            })
    }
}

/// Fields captured at caller-chosen periods, in period order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SnapshotSet {
    snapshots: IndexMap<Period, Field>,
}

impl SnapshotSet {
    pub(crate) fn insert(&mut self, period: Period, field: Field) {
        self.snapshots.insert(period, field);
    }

    /// The field produced in `period`, if it was a checkpoint.
    pub fn get(&self, period: Period) -> Option<&Field> {
        self.snapshots.get(&period)
    }

    /// Whether `period` was captured.
    pub fn contains(&self, period: Period) -> bool {
        self.snapshots.contains_key(&period)
    }

    /// Number of captured fields.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Captured periods, ascending.
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.snapshots.keys().copied()
    }

    /// `(period, field)` pairs, ascending by period.
    pub fn iter(&self) -> impl Iterator<Item = (Period, &Field)> + '_ {
        self.snapshots.iter().map(|(&p, f)| (p, f))
    }
}

/// Everything a run records.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Trajectory {
    /// Average preference and price ratio per period.
    pub series: TimeSeries,
    /// Fields at the requested checkpoints.
    pub snapshots: SnapshotSet,
}
