use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::values::Timestamp;

/// One series entry: a timestamp and a value that may be absent
///
/// Absence is explicit (`None`) and never conflated with a zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedValue<T> {
    pub timestamp: Timestamp,
    pub value: Option<T>,
}

impl<T> TimestampedValue<T> {
    pub fn present(timestamp: Timestamp, value: T) -> Self {
        Self {
            timestamp,
            value: Some(value),
        }
    }

    pub fn absent(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }
}

/// Ordered sequence of timestamped values
///
/// Insertion order is chronological order. Entries are addressed by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<T> {
    entries: Vec<TimestampedValue<T>>,
}

/// Multichannel feature vectors, one per timestep
pub type FeatureSeries = Series<Vec<f64>>;

impl<T> Series<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: TimestampedValue<T>) {
        self.entries.push(entry);
    }

    pub fn push_present(&mut self, timestamp: Timestamp, value: T) {
        self.entries.push(TimestampedValue::present(timestamp, value));
    }

    pub fn push_absent(&mut self, timestamp: Timestamp) {
        self.entries.push(TimestampedValue::absent(timestamp));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimestampedValue<T>> {
        self.entries.get(index)
    }

    /// Value at `index`, `None` when out of range or absent
    pub fn value(&self, index: usize) -> Option<&T> {
        self.entries.get(index).and_then(|e| e.value.as_ref())
    }

    pub fn timestamp(&self, index: usize) -> Option<Timestamp> {
        self.entries.get(index).map(|e| e.timestamp)
    }

    pub fn first(&self) -> Option<&TimestampedValue<T>> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&TimestampedValue<T>> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[TimestampedValue<T>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimestampedValue<T>> {
        self.entries.iter()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.entries.iter().map(|e| e.timestamp)
    }

    /// Number of entries carrying a value
    pub fn count_present(&self) -> usize {
        self.entries.iter().filter(|e| e.is_present()).count()
    }

    /// Drop up to `count` leading entries, returning how many were removed
    pub fn drop_front(&mut self, count: usize) -> usize {
        let removed = count.min(self.entries.len());
        self.entries.drain(..removed);
        removed
    }
}

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Series<T> {
    type Output = TimestampedValue<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<T> FromIterator<TimestampedValue<T>> for Series<T> {
    fn from_iter<I: IntoIterator<Item = TimestampedValue<T>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Series<T> {
    type Item = &'a TimestampedValue<T>;
    type IntoIter = std::slice::Iter<'a, TimestampedValue<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn ts(day: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::days(day)
    }

    #[test]
    fn test_absent_is_not_zero() {
        let mut series = Series::new();
        series.push_present(ts(0), 0.0);
        series.push_absent(ts(1));

        assert_eq!(series.value(0), Some(&0.0));
        assert_eq!(series.value(1), None);
        assert!(series[0].is_present());
        assert!(series[1].is_absent());
        assert_eq!(series.count_present(), 1);
    }

    #[test]
    fn test_drop_front_keeps_order() {
        let series: Series<i32> = (0..5)
            .map(|i| TimestampedValue::present(ts(i), i as i32))
            .collect();
        let mut trimmed = series.clone();

        assert_eq!(trimmed.drop_front(2), 2);
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed.timestamp(0), Some(ts(2)));
        assert_eq!(trimmed.value(2), Some(&4));
    }

    #[test]
    fn test_drop_front_saturates() {
        let mut series: Series<f64> = Series::new();
        series.push_present(ts(0), 1.0);
        assert_eq!(series.drop_front(10), 1);
        assert!(series.is_empty());
    }

    #[test]
    fn test_out_of_range_access() {
        let series: Series<f64> = Series::new();
        assert!(series.get(0).is_none());
        assert!(series.value(3).is_none());
        assert!(series.timestamp(0).is_none());
    }
}
