//! Date-indexed value columns.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::SeriesError;
use crate::span::DateSpan;

/// A daily time series: a strictly-increasing date axis plus named `f64`
/// columns of matching length.
///
/// Gaps in the axis are allowed (days may be missing outright) and missing
/// samples inside a column are `NaN`. Both station observations and the
/// per-station WRF series use this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyFrame {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl DailyFrame {
    /// Builds a frame from a date axis and named columns.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnsortedDates`] if the axis is not strictly
    /// increasing, or [`SeriesError::LengthMismatch`] if any column's length
    /// differs from the axis length.
    pub fn new(
        dates: Vec<NaiveDate>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self, SeriesError> {
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SeriesError::UnsortedDates {
                    position: i + 1,
                    date: pair[1],
                });
            }
        }
        for (name, values) in &columns {
            if values.len() != dates.len() {
                return Err(SeriesError::LengthMismatch {
                    column: name.clone(),
                    dates: dates.len(),
                    values: values.len(),
                });
            }
        }
        Ok(Self { dates, columns })
    }

    /// Builds a single-column frame.
    pub fn from_column(
        dates: Vec<NaiveDate>,
        name: &str,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        let mut columns = BTreeMap::new();
        columns.insert(name.to_string(), values);
        Self::new(dates, columns)
    }

    /// Number of dates on the axis.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the frame has zero rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The values of a named column.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::MissingColumn`] if the frame has no column of
    /// that name.
    pub fn column(&self, name: &str) -> Result<&[f64], SeriesError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SeriesError::MissingColumn {
                name: name.to_string(),
                available: self.column_names().map(str::to_string).collect(),
            })
    }

    /// Whether the frame has a column of this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// First date on the axis, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last date on the axis, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Copies out the sub-frame whose dates fall inside `span`.
    ///
    /// The result keeps every column and may be empty; the axis stays
    /// strictly increasing because it is a contiguous cut of this frame's.
    pub fn slice(&self, span: &DateSpan) -> DailyFrame {
        let lo = self.dates.partition_point(|d| *d < span.start());
        let hi = self.dates.partition_point(|d| *d < span.end());
        let dates = self.dates[lo..hi].to_vec();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| (name.clone(), values[lo..hi].to_vec()))
            .collect();
        DailyFrame { dates, columns }
    }

    /// Renames a column, consuming the frame.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::MissingColumn`] if `from` does not exist and
    /// [`SeriesError::DuplicateColumn`] if `to` already does.
    pub fn renamed(mut self, from: &str, to: &str) -> Result<Self, SeriesError> {
        if from == to {
            return Ok(self);
        }
        if self.columns.contains_key(to) {
            return Err(SeriesError::DuplicateColumn {
                name: to.to_string(),
            });
        }
        let values = self
            .columns
            .remove(from)
            .ok_or_else(|| SeriesError::MissingColumn {
                name: from.to_string(),
                available: self.column_names().map(str::to_string).collect(),
            })?;
        self.columns.insert(to.to_string(), values);
        Ok(self)
    }

    /// Multiplies every value in every column by `factor`, consuming the
    /// frame. Unit conversions (say, millimetres to inches) go through here.
    pub fn scaled(mut self, factor: f64) -> DailyFrame {
        for values in self.columns.values_mut() {
            for v in values.iter_mut() {
                *v *= factor;
            }
        }
        self
    }

    /// The span of dates both frames cover, if they overlap at all.
    pub fn common_span(&self, other: &DailyFrame) -> Option<DateSpan> {
        let start = self.first_date()?.max(other.first_date()?);
        let last = self.last_date()?.min(other.last_date()?);
        let end = last.succ_opt()?;
        DateSpan::new(start, end).ok()
    }

    /// Copies out both frames cut down to the dates present on both axes.
    ///
    /// Pairing samples by position is only sound after this cut: a day
    /// missing from either axis is dropped from both sides, so row `k` of
    /// the left result and row `k` of the right share a date.
    pub fn aligned(&self, other: &DailyFrame) -> (DailyFrame, DailyFrame) {
        let mut left = Vec::new();
        let mut right = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.dates.len() && j < other.dates.len() {
            match self.dates[i].cmp(&other.dates[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    left.push(i);
                    right.push(j);
                    i += 1;
                    j += 1;
                }
            }
        }
        (self.take_rows(&left), other.take_rows(&right))
    }

    fn take_rows(&self, rows: &[usize]) -> DailyFrame {
        let dates = rows.iter().map(|&r| self.dates[r]).collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let picked = rows.iter().map(|&r| values[r]).collect();
                (name.clone(), picked)
            })
            .collect();
        DailyFrame { dates, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn sample_frame() -> DailyFrame {
        let dates = vec![d(2000, 1, 1), d(2000, 1, 2), d(2000, 1, 4), d(2000, 1, 5)];
        DailyFrame::from_column(dates, "SWE", vec![1.0, 2.0, 4.0, 5.0]).unwrap()
    }

    #[test]
    fn build_and_read_back() {
        let frame = sample_frame();
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.column("SWE").unwrap(), &[1.0, 2.0, 4.0, 5.0]);
        assert_eq!(frame.first_date(), Some(d(2000, 1, 1)));
        assert_eq!(frame.last_date(), Some(d(2000, 1, 5)));
    }

    #[test]
    fn unsorted_axis_rejected() {
        let dates = vec![d(2000, 1, 2), d(2000, 1, 1)];
        let err = DailyFrame::from_column(dates, "SWE", vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::UnsortedDates {
                position: 1,
                date: d(2000, 1, 1),
            }
        );
    }

    #[test]
    fn duplicate_date_rejected() {
        let dates = vec![d(2000, 1, 1), d(2000, 1, 1)];
        assert!(DailyFrame::from_column(dates, "SWE", vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn column_length_checked() {
        let dates = vec![d(2000, 1, 1), d(2000, 1, 2)];
        let err = DailyFrame::from_column(dates, "SWE", vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::LengthMismatch {
                column: "SWE".to_string(),
                dates: 2,
                values: 1,
            }
        );
    }

    #[test]
    fn missing_column_lists_available() {
        let frame = sample_frame();
        let err = frame.column("SNOTEL_SWE").unwrap_err();
        assert_eq!(
            err,
            SeriesError::MissingColumn {
                name: "SNOTEL_SWE".to_string(),
                available: vec!["SWE".to_string()],
            }
        );
    }

    #[test]
    fn empty_frame_is_fine() {
        let frame = DailyFrame::from_column(vec![], "SWE", vec![]).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.first_date(), None);
    }

    #[test]
    fn slice_half_open() {
        let frame = sample_frame();
        let span = DateSpan::new(d(2000, 1, 2), d(2000, 1, 5)).unwrap();
        let cut = frame.slice(&span);
        assert_eq!(cut.dates(), &[d(2000, 1, 2), d(2000, 1, 4)]);
        assert_eq!(cut.column("SWE").unwrap(), &[2.0, 4.0]);
    }

    #[test]
    fn slice_outside_axis_is_empty() {
        let frame = sample_frame();
        let span = DateSpan::new(d(1990, 1, 1), d(1990, 2, 1)).unwrap();
        assert!(frame.slice(&span).is_empty());
    }

    #[test]
    fn slice_keeps_gap_semantics() {
        // Jan 3 is absent from the axis; slicing across it must not invent it.
        let frame = sample_frame();
        let span = DateSpan::new(d(2000, 1, 3), d(2000, 1, 5)).unwrap();
        let cut = frame.slice(&span);
        assert_eq!(cut.dates(), &[d(2000, 1, 4)]);
    }

    #[test]
    fn renamed_moves_values() {
        let frame = sample_frame().renamed("SWE", "SNOTEL_SWE").unwrap();
        assert!(frame.has_column("SNOTEL_SWE"));
        assert!(!frame.has_column("SWE"));
        assert_eq!(frame.column("SNOTEL_SWE").unwrap(), &[1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn renamed_missing_source() {
        let err = sample_frame().renamed("snow", "SWE2").unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumn { .. }));
    }

    #[test]
    fn renamed_collision() {
        let mut columns = BTreeMap::new();
        columns.insert("a".to_string(), vec![1.0]);
        columns.insert("b".to_string(), vec![2.0]);
        let frame = DailyFrame::new(vec![d(2000, 1, 1)], columns).unwrap();
        let err = frame.renamed("a", "b").unwrap_err();
        assert_eq!(
            err,
            SeriesError::DuplicateColumn {
                name: "b".to_string()
            }
        );
    }

    #[test]
    fn scaled_multiplies_every_column() {
        let mut columns = BTreeMap::new();
        columns.insert("SWE".to_string(), vec![25.4, 0.0, f64::NAN]);
        columns.insert("PREC".to_string(), vec![100.0, 50.0, 1.0]);
        let dates = vec![d(2000, 1, 1), d(2000, 1, 2), d(2000, 1, 3)];
        let frame = DailyFrame::new(dates, columns).unwrap().scaled(2.0);
        assert_eq!(frame.column("PREC").unwrap(), &[200.0, 100.0, 2.0]);
        let swe = frame.column("SWE").unwrap();
        assert_eq!(swe[0], 50.8);
        assert!(swe[2].is_nan());
    }

    #[test]
    fn common_span_intersects() {
        let a = sample_frame();
        let dates = vec![d(2000, 1, 3), d(2000, 1, 4), d(2000, 1, 9)];
        let b = DailyFrame::from_column(dates, "SWE", vec![0.0, 0.0, 0.0]).unwrap();
        let span = a.common_span(&b).unwrap();
        assert_eq!(span.start(), d(2000, 1, 3));
        assert_eq!(span.end(), d(2000, 1, 6)); // day past a's last date
    }

    #[test]
    fn common_span_disjoint() {
        let a = sample_frame();
        let dates = vec![d(2001, 1, 1)];
        let b = DailyFrame::from_column(dates, "SWE", vec![0.0]).unwrap();
        assert!(a.common_span(&b).is_none());
    }

    #[test]
    fn aligned_keeps_only_shared_dates() {
        // a skips Jan 3, b skips Jan 2; only Jan 1, 4, 5 survive on both.
        let a = sample_frame();
        let dates = vec![d(2000, 1, 1), d(2000, 1, 3), d(2000, 1, 4), d(2000, 1, 5)];
        let b = DailyFrame::from_column(dates, "PREC", vec![10.0, 30.0, 40.0, 50.0]).unwrap();
        let (a_cut, b_cut) = a.aligned(&b);
        assert_eq!(a_cut.dates(), b_cut.dates());
        assert_eq!(a_cut.dates(), &[d(2000, 1, 1), d(2000, 1, 4), d(2000, 1, 5)]);
        assert_eq!(a_cut.column("SWE").unwrap(), &[1.0, 4.0, 5.0]);
        assert_eq!(b_cut.column("PREC").unwrap(), &[10.0, 40.0, 50.0]);
    }

    #[test]
    fn aligned_disjoint_axes_are_empty() {
        let a = sample_frame();
        let b = DailyFrame::from_column(vec![d(2001, 1, 1)], "SWE", vec![0.0]).unwrap();
        let (a_cut, b_cut) = a.aligned(&b);
        assert!(a_cut.is_empty());
        assert!(b_cut.is_empty());
    }
}
