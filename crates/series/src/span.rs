//! Half-open date spans.

use chrono::NaiveDate;

use crate::error::SeriesError;

/// A half-open span of calendar dates, `[start, end)`.
///
/// Water-year windows, train/test windows, and scenario coverage are all
/// expressed as spans; half-open bounds make adjacent spans tile without
/// double-counting the boundary date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    /// Creates a span covering `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidWindow`] if `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SeriesError> {
        if start >= end {
            return Err(SeriesError::InvalidWindow {
                reason: format!("span start {start} is not before end {end}"),
            });
        }
        Ok(Self { start, end })
    }

    /// First date inside the span.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First date past the span.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Number of calendar days the span covers.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether two spans share any date.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}
