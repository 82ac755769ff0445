//! Named disjoint windows over a daily series.

use std::collections::BTreeMap;

use crate::error::SeriesError;
use crate::frame::DailyFrame;
use crate::span::DateSpan;

/// An ordered set of named, pairwise-disjoint date spans.
///
/// The declaration order is the concatenation order downstream model output
/// uses. Windows need not cover the full series; gaps between them (say,
/// between train and test) are fine.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSet {
    windows: Vec<(String, DateSpan)>,
}

impl WindowSet {
    /// Builds a window set from (name, span) pairs.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidWindow`] if the set is empty, a name
    /// repeats, or any two spans overlap.
    pub fn new(windows: Vec<(String, DateSpan)>) -> Result<Self, SeriesError> {
        if windows.is_empty() {
            return Err(SeriesError::InvalidWindow {
                reason: "window set is empty".to_string(),
            });
        }
        for (i, (name, _)) in windows.iter().enumerate() {
            if windows[..i].iter().any(|(other, _)| other == name) {
                return Err(SeriesError::InvalidWindow {
                    reason: format!("window name '{name}' repeats"),
                });
            }
        }
        for (i, (name_a, span_a)) in windows.iter().enumerate() {
            for (name_b, span_b) in &windows[i + 1..] {
                if span_a.overlaps(span_b) {
                    return Err(SeriesError::InvalidWindow {
                        reason: format!("windows '{name_a}' and '{name_b}' overlap"),
                    });
                }
            }
        }
        Ok(Self { windows })
    }

    /// Convenience constructor for the common train/test split.
    pub fn train_test(train: DateSpan, test: DateSpan) -> Result<Self, SeriesError> {
        Self::new(vec![
            ("train".to_string(), train),
            ("test".to_string(), test),
        ])
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the set has no windows (never true for a constructed set).
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Window names in declaration order.
    pub fn order(&self) -> Vec<String> {
        self.windows.iter().map(|(name, _)| name.clone()).collect()
    }

    /// The span of a named window.
    pub fn get(&self, name: &str) -> Option<&DateSpan> {
        self.windows
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, span)| span)
    }

    /// Iterates (name, span) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DateSpan)> {
        self.windows.iter().map(|(name, span)| (name.as_str(), span))
    }

    /// Slices `frame` into one sub-frame per window.
    ///
    /// Applying the same window set to the forcing frame and the
    /// observation frame yields time-aligned pairs; that alignment is what
    /// the forecast models rely on.
    pub fn partition(&self, frame: &DailyFrame) -> BTreeMap<String, DailyFrame> {
        self.windows
            .iter()
            .map(|(name, span)| (name.clone(), frame.slice(span)))
            .collect()
    }
}
