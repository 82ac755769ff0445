//! Error types for the fos-calendar crate.

/// Error type for all fallible operations in the fos-calendar crate.
///
/// Water-year spans and day-of-water-year offsets are built with chrono
/// date arithmetic, so the only failure mode is a year or offset that
/// leaves chrono's representable date range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a water-year label cannot be expressed as calendar dates.
    #[error("water year {year} is outside the representable date range")]
    YearOutOfRange {
        /// The water-year label that could not be represented.
        year: i32,
    },

    /// Returned when a day offset from the reference year overflows the
    /// representable date range.
    #[error("day offset {offset} from the reference year is outside the representable date range")]
    OffsetOutOfRange {
        /// The offending day-of-year offset.
        offset: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_year_out_of_range() {
        let err = CalendarError::YearOutOfRange { year: 300_000 };
        assert_eq!(
            err.to_string(),
            "water year 300000 is outside the representable date range"
        );
    }

    #[test]
    fn error_offset_out_of_range() {
        let err = CalendarError::OffsetOutOfRange { offset: i64::MAX };
        assert_eq!(
            err.to_string(),
            format!(
                "day offset {} from the reference year is outside the representable date range",
                i64::MAX
            )
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_clone_and_partial_eq() {
        let a = CalendarError::YearOutOfRange { year: -300_000 };
        let b = a.clone();
        assert_eq!(a, b);

        let c = CalendarError::OffsetOutOfRange { offset: 1 };
        assert_ne!(a, c);
    }
}
