//! Relative time windows for visit timelines.

use chrono::{DateTime, Days, Duration, Months, Utc};

/// Optional "last N units" window applied to a visit timeline.
///
/// When at least one field is set, [`TimelineFilter::cutoff`] subtracts every
/// present unit from the reference time in a fixed order: years, months,
/// days, hours, minutes. Month arithmetic clamps to the end of the target
/// month, so the order matters around month ends (March 31 minus one month
/// is the last day of February, not early March).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    pub last_years: Option<u32>,
    pub last_months: Option<u32>,
    pub last_days: Option<u32>,
    pub last_hours: Option<u32>,
    pub last_minutes: Option<u32>,
}

/// The window reaches past the range of representable timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Time window is out of range")]
pub struct WindowOutOfRange;

impl TimelineFilter {
    /// A filter with no window, matching every visit.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn last_days(days: u32) -> Self {
        Self {
            last_days: Some(days),
            ..Self::default()
        }
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.last_years.is_none()
            && self.last_months.is_none()
            && self.last_days.is_none()
            && self.last_hours.is_none()
            && self.last_minutes.is_none()
    }

    /// Computes the earliest timestamp included by this window.
    ///
    /// Returns `Ok(None)` for an empty filter.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, WindowOutOfRange> {
        if self.is_empty() {
            return Ok(None);
        }

        let mut cutoff = now;

        if let Some(years) = self.last_years {
            let months = years.checked_mul(12).ok_or(WindowOutOfRange)?;
            cutoff = cutoff
                .checked_sub_months(Months::new(months))
                .ok_or(WindowOutOfRange)?;
        }
        if let Some(months) = self.last_months {
            cutoff = cutoff
                .checked_sub_months(Months::new(months))
                .ok_or(WindowOutOfRange)?;
        }
        if let Some(days) = self.last_days {
            cutoff = cutoff
                .checked_sub_days(Days::new(u64::from(days)))
                .ok_or(WindowOutOfRange)?;
        }
        if let Some(hours) = self.last_hours {
            cutoff = cutoff
                .checked_sub_signed(Duration::hours(i64::from(hours)))
                .ok_or(WindowOutOfRange)?;
        }
        if let Some(minutes) = self.last_minutes {
            cutoff = cutoff
                .checked_sub_signed(Duration::minutes(i64::from(minutes)))
                .ok_or(WindowOutOfRange)?;
        }

        Ok(Some(cutoff))
    }
}
