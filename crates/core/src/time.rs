use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Clock used by services for timestamps and "today" checks.
///
/// Tests pin it with `Clock::Fixed` so session timestamps and date validation
/// stay deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Calendar date (UTC) of `now()`.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Moves a fixed clock forward. A system clock ignores the call.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// 2023-11-14T22:13:20Z, used by tests across the workspace.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_and_reports_today() {
        let mut clock = fixed_clock();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 11, 14).unwrap());
        clock.advance(Duration::hours(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
    }
}
