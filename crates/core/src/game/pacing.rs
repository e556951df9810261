use std::time::Duration;

use serde::{Deserialize, Serialize};

/// UX pacing between an answer and the next prompt.
///
/// Purely cosmetic: the session records the answer immediately and only the
/// move to the next prompt waits for these delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    #[serde(with = "millis")]
    pub correct_advance: Duration,
    #[serde(with = "millis")]
    pub incorrect_advance: Duration,
    /// How long the "correct" flash/confetti stays up.
    #[serde(with = "millis")]
    pub feedback_clear: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            correct_advance: Duration::from_millis(1500),
            incorrect_advance: Duration::from_millis(800),
            feedback_clear: Duration::from_millis(1000),
        }
    }
}

impl Pacing {
    /// No delays at all; used by tests and by headless runs.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            correct_advance: Duration::ZERO,
            incorrect_advance: Duration::ZERO,
            feedback_clear: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn advance_delay(&self, is_correct: bool) -> Duration {
        if is_correct {
            self.correct_advance
        } else {
            self.incorrect_advance
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        s.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answers_wait_longer() {
        let pacing = Pacing::default();
        assert!(pacing.advance_delay(true) > pacing.advance_delay(false));
    }

    #[test]
    fn reads_millisecond_fields() {
        let pacing: Pacing = toml::from_str(
            "correct_advance = 10\nincorrect_advance = 5\nfeedback_clear = 3\n",
        )
        .unwrap();
        assert_eq!(pacing.correct_advance, Duration::from_millis(10));
        assert_eq!(pacing.feedback_clear, Duration::from_millis(3));
    }
}
