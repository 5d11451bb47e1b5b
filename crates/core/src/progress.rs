use std::fmt;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    #[error("daily target must be at least 1")]
    ZeroTarget,
}

/// Fraction of the daily target reached, rounded to one decimal place and
/// clamped to 100.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Achievement(f64);

impl Achievement {
    pub fn new(count: u64, target: u32) -> Result<Self, ProgressError> {
        if target == 0 {
            return Err(ProgressError::ZeroTarget);
        }

        let raw = (count as f64 / target as f64) * 100.0;
        let rounded = (raw * 10.0).round() / 10.0;
        Ok(Self(rounded.min(100.0)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The capped value renders as a bare `100`; everything below keeps
        // one decimal place.
        if self.0 >= 100.0 {
            write!(f, "100")
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

/// Qualitative daily-report status, selected by threshold on the achievement
/// percentage. Variants are declared in ascending order so ordering follows
/// achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportStatus {
    MoreEffortNeeded,
    GettingStarted,
    Halfway,
    GreatProgress,
    GoalAchieved,
}

impl ReportStatus {
    pub fn for_achievement(achievement: Achievement) -> Self {
        let percentage = achievement.value();
        if percentage >= 100.0 {
            Self::GoalAchieved
        } else if percentage >= 75.0 {
            Self::GreatProgress
        } else if percentage >= 50.0 {
            Self::Halfway
        } else if percentage >= 25.0 {
            Self::GettingStarted
        } else {
            Self::MoreEffortNeeded
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::GoalAchieved => ":star2:",
            Self::GreatProgress => ":star:",
            Self::Halfway => ":white_check_mark:",
            Self::GettingStarted => ":hourglass:",
            Self::MoreEffortNeeded => ":warning:",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::GoalAchieved => "Goal achieved! Excellent work!",
            Self::GreatProgress => "Great progress today!",
            Self::Halfway => "Good effort, halfway there!",
            Self::GettingStarted => "Getting started, keep going!",
            Self::MoreEffortNeeded => "More effort needed tomorrow.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Achievement, ProgressError, ReportStatus};

    #[test]
    fn achievement_rounds_to_one_decimal() {
        let achievement = Achievement::new(1, 60).expect("valid target");
        assert_eq!(achievement.to_string(), "1.7");

        let achievement = Achievement::new(45, 60).expect("valid target");
        assert_eq!(achievement.to_string(), "75.0");
    }

    #[test]
    fn achievement_is_clamped_when_count_exceeds_target() {
        let achievement = Achievement::new(75, 60).expect("valid target");
        assert_eq!(achievement.value(), 100.0);
        assert_eq!(achievement.to_string(), "100");
    }

    #[test]
    fn exact_target_renders_as_bare_hundred() {
        let achievement = Achievement::new(60, 60).expect("valid target");
        assert_eq!(achievement.to_string(), "100");
    }

    #[test]
    fn zero_count_is_zero_percent() {
        let achievement = Achievement::new(0, 60).expect("valid target");
        assert_eq!(achievement.to_string(), "0.0");
    }

    #[test]
    fn zero_target_is_rejected() {
        assert_eq!(Achievement::new(10, 0), Err(ProgressError::ZeroTarget));
    }

    #[test]
    fn status_bands_match_thresholds() {
        let status = |count| {
            ReportStatus::for_achievement(Achievement::new(count, 100).expect("valid target"))
        };

        assert_eq!(status(0), ReportStatus::MoreEffortNeeded);
        assert_eq!(status(24), ReportStatus::MoreEffortNeeded);
        assert_eq!(status(25), ReportStatus::GettingStarted);
        assert_eq!(status(49), ReportStatus::GettingStarted);
        assert_eq!(status(50), ReportStatus::Halfway);
        assert_eq!(status(74), ReportStatus::Halfway);
        assert_eq!(status(75), ReportStatus::GreatProgress);
        assert_eq!(status(99), ReportStatus::GreatProgress);
        assert_eq!(status(100), ReportStatus::GoalAchieved);
        assert_eq!(status(140), ReportStatus::GoalAchieved);
    }

    #[test]
    fn status_is_monotone_in_achievement() {
        let mut previous = ReportStatus::MoreEffortNeeded;
        for count in 0..=150u64 {
            let status = ReportStatus::for_achievement(
                Achievement::new(count, 100).expect("valid target"),
            );
            assert!(status >= previous, "status regressed at count {count}");
            previous = status;
        }
    }
}
