use crate::evaluator::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SpeedRating {
    Beginner,
    Average,
    Intermediate,
    Advanced,
    Expert,
}

impl SpeedRating {
    pub fn from_wpm(wpm: u32) -> Self {
        match wpm {
            101.. => Self::Expert,
            81..=100 => Self::Advanced,
            61..=80 => Self::Intermediate,
            41..=60 => Self::Average,
            _ => Self::Beginner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AccuracyRating {
    #[strum(serialize = "Needs Improvement")]
    NeedsImprovement,
    Average,
    Good,
    Excellent,
    Perfect,
}

impl AccuracyRating {
    pub fn from_percent(accuracy: u32) -> Self {
        match accuracy {
            99.. => Self::Perfect,
            96..=98 => Self::Excellent,
            91..=95 => Self::Good,
            86..=90 => Self::Average,
            _ => Self::NeedsImprovement,
        }
    }
}

/// What the results screen shows for a finished attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestResults {
    pub metrics: Metrics,
    pub duration_secs: u32,
}

impl TestResults {
    pub fn new(metrics: Metrics, duration_secs: u32) -> Self {
        Self {
            metrics,
            duration_secs,
        }
    }

    pub fn speed_rating(&self) -> SpeedRating {
        SpeedRating::from_wpm(self.metrics.speed)
    }

    pub fn accuracy_rating(&self) -> AccuracyRating {
        AccuracyRating::from_percent(self.metrics.accuracy)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} wpm ({})   {}% acc ({})   {} errors   {}s",
            self.metrics.speed,
            self.speed_rating(),
            self.metrics.accuracy,
            self.accuracy_rating(),
            self.metrics.errors,
            self.duration_secs
        )
    }
}
