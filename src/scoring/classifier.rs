use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MODERATE_FIT_THRESHOLD, DEFAULT_STRONG_FIT_THRESHOLD};

/// Recommendation tier derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    StrongFit,
    ModerateFit,
    PoorFit,
}

impl Tier {
    /// Human-readable recommendation.
    pub fn label(self) -> &'static str {
        match self {
            Tier::StrongFit => "Strong Fit",
            Tier::ModerateFit => "Moderate Fit",
            Tier::PoorFit => "Poor Fit",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive lower bounds of the two upper tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub strong: f64,
    pub moderate: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            strong: DEFAULT_STRONG_FIT_THRESHOLD,
            moderate: DEFAULT_MODERATE_FIT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: TierThresholds,
}

impl Classifier {
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    /// Total over all inputs; a score equal to a bound lands in the higher tier.
    pub fn classify(&self, score: f64) -> Tier {
        if score >= self.thresholds.strong {
            Tier::StrongFit
        } else if score >= self.thresholds.moderate {
            Tier::ModerateFit
        } else {
            Tier::PoorFit
        }
    }
}
