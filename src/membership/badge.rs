use crate::constants::BADGES_DIR;
use crate::error::{MembershipError, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Membership duration buckets, ordered from newest to longest-standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    New,
    OneMonth,
    TwoMonths,
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
    ThirtySixMonths,
    FortyEightMonths,
}

impl BadgeTier {
    pub const ALL: [BadgeTier; 8] = [
        BadgeTier::New,
        BadgeTier::OneMonth,
        BadgeTier::TwoMonths,
        BadgeTier::SixMonths,
        BadgeTier::TwelveMonths,
        BadgeTier::TwentyFourMonths,
        BadgeTier::ThirtySixMonths,
        BadgeTier::FortyEightMonths,
    ];

    /// Inclusive lower bound in months
    pub fn min_months(self) -> f64 {
        match self {
            BadgeTier::New => 0.0,
            BadgeTier::OneMonth => 1.0,
            BadgeTier::TwoMonths => 2.0,
            BadgeTier::SixMonths => 6.0,
            BadgeTier::TwelveMonths => 12.0,
            BadgeTier::TwentyFourMonths => 24.0,
            BadgeTier::ThirtySixMonths => 36.0,
            BadgeTier::FortyEightMonths => 48.0,
        }
    }

    /// Picks the highest tier whose lower bound is reached.
    pub fn from_months(months: f64) -> Result<Self> {
        if !months.is_finite() || months < 0.0 {
            return Err(MembershipError::InvalidInput(format!(
                "tenure must be a non-negative number of months, got {months}"
            )));
        }

        let tier = Self::ALL
            .iter()
            .rev()
            .find(|tier| months >= tier.min_months())
            .copied()
            .unwrap_or(BadgeTier::New);
        Ok(tier)
    }

    pub fn name(self) -> &'static str {
        match self {
            BadgeTier::New => "new",
            BadgeTier::OneMonth => "1_month",
            BadgeTier::TwoMonths => "2_months",
            BadgeTier::SixMonths => "6_months",
            BadgeTier::TwelveMonths => "12_months",
            BadgeTier::TwentyFourMonths => "24_months",
            BadgeTier::ThirtySixMonths => "36_months",
            BadgeTier::FortyEightMonths => "48_months",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.png", self.name())
    }

    pub fn image_path(self) -> PathBuf {
        let mut path: PathBuf = BADGES_DIR.iter().collect();
        path.push(self.file_name());
        path
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Badge asset for a member with `months` of paid tenure
pub fn get_membership_badge_image(months: f64) -> Result<PathBuf> {
    Ok(BadgeTier::from_months(months)?.image_path())
}
