use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Five ordered risk bands, most conservative first.
///
/// Serialized as its integer value (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RiskLevel {
    VeryConservative = 1,
    Conservative = 2,
    Moderate = 3,
    Growth = 4,
    Aggressive = 5,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::VeryConservative,
        RiskLevel::Conservative,
        RiskLevel::Moderate,
        RiskLevel::Growth,
        RiskLevel::Aggressive,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get((value as usize).checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::VeryConservative => "Very Conservative",
            RiskLevel::Conservative => "Conservative",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Growth => "Growth",
            RiskLevel::Aggressive => "Aggressive",
        }
    }

    /// Inclusive score range covered by this band
    pub fn score_range(self) -> (u8, u8) {
        match self {
            RiskLevel::VeryConservative => (0, 19),
            RiskLevel::Conservative => (20, 39),
            RiskLevel::Moderate => (40, 59),
            RiskLevel::Growth => (60, 79),
            RiskLevel::Aggressive => (80, 100),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskLevel::VeryConservative => "Capital preservation comes first",
            RiskLevel::Conservative => "Some stability with modest growth",
            RiskLevel::Moderate => "Balanced risk and return",
            RiskLevel::Growth => "Accepts volatility for higher returns",
            RiskLevel::Aggressive => "Comfortable with significant volatility",
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::VeryConservative => &[
                "Prefers stable, predictable returns",
                "Suited to government bonds and fixed deposits",
                "Lower potential returns with minimal risk of loss",
            ],
            RiskLevel::Conservative => &[
                "Suited to conservative mutual funds and bonds",
                "Moderate returns with low risk tolerance",
            ],
            RiskLevel::Moderate => &[
                "Suited to diversified portfolios and balanced funds",
                "Good growth potential with manageable risk",
            ],
            RiskLevel::Growth => &[
                "Suited to growth stocks and equity funds",
                "High growth potential but more volatile",
            ],
            RiskLevel::Aggressive => &[
                "Suited to speculative investments and early-stage ventures",
                "Highest growth potential with substantial risk",
            ],
        }
    }

    pub fn info(self) -> RiskLevelInfo {
        let (min_score, max_score) = self.score_range();
        RiskLevelInfo {
            level: self,
            label: self.label(),
            description: self.description(),
            recommendations: self.recommendations(),
            min_score,
            max_score,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        RiskLevel::from_value(value).ok_or_else(|| {
            serde::de::Error::custom(format!("risk level must be 1-5, got {}", value))
        })
    }
}

/// Presentation details for a risk band
#[derive(Debug, Clone, Serialize)]
pub struct RiskLevelInfo {
    pub level: RiskLevel,
    pub label: &'static str,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
    pub min_score: u8,
    pub max_score: u8,
}

/// Bucket a 0-100 score into its band. Out-of-range scores are clamped first.
pub fn compute_risk_level(risk_score: i64) -> RiskLevel {
    match risk_score.clamp(0, 100) {
        0..=19 => RiskLevel::VeryConservative,
        20..=39 => RiskLevel::Conservative,
        40..=59 => RiskLevel::Moderate,
        60..=79 => RiskLevel::Growth,
        _ => RiskLevel::Aggressive,
    }
}
