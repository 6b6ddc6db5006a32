use serde::{Deserialize, Serialize};

/// Ordinal risk classification shared by every scoring variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    /// Committee ordering: most severe first.
    pub const fn descending() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Threshold schemes. They are deliberately separate: a product score of 20 is
/// CRITICAL on the likelihood-impact grid but LOW on the percentage scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierScheme {
    /// 0-100 normalised scores; boundaries belong to the lower tier.
    Percentage,
    /// Likelihood x impact products on a 1-25 grid.
    LikelihoodImpact,
}

impl TierScheme {
    pub const fn classify(self, score: u32) -> RiskTier {
        match self {
            Self::Percentage => match score {
                0..=25 => RiskTier::Low,
                26..=50 => RiskTier::Medium,
                51..=75 => RiskTier::High,
                _ => RiskTier::Critical,
            },
            Self::LikelihoodImpact => match score {
                0..=5 => RiskTier::Low,
                6..=11 => RiskTier::Medium,
                12..=19 => RiskTier::High,
                _ => RiskTier::Critical,
            },
        }
    }
}

/// Count of results falling in one tier, in committee order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub count: usize,
}

pub(crate) fn tier_distribution<I>(tiers: I) -> Vec<TierCount>
where
    I: IntoIterator<Item = RiskTier> + Clone,
{
    RiskTier::descending()
        .into_iter()
        .map(|tier| TierCount {
            tier,
            tier_label: tier.label(),
            count: tiers.clone().into_iter().filter(|t| *t == tier).count(),
        })
        .collect()
}
