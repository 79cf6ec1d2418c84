//! Domain Models
//!
//! Core data types for profiling investors and allocating capital.
//! Uses `rust_decimal` for all monetary values and ratios - never use f64 for money!

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::AdvisorError;

/// Investor risk tolerance tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub const CONSERVATIVE_RANK: u8 = 1;
    pub const MODERATE_RANK: u8 = 2;
    pub const AGGRESSIVE_RANK: u8 = 3;

    /// All tiers, lowest rank first
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Moderate, Self::Aggressive];

    /// Explicit tier rank used by the eligibility filter
    pub const fn rank(self) -> u8 {
        match self {
            Self::Conservative => Self::CONSERVATIVE_RANK,
            Self::Moderate => Self::MODERATE_RANK,
            Self::Aggressive => Self::AGGRESSIVE_RANK,
        }
    }

    /// Display name (e.g., "Conservative")
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Moderate => "Moderate",
            Self::Aggressive => "Aggressive",
        }
    }
}

impl PartialOrd for RiskProfile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RiskProfile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RiskProfile {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(AdvisorError::InvalidInput(format!(
                "unknown risk profile '{other}'"
            ))),
        }
    }
}

/// A financial instrument in the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Unique key (e.g., "bonds_governmental")
    pub name: String,

    /// Risk level in [0, 1]
    pub risk: Decimal,

    /// Expected annual return (0.05 = 5%)
    pub expected_return: Decimal,

    /// Liquidity in [0, 1]
    pub liquidity: Decimal,

    /// Minimum holding period in years
    pub min_horizon_years: u32,

    /// Investor tier this instrument is aimed at
    pub recommended_profile: RiskProfile,
}

impl Instrument {
    pub fn new(
        name: impl Into<String>,
        risk: Decimal,
        expected_return: Decimal,
        liquidity: Decimal,
        min_horizon_years: u32,
        recommended_profile: RiskProfile,
    ) -> Self {
        Self {
            name: name.into(),
            risk,
            expected_return,
            liquidity,
            min_horizon_years,
            recommended_profile,
        }
    }
}

/// Active market conditions for one request.
///
/// Keeps the caller's order and drops repeated identifiers, so every
/// condition is applied at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MarketConditions(Vec<String>);

impl MarketConditions {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a condition; returns false if it was already present
    pub fn insert(&mut self, condition: impl Into<String>) -> bool {
        let condition = condition.into();
        if self.contains(&condition) {
            return false;
        }
        self.0.push(condition);
        true
    }

    pub fn contains(&self, condition: &str) -> bool {
        self.0.iter().any(|c| c == condition)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MarketConditions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut conditions = Self::new();
        for condition in iter {
            conditions.insert(condition);
        }
        conditions
    }
}

impl From<Vec<String>> for MarketConditions {
    fn from(conditions: Vec<String>) -> Self {
        conditions.into_iter().collect()
    }
}

impl From<MarketConditions> for Vec<String> {
    fn from(conditions: MarketConditions) -> Self {
        conditions.0
    }
}

/// Recommended monetary distribution, in catalog order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    entries: Vec<(String, Decimal)>,
}

impl Allocation {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub(crate) fn push(&mut self, instrument: impl Into<String>, amount: Decimal) {
        self.entries.push((instrument.into(), amount));
    }

    /// Amount allocated to an instrument
    pub fn get(&self, instrument: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(name, _)| name == instrument)
            .map(|(_, amount)| *amount)
    }

    pub fn contains(&self, instrument: &str) -> bool {
        self.get(instrument).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all allocated amounts
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }

    /// Fraction of the total held by an instrument (0.25 = 25%)
    pub fn share(&self, instrument: &str) -> Option<Decimal> {
        let total = self.total();
        if total == Decimal::ZERO {
            return None;
        }
        self.get(instrument).map(|amount| amount / total)
    }
}

impl Serialize for Allocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, amount) in &self.entries {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

/// Questionnaire answers: question key -> score (1-3 expected, not enforced)
pub type Answers = BTreeMap<String, i32>;

/// Everything the presentation layer supplies for one recommendation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    /// Questionnaire answers
    pub answers: Answers,

    /// Amount to invest
    pub amount: Decimal,

    /// Investment horizon in whole years
    pub horizon_years: u32,

    /// Active market conditions
    #[serde(default)]
    pub market_conditions: MarketConditions,
}

/// Result of the full advisory pipeline
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    /// Profile derived from the questionnaire
    pub profile: RiskProfile,

    /// Per-instrument amounts
    pub allocation: Allocation,

    /// Human-readable rendering of the allocation
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profile_order_follows_rank() {
        assert!(RiskProfile::Conservative < RiskProfile::Moderate);
        assert!(RiskProfile::Moderate < RiskProfile::Aggressive);
        let ranks: Vec<_> = RiskProfile::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!("Moderate".parse::<RiskProfile>().unwrap(), RiskProfile::Moderate);
        assert_eq!(" aggressive ".parse::<RiskProfile>().unwrap(), RiskProfile::Aggressive);
        assert!("reckless".parse::<RiskProfile>().is_err());
    }

    #[test]
    fn test_profile_serde_lowercase() {
        let json = serde_json::to_string(&RiskProfile::Conservative).unwrap();
        assert_eq!(json, "\"conservative\"");
        let parsed: RiskProfile = serde_json::from_str("\"aggressive\"").unwrap();
        assert_eq!(parsed, RiskProfile::Aggressive);
    }

    #[test]
    fn test_market_conditions_dedup_keeps_order() {
        let conditions: MarketConditions =
            ["recession", "high_inflation", "recession"].into_iter().collect();
        assert_eq!(conditions.len(), 2);
        assert_eq!(
            conditions.iter().collect::<Vec<_>>(),
            vec!["recession", "high_inflation"]
        );

        let parsed: MarketConditions =
            serde_json::from_str(r#"["economic_growth","economic_growth"]"#).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_allocation_share_and_serialization() {
        let mut allocation = Allocation::new();
        allocation.push("bonds_governmental", dec!(750));
        allocation.push("mixed_funds", dec!(250));

        assert_eq!(allocation.total(), dec!(1000));
        assert_eq!(allocation.share("mixed_funds"), Some(dec!(0.25)));
        assert_eq!(allocation.get("startups"), None);

        let json = serde_json::to_string(&allocation).unwrap();
        assert_eq!(json, r#"{"bonds_governmental":"750","mixed_funds":"250"}"#);
    }
}
