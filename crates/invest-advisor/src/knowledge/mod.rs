//! Knowledge Base
//!
//! Instrument catalog and market-condition rules. Built once at startup and
//! shared read-only; nothing mutates it afterwards.

mod catalog;
mod network;

pub use catalog::{
    BLUE_CHIP_STOCKS, BONDS_GOVERNMENTAL, ECONOMIC_GROWTH, HIGH_INFLATION, MIXED_FUNDS,
    REAL_ESTATE, RECESSION, STARTUPS,
};
pub use network::{DecisionNetwork, Edge, Node, NodeKind};

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::model::Instrument;

/// Per-instrument multiplicative deltas for one market condition
pub type MarketRule = BTreeMap<String, Decimal>;

/// Largest delta a rule may carry: one condition can at most double a score
pub const MAX_DELTA: Decimal = Decimal::ONE;

/// Static catalog consulted by the recommendation engine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeBase {
    instruments: Vec<Instrument>,

    #[serde(default)]
    market_rules: BTreeMap<String, MarketRule>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::standard()
    }
}

impl KnowledgeBase {
    /// Build a validated catalog
    pub fn new(
        instruments: Vec<Instrument>,
        market_rules: BTreeMap<String, MarketRule>,
    ) -> Result<Self> {
        let kb = Self {
            instruments,
            market_rules,
        };
        kb.validate()?;
        Ok(kb)
    }

    /// The built-in catalog: five instruments, three market conditions
    pub fn standard() -> Self {
        Self {
            instruments: catalog::standard_instruments(),
            market_rules: catalog::standard_market_rules(),
        }
    }

    /// Load a catalog from a JSON document:
    /// `{"instruments": [...], "market_rules": {"condition": {"instrument": delta}}}`
    pub fn from_json(json: &str) -> Result<Self> {
        let kb: Self = serde_json::from_str(json)?;
        kb.validate()?;
        tracing::debug!(
            instruments = kb.instruments.len(),
            market_rules = kb.market_rules.len(),
            "Loaded custom catalog"
        );
        Ok(kb)
    }

    /// Instruments in catalog order
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn instrument(&self, name: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.name == name)
    }

    /// Condition name -> instrument name -> delta
    pub const fn market_rules(&self) -> &BTreeMap<String, MarketRule> {
        &self.market_rules
    }

    pub fn market_rule(&self, condition: &str) -> Option<&MarketRule> {
        self.market_rules.get(condition)
    }

    /// Known market condition identifiers
    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.market_rules.keys().map(String::as_str)
    }

    /// Graph linking profiles and conditions to the instruments they influence
    pub fn decision_network(&self) -> DecisionNetwork {
        DecisionNetwork::from_knowledge(self)
    }

    fn validate(&self) -> Result<()> {
        if self.instruments.is_empty() {
            return Err(AdvisorError::Config("catalog has no instruments".into()));
        }

        let unit = Decimal::ZERO..=Decimal::ONE;
        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if instrument.name.trim().is_empty() {
                return Err(AdvisorError::Config("instrument with empty name".into()));
            }
            if !seen.insert(instrument.name.as_str()) {
                return Err(AdvisorError::Config(format!(
                    "duplicate instrument '{}'",
                    instrument.name
                )));
            }
            if !unit.contains(&instrument.risk) {
                return Err(AdvisorError::Config(format!(
                    "risk of '{}' must be within [0, 1], got {}",
                    instrument.name, instrument.risk
                )));
            }
            if !unit.contains(&instrument.liquidity) {
                return Err(AdvisorError::Config(format!(
                    "liquidity of '{}' must be within [0, 1], got {}",
                    instrument.name, instrument.liquidity
                )));
            }
        }

        for (condition, rule) in &self.market_rules {
            for (name, delta) in rule {
                if !seen.contains(name.as_str()) {
                    return Err(AdvisorError::Config(format!(
                        "rule '{condition}' refers to unknown instrument '{name}'"
                    )));
                }
                // 1 + delta must stay positive or scores could vanish or flip sign
                if *delta <= Decimal::NEGATIVE_ONE || *delta > MAX_DELTA {
                    return Err(AdvisorError::Config(format!(
                        "rule '{condition}' has delta {delta} for '{name}', must be within (-1, {MAX_DELTA}]"
                    )));
                }
            }
        }

        Ok(())
    }
}
