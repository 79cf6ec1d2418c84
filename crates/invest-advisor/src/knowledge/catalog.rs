//! Standard Catalog
//!
//! The built-in instruments and market-condition rules.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{Instrument, RiskProfile};

pub const BONDS_GOVERNMENTAL: &str = "bonds_governmental";
pub const BLUE_CHIP_STOCKS: &str = "blue_chip_stocks";
pub const STARTUPS: &str = "startups";
pub const MIXED_FUNDS: &str = "mixed_funds";
pub const REAL_ESTATE: &str = "real_estate";

pub const HIGH_INFLATION: &str = "high_inflation";
pub const RECESSION: &str = "recession";
pub const ECONOMIC_GROWTH: &str = "economic_growth";

pub(super) fn standard_instruments() -> Vec<Instrument> {
    // (name, risk, expected_return, liquidity, min_horizon_years, profile)
    [
        (BONDS_GOVERNMENTAL, dec!(0.1), dec!(0.05), dec!(0.7), 1, RiskProfile::Conservative),
        (BLUE_CHIP_STOCKS, dec!(0.4), dec!(0.12), dec!(0.9), 3, RiskProfile::Moderate),
        (STARTUPS, dec!(0.8), dec!(0.25), dec!(0.3), 5, RiskProfile::Aggressive),
        (MIXED_FUNDS, dec!(0.5), dec!(0.15), dec!(0.6), 2, RiskProfile::Moderate),
        (REAL_ESTATE, dec!(0.6), dec!(0.18), dec!(0.2), 7, RiskProfile::Moderate),
    ]
    .into_iter()
    .map(|(name, risk, ret, liquidity, horizon, profile)| {
        Instrument::new(name, risk, ret, liquidity, horizon, profile)
    })
    .collect()
}

pub(super) fn standard_market_rules() -> BTreeMap<String, BTreeMap<String, Decimal>> {
    // Deltas per instrument, in catalog order:
    // bonds, blue chip, startups, mixed funds, real estate
    let table = [
        (HIGH_INFLATION, [dec!(-0.2), dec!(0.1), dec!(-0.1), dec!(0.0), dec!(0.3)]),
        (RECESSION, [dec!(0.3), dec!(-0.2), dec!(-0.4), dec!(-0.1), dec!(-0.2)]),
        (ECONOMIC_GROWTH, [dec!(-0.1), dec!(0.3), dec!(0.4), dec!(0.2), dec!(0.2)]),
    ];
    let instruments = [BONDS_GOVERNMENTAL, BLUE_CHIP_STOCKS, STARTUPS, MIXED_FUNDS, REAL_ESTATE];

    table
        .into_iter()
        .map(|(condition, deltas)| {
            let adjustments = instruments
                .iter()
                .zip(deltas)
                .map(|(name, delta)| ((*name).to_string(), delta))
                .collect();
            (condition.to_string(), adjustments)
        })
        .collect()
}
