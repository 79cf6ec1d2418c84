//! Recommendation Explanation
//!
//! Plain-text rendering of an allocation for the investor.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::knowledge::KnowledgeBase;
use crate::model::{Allocation, MarketConditions, RiskProfile};

/// Render the allocation with each instrument's return and risk, followed by
/// every market condition the caller passed in (known or not).
pub fn explain(
    knowledge: &KnowledgeBase,
    allocation: &Allocation,
    profile: RiskProfile,
    conditions: &MarketConditions,
) -> String {
    let mut s = format!("Recommendation for {profile} profile:\n\n");
    s.push_str("Recommended distribution:\n");

    for (name, amount) in allocation.iter() {
        s.push_str(&format!("- {name}: ${}\n", format_money(amount)));
        if let Some(instrument) = knowledge.instrument(name) {
            s.push_str(&format!("  Expected return: {}%\n", format_percent(instrument.expected_return)));
            s.push_str(&format!("  Risk level: {}%\n", format_percent(instrument.risk)));
        }
        s.push('\n');
    }

    if !conditions.is_empty() {
        s.push_str("\nMarket factors considered:\n");
        for condition in conditions.iter() {
            s.push_str(&format!("- {condition}\n"));
        }
    }

    s
}

/// Two decimals with thousands separators: `1234567.891` -> `1,234,567.89`
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Ratio as a percentage with one decimal: `0.125` -> `12.5`
pub fn format_percent(ratio: Decimal) -> String {
    let percent = (ratio * dec!(100)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.1}")
}
