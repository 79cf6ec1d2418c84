//! Recommendation Engine
//!
//! Filters the catalog by horizon and profile, scores what remains and
//! splits the investment proportionally to the scores.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{AdvisorError, Result};
use crate::explain;
use crate::knowledge::KnowledgeBase;
use crate::model::{AdvisoryRequest, Allocation, Instrument, MarketConditions, Recommendation, RiskProfile};
use crate::strategy::profile::evaluate_profile;

/// Multiplier for instruments aimed at exactly the investor's tier
pub const PROFILE_MATCH_BONUS: Decimal = dec!(1.2);

/// Starting score of every eligible instrument
const BASE_SCORE: Decimal = Decimal::ONE;

/// Decimal places kept on each share before the remainder is assigned
const SHARE_SCALE: u32 = 10;

/// Scores instruments against a shared knowledge base
#[derive(Clone, Debug)]
pub struct RecommendationEngine {
    knowledge: Arc<KnowledgeBase>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Arc::new(KnowledgeBase::standard()))
    }
}

impl RecommendationEngine {
    pub const fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// An instrument qualifies when the horizon covers its minimum holding
    /// period and it is aimed at no more than one tier above the investor.
    pub const fn is_eligible(instrument: &Instrument, profile: RiskProfile, horizon_years: u32) -> bool {
        instrument.min_horizon_years <= horizon_years
            && instrument.recommended_profile.rank() <= profile.rank() + 1
    }

    /// Unnormalized attractiveness of an instrument for this request.
    ///
    /// Fails with `Config` when the catalog's deltas compound past the
    /// `Decimal` range.
    pub fn score(
        &self,
        instrument: &Instrument,
        profile: RiskProfile,
        conditions: &MarketConditions,
    ) -> Result<Decimal> {
        let mut score = BASE_SCORE;

        if instrument.recommended_profile == profile {
            score *= PROFILE_MATCH_BONUS;
        }

        for condition in conditions.iter() {
            let Some(rule) = self.knowledge.market_rule(condition) else {
                tracing::debug!(condition, "Ignoring unknown market condition");
                continue;
            };
            let delta = rule.get(&instrument.name).copied().unwrap_or(Decimal::ZERO);
            score = score.checked_mul(Decimal::ONE + delta).ok_or_else(|| {
                AdvisorError::Config(format!(
                    "score of '{}' overflows under the active market rules",
                    instrument.name
                ))
            })?;
        }

        Ok(score)
    }

    /// Split `amount` across the eligible instruments.
    ///
    /// Entries follow catalog order and only eligible instruments appear.
    /// Each share is `score / total * amount`, truncated to `SHARE_SCALE`
    /// places and capped at what is left; the last entry takes the remainder.
    /// The amounts add up to exactly `amount`, none is negative, and any
    /// `Decimal` amount is accepted without overflow.
    pub fn recommend(
        &self,
        profile: RiskProfile,
        amount: Decimal,
        horizon_years: u32,
        conditions: &MarketConditions,
    ) -> Result<Allocation> {
        if amount <= Decimal::ZERO {
            return Err(AdvisorError::InvalidInput(format!(
                "amount must be positive, got {amount}"
            )));
        }

        let scored = self
            .knowledge
            .instruments()
            .iter()
            .filter(|i| Self::is_eligible(i, profile, horizon_years))
            .map(|i| self.score(i, profile, conditions).map(|score| (i, score)))
            .collect::<Result<Vec<(&Instrument, Decimal)>>>()?;

        if scored.is_empty() {
            return Err(AdvisorError::NoEligibleInstruments {
                profile,
                horizon_years,
            });
        }

        let total = scored
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, score)| acc.checked_add(*score))
            .ok_or_else(|| AdvisorError::Config("total score overflows".into()))?;
        if total <= Decimal::ZERO {
            return Err(AdvisorError::Config(
                "market rules reduce every eligible score to zero".into(),
            ));
        }

        let mut allocation = Allocation::new();
        let mut remaining = amount;
        let last = scored.len() - 1;

        for (idx, (instrument, score)) in scored.iter().enumerate() {
            let share = if idx == last {
                remaining
            } else {
                // weight <= 1, so the product stays within amount
                (*score / total)
                    .checked_mul(amount)
                    .ok_or_else(|| {
                        AdvisorError::InvalidInput(format!("amount {amount} is too large"))
                    })?
                    .round_dp_with_strategy(SHARE_SCALE, RoundingStrategy::ToZero)
                    .min(remaining)
            };
            tracing::debug!(
                instrument = %instrument.name,
                score = %score,
                amount = %share,
                "Scored instrument"
            );
            allocation.push(instrument.name.clone(), share);
            remaining -= share;
        }

        Ok(allocation)
    }

    /// Render an allocation as text
    pub fn explain(
        &self,
        allocation: &Allocation,
        profile: RiskProfile,
        conditions: &MarketConditions,
    ) -> String {
        explain::explain(&self.knowledge, allocation, profile, conditions)
    }

    /// Profile the investor, allocate and explain in one call
    pub fn advise(&self, request: &AdvisoryRequest) -> Result<Recommendation> {
        let profile = evaluate_profile(&request.answers)?;
        let allocation = self.recommend(
            profile,
            request.amount,
            request.horizon_years,
            &request.market_conditions,
        )?;
        let explanation = self.explain(&allocation, profile, &request.market_conditions);

        tracing::info!(
            %profile,
            amount = %request.amount,
            horizon_years = request.horizon_years,
            conditions = request.market_conditions.len(),
            instruments = allocation.len(),
            "Generated recommendation"
        );

        Ok(Recommendation {
            profile,
            allocation,
            explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{
        BLUE_CHIP_STOCKS, BONDS_GOVERNMENTAL, ECONOMIC_GROWTH, HIGH_INFLATION, MIXED_FUNDS,
        REAL_ESTATE, RECESSION, STARTUPS,
    };
    use crate::strategy::Questionnaire;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::default()
    }

    fn conditions(names: &[&str]) -> MarketConditions {
        names.iter().copied().collect()
    }

    fn assert_sums_to(allocation: &Allocation, amount: Decimal) {
        let diff = (allocation.total() - amount).abs();
        assert!(diff <= amount * dec!(0.000001), "sum off by {diff}");
    }

    #[test]
    fn test_conservative_five_years() {
        let allocation = engine()
            .recommend(RiskProfile::Conservative, dec!(100000), 5, &MarketConditions::new())
            .unwrap();

        let names: Vec<_> = allocation.names().collect();
        assert_eq!(names, vec![BONDS_GOVERNMENTAL, BLUE_CHIP_STOCKS, MIXED_FUNDS]);
        assert_eq!(allocation.total(), dec!(100000));

        // 1.2 : 1 : 1
        let bonds = allocation.get(BONDS_GOVERNMENTAL).unwrap();
        let blue_chip = allocation.get(BLUE_CHIP_STOCKS).unwrap();
        assert!(bonds > blue_chip);
        assert_eq!(bonds.round_dp(2), dec!(37500.00));
        assert_eq!(blue_chip.round_dp(2), dec!(31250.00));
    }

    #[test]
    fn test_largest_amount_is_split_without_overflow() {
        let allocation = engine()
            .recommend(RiskProfile::Conservative, Decimal::MAX, 5, &MarketConditions::new())
            .unwrap();

        assert_eq!(allocation.len(), 3);
        assert_eq!(allocation.total(), Decimal::MAX);
        for (_, amount) in allocation.iter() {
            assert!(amount > Decimal::ZERO);
        }
        assert!(allocation.get(BONDS_GOVERNMENTAL).unwrap() > allocation.get(MIXED_FUNDS).unwrap());
    }

    #[test]
    fn test_tiny_amount_keeps_exact_sum() {
        let amount = Decimal::new(1, 28);
        let allocation = engine()
            .recommend(RiskProfile::Moderate, amount, 10, &conditions(&[RECESSION]))
            .unwrap();
        assert_eq!(allocation.total(), amount);
        for (_, share) in allocation.iter() {
            assert!(share >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_compounding_deltas_fail_instead_of_overflowing() {
        let instrument = Instrument::new("a", dec!(0.5), dec!(0.1), dec!(0.5), 1, RiskProfile::Moderate);
        let rules = (0..100)
            .map(|i| (format!("boom_{i}"), [("a".to_string(), Decimal::ONE)].into_iter().collect()))
            .collect();
        let knowledge = KnowledgeBase::new(vec![instrument.clone()], rules).unwrap();
        let engine = RecommendationEngine::new(Arc::new(knowledge));
        let all: MarketConditions = (0..100).map(|i| format!("boom_{i}")).collect();

        assert!(matches!(
            engine.score(&instrument, RiskProfile::Moderate, &all),
            Err(AdvisorError::Config(_))
        ));
        assert!(matches!(
            engine.recommend(RiskProfile::Moderate, dec!(1000), 5, &all),
            Err(AdvisorError::Config(_))
        ));

        let few: MarketConditions = (0..3).map(|i| format!("boom_{i}")).collect();
        assert_eq!(engine.score(&instrument, RiskProfile::Moderate, &few).unwrap(), dec!(9.6));
    }

    #[test]
    fn test_recession_shifts_toward_bonds() {
        let engine = engine();
        let calm = engine
            .recommend(RiskProfile::Moderate, dec!(50000), 10, &MarketConditions::new())
            .unwrap();
        let recession = engine
            .recommend(RiskProfile::Moderate, dec!(50000), 10, &conditions(&[RECESSION]))
            .unwrap();

        assert_eq!(calm.len(), 5);
        assert_eq!(recession.len(), 5);

        let share = |a: &Allocation, name| a.share(name).unwrap();
        assert!(share(&recession, BONDS_GOVERNMENTAL) > share(&calm, BONDS_GOVERNMENTAL));
        assert!(share(&recession, STARTUPS) < share(&calm, STARTUPS));
        assert!(share(&recession, BLUE_CHIP_STOCKS) < share(&calm, BLUE_CHIP_STOCKS));
        assert_sums_to(&recession, dec!(50000));
    }

    #[test]
    fn test_only_eligible_instruments_are_allocated() {
        let engine = engine();
        let all = conditions(&[HIGH_INFLATION, RECESSION, ECONOMIC_GROWTH]);

        for profile in RiskProfile::ALL {
            for horizon in 1..=30 {
                let allocation = engine.recommend(profile, dec!(12345.67), horizon, &all).unwrap();
                assert_sums_to(&allocation, dec!(12345.67));
                for name in allocation.names() {
                    let instrument = engine.knowledge().instrument(name).unwrap();
                    assert!(instrument.min_horizon_years <= horizon);
                    assert!(instrument.recommended_profile.rank() <= profile.rank() + 1);
                }
                for (_, amount) in allocation.iter() {
                    assert!(amount >= Decimal::ZERO);
                }
            }
        }
    }

    #[test]
    fn test_one_tier_above_is_admitted() {
        let engine = engine();
        let conservative = engine
            .recommend(RiskProfile::Conservative, dec!(1000), 30, &MarketConditions::new())
            .unwrap();
        assert!(conservative.contains(REAL_ESTATE));
        assert!(!conservative.contains(STARTUPS));

        let moderate = engine
            .recommend(RiskProfile::Moderate, dec!(1000), 30, &MarketConditions::new())
            .unwrap();
        assert!(moderate.contains(STARTUPS));
    }

    #[test]
    fn test_zero_horizon_has_no_eligible_instruments() {
        let err = engine()
            .recommend(RiskProfile::Aggressive, dec!(1000), 0, &MarketConditions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::NoEligibleInstruments {
                profile: RiskProfile::Aggressive,
                horizon_years: 0
            }
        ));
    }

    #[test]
    fn test_non_positive_amount_is_invalid() {
        let engine = engine();
        for amount in [Decimal::ZERO, dec!(-500)] {
            assert!(matches!(
                engine.recommend(RiskProfile::Moderate, amount, 5, &MarketConditions::new()),
                Err(AdvisorError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_unknown_conditions_are_ignored() {
        let engine = engine();
        let plain = engine
            .recommend(RiskProfile::Moderate, dec!(20000), 8, &MarketConditions::new())
            .unwrap();
        let with_unknown = engine
            .recommend(RiskProfile::Moderate, dec!(20000), 8, &conditions(&["alien_invasion"]))
            .unwrap();
        assert_eq!(plain, with_unknown);
    }

    #[test]
    fn test_duplicate_conditions_apply_once() {
        let engine = engine();
        let once = engine
            .recommend(RiskProfile::Aggressive, dec!(20000), 8, &conditions(&[RECESSION]))
            .unwrap();
        let twice = engine
            .recommend(RiskProfile::Aggressive, dec!(20000), 8, &conditions(&[RECESSION, RECESSION]))
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_score_combines_bonus_and_deltas() {
        let engine = engine();
        let bonds = engine.knowledge().instrument(BONDS_GOVERNMENTAL).unwrap();

        assert_eq!(
            engine.score(bonds, RiskProfile::Conservative, &MarketConditions::new()).unwrap(),
            dec!(1.2)
        );
        // 1.2 * 1.3 * 0.8
        assert_eq!(
            engine
                .score(bonds, RiskProfile::Conservative, &conditions(&[RECESSION, HIGH_INFLATION]))
                .unwrap(),
            dec!(1.248)
        );
        assert_eq!(
            engine.score(bonds, RiskProfile::Moderate, &conditions(&[ECONOMIC_GROWTH])).unwrap(),
            dec!(0.9)
        );
    }

    #[test]
    fn test_condition_order_does_not_matter() {
        let engine = engine();
        let a = engine
            .recommend(RiskProfile::Moderate, dec!(75000), 12, &conditions(&[RECESSION, ECONOMIC_GROWTH]))
            .unwrap();
        let b = engine
            .recommend(RiskProfile::Moderate, dec!(75000), 12, &conditions(&[ECONOMIC_GROWTH, RECESSION]))
            .unwrap();
        for (name, amount) in a.iter() {
            let other = b.get(name).unwrap();
            assert!((amount - other).abs() < dec!(0.000001));
        }
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let engine = engine();
        let request = conditions(&[HIGH_INFLATION]);
        let first = engine.recommend(RiskProfile::Moderate, dec!(33333), 6, &request).unwrap();
        let second = engine.recommend(RiskProfile::Moderate, dec!(33333), 6, &request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_advise_runs_full_pipeline() {
        let request = AdvisoryRequest {
            answers: Questionnaire::new(2, 2, 3).answers(),
            amount: dec!(100000),
            horizon_years: 5,
            market_conditions: conditions(&[ECONOMIC_GROWTH]),
        };

        let recommendation = engine().advise(&request).unwrap();
        assert_eq!(recommendation.profile, RiskProfile::Moderate);
        assert_eq!(recommendation.allocation.total(), dec!(100000));
        assert!(recommendation.explanation.starts_with("Recommendation for Moderate profile:"));
        assert!(recommendation.explanation.contains("- economic_growth"));
    }

    #[test]
    fn test_advise_rejects_empty_questionnaire() {
        let request = AdvisoryRequest {
            answers: Default::default(),
            amount: dec!(1000),
            horizon_years: 5,
            market_conditions: MarketConditions::new(),
        };
        assert!(matches!(
            engine().advise(&request),
            Err(AdvisorError::InvalidInput(_))
        ));
    }
}
