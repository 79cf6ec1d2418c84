//! # invest-advisor
//!
//! Rule-based investment advisor: profiles an investor from a short
//! questionnaire and splits an investment across a fixed instrument catalog,
//! adjusted for the current market conditions.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────────────────────┐   ┌─────────────┐
//! │ Questionnaire│──▶│ RecommendationEngine                     │──▶│ Allocation  │
//! │ (1-3 scores) │   │  1. eligibility (horizon, profile + 1)   │   │ + explain() │
//! └──────────────┘   │  2. base score 1.0                       │   └─────────────┘
//!        │           │  3. x1.2 on exact profile match          │
//!        ▼           │  4. x(1 + delta) per market condition    │
//!   RiskProfile ────▶│  5. normalize to the invested amount     │
//!                    └──────────────────────────────────────────┘
//!                                       ▲
//!                               KnowledgeBase (read-only)
//! ```
//!
//! ## Example: $100,000 Conservative, 5 years, no market flags
//!
//! ```text
//! bonds_governmental  ████████████  $37,500 (1.2 / 3.2)
//! blue_chip_stocks    ██████████    $31,250 (1.0 / 3.2)
//! mixed_funds         ██████████    $31,250 (1.0 / 3.2)
//! ```

pub mod error;
pub mod explain;
pub mod knowledge;
pub mod model;
pub mod strategy;

pub use error::{AdvisorError, Result};
pub use knowledge::{DecisionNetwork, KnowledgeBase};
pub use model::{
    AdvisoryRequest, Allocation, Answers, Instrument, MarketConditions, Recommendation,
    RiskProfile,
};
pub use strategy::{evaluate_profile, Questionnaire, RecommendationEngine};
