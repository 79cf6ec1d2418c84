//! Advisory Strategies
//!
//! Investor profiling and the scoring engine that turns a profile into an
//! allocation.

mod engine;
mod profile;

pub use engine::{RecommendationEngine, PROFILE_MATCH_BONUS};
pub use profile::{
    evaluate_profile, AnswerOption, Question, Questionnaire, PRIOR_EXPERIENCE, QUESTIONS,
    RISK_TOLERANCE, TIME_HORIZON,
};
