//! Investor Profiling
//!
//! Maps questionnaire answers onto a risk tier.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::model::{Answers, RiskProfile};

pub const RISK_TOLERANCE: &str = "risk_tolerance";
pub const TIME_HORIZON: &str = "time_horizon";
pub const PRIOR_EXPERIENCE: &str = "prior_experience";

/// Evaluate the investor's risk profile from questionnaire answers.
///
/// Takes the unweighted mean of all answers: below 2 is conservative, below 3
/// moderate, anything else aggressive. Out-of-range answers are averaged as
/// given, so a single large value can push the result to aggressive.
pub fn evaluate_profile(answers: &Answers) -> Result<RiskProfile> {
    if answers.is_empty() {
        return Err(AdvisorError::InvalidInput(
            "questionnaire has no answers".into(),
        ));
    }

    let sum: i64 = answers.values().map(|&v| i64::from(v)).sum();
    let count = i64::try_from(answers.len())
        .map_err(|_| AdvisorError::InvalidInput("questionnaire is too large".into()))?;

    let profile = classify(sum, count);
    tracing::debug!(answers = count, sum, %profile, "Evaluated risk profile");
    Ok(profile)
}

// mean < 2  <=>  sum < 2n, compared exactly in integers
const fn classify(sum: i64, count: i64) -> RiskProfile {
    if sum < 2 * count {
        RiskProfile::Conservative
    } else if sum < 3 * count {
        RiskProfile::Moderate
    } else {
        RiskProfile::Aggressive
    }
}

/// The standard three-question form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub risk_tolerance: i32,
    pub time_horizon: i32,
    pub prior_experience: i32,
}

impl Questionnaire {
    pub const fn new(risk_tolerance: i32, time_horizon: i32, prior_experience: i32) -> Self {
        Self {
            risk_tolerance,
            time_horizon,
            prior_experience,
        }
    }

    /// Answers keyed by question
    pub fn answers(&self) -> Answers {
        [
            (RISK_TOLERANCE, self.risk_tolerance),
            (TIME_HORIZON, self.time_horizon),
            (PRIOR_EXPERIENCE, self.prior_experience),
        ]
        .into_iter()
        .map(|(key, score)| (key.to_string(), score))
        .collect()
    }
}

/// One selectable answer
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AnswerOption {
    pub label: &'static str,
    pub score: i32,
}

/// A question as shown to the investor
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

const fn option(label: &'static str, score: i32) -> AnswerOption {
    AnswerOption { label, score }
}

pub const QUESTIONS: [Question; 3] = [
    Question {
        key: RISK_TOLERANCE,
        prompt: "Risk tolerance",
        options: &[
            option("Conservative", 1),
            option("Moderate", 2),
            option("Aggressive", 3),
        ],
    },
    Question {
        key: TIME_HORIZON,
        prompt: "Time horizon",
        options: &[
            option("Short term (1-2 years)", 1),
            option("Medium term (3-5 years)", 2),
            option("Long term (>5 years)", 3),
        ],
    },
    Question {
        key: PRIOR_EXPERIENCE,
        prompt: "Investment experience",
        options: &[
            option("Beginner", 1),
            option("Intermediate", 2),
            option("Expert", 3),
        ],
    },
];
