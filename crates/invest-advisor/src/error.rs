//! Error Types for the Investment Advisor

use thiserror::Error;

use crate::model::RiskProfile;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Request failed validation (empty questionnaire, non-positive amount)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The eligibility filter left nothing to allocate to
    #[error(
        "No eligible instruments for a {profile} profile over {horizon_years} year(s): \
         try a longer investment horizon or reconsider the risk profile"
    )]
    NoEligibleInstruments {
        profile: RiskProfile,
        horizon_years: u32,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// Stable machine-readable code for API responses
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NoEligibleInstruments { .. } => "NO_ELIGIBLE_INSTRUMENTS",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => format!("Please check your input: {msg}"),
            Self::NoEligibleInstruments { .. } => self.to_string(),
            Self::Config(_) | Self::Serialization(_) => {
                "The advisor is misconfigured. Please contact the operator.".into()
            }
        }
    }

    /// Whether the caller can fix the request and try again
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::NoEligibleInstruments { .. }
        )
    }
}
