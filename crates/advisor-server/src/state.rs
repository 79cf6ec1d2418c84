//! Application State

use std::sync::Arc;

use invest_advisor::{KnowledgeBase, RecommendationEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Engine over the read-only knowledge base
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self {
            engine: Arc::new(RecommendationEngine::new(Arc::new(knowledge))),
        }
    }
}
