//! Server Configuration

use std::path::PathBuf;

use anyhow::Context;
use invest_advisor::KnowledgeBase;

/// Settings read from the environment (and `.env`)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address (`BIND_ADDR`)
    pub bind_addr: String,

    /// Optional JSON catalog replacing the standard one (`ADVISOR_CATALOG`)
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            catalog_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".into());
        let catalog_path = std::env::var("ADVISOR_CATALOG")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Self {
            bind_addr,
            catalog_path,
        }
    }

    /// Build the knowledge base: the configured catalog file, or the standard one
    pub fn load_knowledge(&self) -> anyhow::Result<KnowledgeBase> {
        let Some(path) = &self.catalog_path else {
            return Ok(KnowledgeBase::standard());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let kb = KnowledgeBase::from_json(&json)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        Ok(kb)
    }
}
