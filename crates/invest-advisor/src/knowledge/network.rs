//! Decision Network
//!
//! Directed graph of what influences each instrument: a profile points at the
//! instruments recommended for it, a market condition at every instrument it
//! has a rule for.

use serde::Serialize;

use super::KnowledgeBase;
use crate::model::RiskProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Profile,
    Instrument,
    MarketCondition,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DecisionNetwork {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl DecisionNetwork {
    pub(super) fn from_knowledge(kb: &KnowledgeBase) -> Self {
        let mut network = Self::default();

        for profile in RiskProfile::ALL {
            network.add_node(profile.name(), NodeKind::Profile);
        }
        for instrument in kb.instruments() {
            network.add_node(&instrument.name, NodeKind::Instrument);
        }
        for condition in kb.conditions() {
            network.add_node(condition, NodeKind::MarketCondition);
        }

        for instrument in kb.instruments() {
            network.add_edge(instrument.recommended_profile.name(), &instrument.name);
        }
        for (condition, rule) in kb.market_rules() {
            // Catalog order rather than the rule's key order
            for instrument in kb.instruments().iter().filter(|i| rule.contains_key(&i.name)) {
                network.add_edge(condition, &instrument.name);
            }
        }

        network
    }

    fn add_node(&mut self, id: &str, kind: NodeKind) {
        self.nodes.push(Node {
            id: id.to_string(),
            kind,
        });
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    /// Nodes with an edge into `id`
    pub fn predecessors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> {
        self.edges
            .iter()
            .filter(move |e| e.to == id)
            .map(|e| e.from.as_str())
    }

    /// Nodes `id` has an edge into
    pub fn successors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .map(|e| e.to.as_str())
    }
}
