//! Decision traces: why the planning service chose a plan.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

/// One planning decision. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub agent_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub triggered_rules: Vec<TriggeredRule>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub memory_retrieved: Vec<MemoryEntry>,
    #[serde(default)]
    pub plan_chosen: Option<Value>,
    /// Tool name → whether it was used. Values are read by truthiness.
    #[serde(default, deserialize_with = "lenient::object_map")]
    pub tools_called: IndexMap<String, Value>,
}

/// A symbolic rule that fired. Older traces store bare strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggeredRule {
    Text(String),
    Structured(RuleDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDetail {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub rule_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub priority: Option<String>,
}

/// A memory the planner consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Value,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub last_accessed: Option<String>,
}
