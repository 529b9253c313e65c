//! Decision trace rendering.
//!
//! Each section of a trace is rendered on its own and skipped when absent
//! or empty, so a sparse trace produces a short view instead of an error.

use std::fmt;

use serde_json::Value;

use crate::lenient::is_truthy;
use crate::trace::{DecisionTrace, MemoryEntry, TriggeredRule};
use crate::trend::timestamp_label;

/// Memory entries shown per trace.
pub const MEMORY_PREVIEW_LIMIT: usize = 3;

/// Characters of serialized memory content shown before the ellipsis.
pub const MEMORY_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum TraceSection {
    Header {
        agent: Option<String>,
        date: Option<String>,
    },
    Explanation(String),
    Rules(Vec<RuleLine>),
    Memory(Vec<MemoryPreview>),
    PlanChosen(String),
    Tools(Vec<ToolUsage>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleLine {
    pub title: String,
    pub condition: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryPreview {
    pub kind: Option<String>,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolUsage {
    pub name: String,
    pub used: bool,
}

impl ToolUsage {
    pub fn marker(&self) -> &'static str {
        if self.used {
            "used"
        } else {
            "not used"
        }
    }
}

impl fmt::Display for ToolUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.used { '✓' } else { '✗' };
        write!(f, "{}: {} {}", self.name, mark, self.marker())
    }
}

/// Truncate to `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn rule_line(index: usize, rule: &TriggeredRule) -> RuleLine {
    match rule {
        TriggeredRule::Text(text) => RuleLine {
            title: text.clone(),
            condition: None,
            action: None,
        },
        TriggeredRule::Structured(detail) => RuleLine {
            title: detail
                .rule_id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("Rule {}", index + 1)),
            condition: detail.condition.clone().filter(|c| !c.is_empty()),
            action: detail.action.clone().filter(|a| !a.is_empty()),
        },
    }
}

fn memory_preview(entry: &MemoryEntry) -> MemoryPreview {
    let serialized = serde_json::to_string(&entry.content).unwrap_or_default();
    MemoryPreview {
        kind: entry.kind.clone(),
        preview: format!("{}...", truncate_chars(&serialized, MEMORY_PREVIEW_CHARS)),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Render the populated sections of `trace`, in display order.
pub fn render_trace(trace: &DecisionTrace) -> Vec<TraceSection> {
    let mut sections = Vec::new();

    if trace.agent_name.is_some() || trace.date.is_some() {
        sections.push(TraceSection::Header {
            agent: trace.agent_name.clone(),
            date: trace.date.as_deref().map(timestamp_label),
        });
    }

    if let Some(explanation) = trace.explanation.as_ref().filter(|e| !e.trim().is_empty()) {
        sections.push(TraceSection::Explanation(explanation.clone()));
    }

    if !trace.triggered_rules.is_empty() {
        sections.push(TraceSection::Rules(
            trace
                .triggered_rules
                .iter()
                .enumerate()
                .map(|(i, rule)| rule_line(i, rule))
                .collect(),
        ));
    }

    if !trace.memory_retrieved.is_empty() {
        sections.push(TraceSection::Memory(
            trace
                .memory_retrieved
                .iter()
                .take(MEMORY_PREVIEW_LIMIT)
                .map(memory_preview)
                .collect(),
        ));
    }

    if let Some(plan) = trace.plan_chosen.as_ref().filter(|p| !is_blank(p)) {
        let dump = serde_json::to_string_pretty(plan).unwrap_or_else(|_| plan.to_string());
        sections.push(TraceSection::PlanChosen(dump));
    }

    if !trace.tools_called.is_empty() {
        sections.push(TraceSection::Tools(
            trace
                .tools_called
                .iter()
                .map(|(name, value)| ToolUsage {
                    name: name.clone(),
                    used: is_truthy(value),
                })
                .collect(),
        ));
    }

    sections
}

impl fmt::Display for TraceSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header { agent, date } => {
                write!(f, "{}", agent.as_deref().unwrap_or("Decision"))?;
                if let Some(date) = date {
                    write!(f, " ({})", date)?;
                }
                Ok(())
            }
            Self::Explanation(text) => write!(f, "Explanation:\n  {}", text),
            Self::Rules(rules) => {
                write!(f, "Triggered Rules:")?;
                for rule in rules {
                    write!(f, "\n  - {}", rule.title)?;
                    if let Some(condition) = &rule.condition {
                        write!(f, "\n    Condition: {}", condition)?;
                    }
                    if let Some(action) = &rule.action {
                        write!(f, "\n    Action: {}", action)?;
                    }
                }
                Ok(())
            }
            Self::Memory(entries) => {
                write!(f, "Memory Retrieved:")?;
                for entry in entries {
                    match &entry.kind {
                        Some(kind) => write!(f, "\n  - [{}] {}", kind, entry.preview)?,
                        None => write!(f, "\n  - {}", entry.preview)?,
                    }
                }
                Ok(())
            }
            Self::PlanChosen(dump) => write!(f, "Plan Chosen:\n{}", dump),
            Self::Tools(tools) => {
                write!(f, "Tools Called:")?;
                for tool in tools {
                    write!(f, "\n  {}", tool)?;
                }
                Ok(())
            }
        }
    }
}

/// Plain-text rendering of a whole trace.
pub fn trace_text(trace: &DecisionTrace) -> String {
    render_trace(trace)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RuleDetail;
    use serde_json::json;

    fn trace(value: Value) -> DecisionTrace {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_false_tools_are_shown() {
        let sections = render_trace(&trace(json!({
            "tools_called": {"web_search": false, "db_lookup": true}
        })));

        assert_eq!(
            sections,
            vec![TraceSection::Tools(vec![
                ToolUsage {
                    name: "web_search".to_string(),
                    used: false
                },
                ToolUsage {
                    name: "db_lookup".to_string(),
                    used: true
                },
            ])]
        );
        let text = sections[0].to_string();
        assert!(text.contains("web_search: ✗ not used"));
        assert!(text.contains("db_lookup: ✓ used"));
    }

    #[test]
    fn test_empty_trace_renders_nothing() {
        let sections = render_trace(&trace(json!({
            "id": 1,
            "explanation": "",
            "triggered_rules": [],
            "memory_retrieved": [],
            "plan_chosen": {},
            "tools_called": {}
        })));
        assert!(sections.is_empty());
    }

    #[test]
    fn test_rule_fields_omitted_individually() {
        let rules = vec![
            TriggeredRule::Structured(RuleDetail {
                rule_id: Some("high_stress_relief".to_string()),
                condition: Some("stress_score > 80 (85)".to_string()),
                action: None,
                priority: None,
            }),
            TriggeredRule::Structured(RuleDetail::default()),
        ];
        let trace = DecisionTrace {
            triggered_rules: rules,
            ..Default::default()
        };

        let sections = render_trace(&trace);
        let TraceSection::Rules(lines) = &sections[0] else {
            panic!("expected rules section");
        };
        assert_eq!(lines[0].condition.as_deref(), Some("stress_score > 80 (85)"));
        assert!(lines[0].action.is_none());
        assert_eq!(lines[1].title, "Rule 2");

        let text = sections[0].to_string();
        assert!(text.contains("Condition: stress_score > 80 (85)"));
        assert!(!text.contains("Action:"));
    }

    #[test]
    fn test_memory_is_capped_and_truncated() {
        let long = "x".repeat(300);
        let sections = render_trace(&trace(json!({
            "memory_retrieved": [
                {"type": "preference", "content": long},
                {"type": "feedback", "content": {"liked": true}},
                {"type": "a", "content": 1},
                {"type": "b", "content": 2}
            ]
        })));

        let TraceSection::Memory(entries) = &sections[0] else {
            panic!("expected memory section");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].preview.chars().count(), 103);
        assert!(entries[0].preview.starts_with("\"xxx"));
        assert!(entries[0].preview.ends_with("..."));
        assert_eq!(entries[1].preview, r#"{"liked":true}..."#);
    }

    #[test]
    fn test_plan_chosen_is_dumped_verbatim() {
        let sections = render_trace(&trace(json!({
            "plan_chosen": {"yoga": {"session_type": "recovery", "duration_minutes": 20}}
        })));
        let TraceSection::PlanChosen(dump) = &sections[0] else {
            panic!("expected plan section");
        };
        let reparsed: Value = serde_json::from_str(dump).unwrap();
        assert_eq!(reparsed["yoga"]["duration_minutes"], 20);
    }

    #[test]
    fn test_header_and_order() {
        let text = trace_text(&trace(json!({
            "agent_name": "ReasonerAgent",
            "date": "2025-03-04T08:05:00",
            "explanation": "Low energy detected.",
            "tools_called": {"ml_predictor": true}
        })));
        assert_eq!(
            text,
            "ReasonerAgent (3/4/2025, 8:05:00 AM)\nExplanation:\n  Low energy detected.\nTools Called:\n  ml_predictor: ✓ used"
        );
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
