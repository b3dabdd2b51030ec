//! Reusable prompts using Handlebars for templating. Handlebars adds
//! additional security controls since it can't do much out of the box
//! without registering your own helpers. This is ideal since the
//! context blobs sent by the dashboard should be considered untrusted
//! and Handlebars forces you to add only what you need.

use std::fmt;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug)]
pub enum Prompt {
    AgentContext,
    ContentBrief,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Prompt> for String {
    fn from(item: Prompt) -> String {
        format!("{:?}", item)
    }
}

const AGENT_CONTEXT_PROMPT: &str = r"{{persona}}
{{#if context.system}}

System: {{context.system}}
{{/if}}
{{#if context.role}}
Role: {{context.role}}
{{/if}}
{{#if context.tone}}
Tone: {{context.tone}}
{{/if}}
{{#if context.features}}

You can help with:
{{#each context.features}}
- {{this}}
{{/each}}
{{/if}}
{{#if context.rule}}

Rule: {{context.rule}}
{{/if}}
{{#if context.extra}}

Additional context:
{{context.extra}}
{{/if}}";

const CONTENT_BRIEF_PROMPT: &str = r"Content type: {{content_type}}
Target audience: {{target_audience}}
Product: {{product}}
Key points: {{key_points}}";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Prompts are plain text, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::AgentContext.to_string(), AGENT_CONTEXT_PROMPT)
        .expect("Failed to register template");
    registry
        .register_template_string(&Prompt::ContentBrief.to_string(), CONTENT_BRIEF_PROMPT)
        .expect("Failed to register template");
    registry
}

/// The personas the dashboard panels talk to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Agent {
    Assistant,
    Education,
    Content,
}

impl Agent {
    /// Resolve the `agent` field of a chat request. Unknown names fall
    /// back to the general assistant.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_lowercase()).as_deref() {
            Some("education") => Agent::Education,
            Some("content") | Some("content_generator") => Agent::Content,
            Some("assistant") | Some("") | None => Agent::Assistant,
            Some(other) => {
                tracing::debug!("Unknown agent {}, using the default assistant", other);
                Agent::Assistant
            }
        }
    }

    /// Persona text for agents with a fixed voice. `None` means use the
    /// configured system message.
    pub fn persona(&self) -> Option<&'static str> {
        match self {
            Agent::Assistant => None,
            Agent::Education => Some(
                "You are the Education Assistant for a school management platform. \
                 You help staff and students check class schedules, attendance, grades, \
                 teachers, subjects and student information. Answer in a friendly, \
                 efficient and accurate way.",
            ),
            Agent::Content => Some(
                "You are an AI content generator for sales teams. Write professional, \
                 short, persuasive and friendly content that is easy to understand.",
            ),
        }
    }
}

/// The structured hints a dashboard panel can attach to a chat
/// request. Unknown keys are kept as raw JSON in `extra`.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentContext {
    pub system: Option<String>,
    pub role: Option<String>,
    pub tone: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub rule: Option<String>,
    #[serde(skip_deserializing)]
    pub extra: Option<String>,
}

impl AgentContext {
    pub fn from_value(value: &Value) -> Self {
        if value.is_object() {
            if let Ok(context) = serde_json::from_value::<AgentContext>(value.clone()) {
                return context;
            }
        }
        AgentContext {
            extra: Some(value.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBrief {
    #[serde(alias = "contentType")]
    pub content_type: String,
    #[serde(alias = "targetAudience")]
    pub target_audience: String,
    pub product: String,
    #[serde(alias = "keyPoints")]
    pub key_points: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_from_name() {
        assert_eq!(Agent::from_name(Some("education")), Agent::Education);
        assert_eq!(Agent::from_name(Some(" Education ")), Agent::Education);
        assert_eq!(Agent::from_name(Some("content")), Agent::Content);
        assert_eq!(Agent::from_name(Some("something-else")), Agent::Assistant);
        assert_eq!(Agent::from_name(None), Agent::Assistant);
    }

    #[test]
    fn test_render_agent_context() {
        let context = AgentContext::from_value(&json!({
            "system": "school_management_ai",
            "role": "education assistant",
            "tone": "friendly",
            "features": ["schedules", "attendance"],
            "rule": "answers must be relevant to school data",
            "ignored": true
        }));
        let rendered = templates()
            .render(
                &Prompt::AgentContext.to_string(),
                &json!({"persona": "You help.", "context": context}),
            )
            .unwrap();

        assert!(rendered.starts_with("You help."));
        assert!(rendered.contains("Role: education assistant"));
        assert!(rendered.contains("- schedules"));
        assert!(rendered.contains("- attendance"));
        assert!(rendered.contains("Rule: answers must be relevant to school data"));
        assert!(!rendered.contains("Additional context"));
    }

    #[test]
    fn test_render_empty_context_is_just_persona() {
        let rendered = templates()
            .render(
                &Prompt::AgentContext.to_string(),
                &json!({"persona": "You help.", "context": AgentContext::default()}),
            )
            .unwrap();
        assert_eq!(rendered.trim(), "You help.");
    }

    #[test]
    fn test_context_that_is_not_an_object_goes_to_extra() {
        let context = AgentContext::from_value(&json!(["a", "b"]));
        assert_eq!(context.extra, Some(r#"["a","b"]"#.to_string()));
        assert_eq!(context.role, None);

        // Known keys with the wrong shape are kept verbatim too
        let context = AgentContext::from_value(&json!({"features": "all of them"}));
        assert_eq!(context.features, Vec::<String>::new());
        assert!(context.extra.unwrap().contains("all of them"));
    }

    #[test]
    fn test_render_content_brief_keeps_quotes() {
        let brief = ContentBrief {
            content_type: "Instagram caption".to_string(),
            target_audience: "Parents".to_string(),
            product: "\"Smart School\" app".to_string(),
            key_points: "Attendance & grades in one place".to_string(),
        };
        let rendered = templates()
            .render(&Prompt::ContentBrief.to_string(), &brief)
            .unwrap();
        assert!(rendered.contains("Product: \"Smart School\" app"));
        assert!(rendered.contains("Key points: Attendance & grades in one place"));
    }
}
