//! Webhook deliveries the service understands.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushRepository {
    pub full_name: String,
}

/// The parts of a `push` payload that get logged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
    pub repository: PushRepository,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub commits: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    Ping,
    Push(PushEvent),
    Other { name: String },
}

impl WebhookEvent {
    /// Interpret a JSON payload given the value of the event header.
    ///
    /// A `push` whose payload lacks the expected fields is treated like any
    /// other event rather than rejected.
    pub fn parse(name: &str, payload: serde_json::Value) -> Self {
        match name {
            "ping" => WebhookEvent::Ping,
            "push" => match serde_json::from_value::<PushEvent>(payload) {
                Ok(push) => WebhookEvent::Push(push),
                Err(_) => WebhookEvent::Other {
                    name: name.to_string(),
                },
            },
            other => WebhookEvent::Other {
                name: other.to_string(),
            },
        }
    }
}
