//! GitHub webhook support: signature verification and event payloads.

mod event;
mod signature;

pub use event::{PushEvent, PushRepository, WebhookEvent};
pub use signature::{SIGNATURE_HEADER, SignatureError, sign, verify_signature};

/// Header naming the event type of a delivery.
pub const EVENT_HEADER: &str = "x-github-event";
