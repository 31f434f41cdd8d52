//! Script store: the authored chat and log sequences replayed by the demo.
//!
//! Both sequences are static data, fixed at build time and never mutated.
//! They have independent lengths and are not index-aligned: the chat script
//! is seeded into the transcript all at once on start, while the log script
//! is revealed one entry per tick.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sender {
    System,
    Agent,
    Operator,
    User,
}

impl Sender {
    /// Returns the display label for this sender.
    pub fn label(self) -> &'static str {
        match self {
            Sender::System => "System",
            Sender::Agent => "Agent",
            Sender::Operator => "Operator",
            Sender::User => "User",
        }
    }

    /// Returns true for senders shown on the orchestrator side of the chat.
    pub fn is_orchestrator(self) -> bool {
        matches!(self, Sender::Agent | Sender::System)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single chat message.
///
/// Scripted messages borrow their text from the static script; user
/// submissions own theirs. Chat messages carry no timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatEvent {
    pub sender: Sender,
    pub text: Cow<'static, str>,
}

impl ChatEvent {
    /// Creates a scripted message backed by static text.
    pub const fn scripted(sender: Sender, text: &'static str) -> Self {
        Self {
            sender,
            text: Cow::Borrowed(text),
        }
    }

    /// Creates a message submitted by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: Cow::Owned(text.into()),
        }
    }
}

/// Display emphasis attached to some log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One authored reasoning step in the agent log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    /// Short label; may embed an icon.
    pub step: &'static str,
    pub detail: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl LogEvent {
    const fn new(step: &'static str, detail: &'static str) -> Self {
        Self {
            step,
            detail,
            severity: None,
        }
    }

    const fn with_severity(
        step: &'static str,
        detail: &'static str,
        severity: Severity,
    ) -> Self {
        Self {
            step,
            detail,
            severity: Some(severity),
        }
    }
}

/// A pair of immutable replay sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Script {
    chat: &'static [ChatEvent],
    logs: &'static [LogEvent],
}

impl Script {
    /// Builds a script from static sequences.
    pub const fn new(chat: &'static [ChatEvent], logs: &'static [LogEvent]) -> Self {
        Self { chat, logs }
    }

    /// The District 3 blackout scenario.
    pub const fn reference() -> Self {
        Self::new(CHAT_SEQUENCE, LOG_SEQUENCE)
    }

    pub fn chat(&self) -> &'static [ChatEvent] {
        self.chat
    }

    pub fn logs(&self) -> &'static [LogEvent] {
        self.logs
    }

    pub fn chat_len(&self) -> usize {
        self.chat.len()
    }

    pub fn log_len(&self) -> usize {
        self.logs.len()
    }

    pub fn chat_event(&self, index: usize) -> Option<&'static ChatEvent> {
        self.chat.get(index)
    }

    pub fn log_event(&self, index: usize) -> Option<&'static LogEvent> {
        self.logs.get(index)
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::reference()
    }
}

// ============================================================================
// Reference script
// ============================================================================

static CHAT_SEQUENCE: &[ChatEvent] = &[
    ChatEvent::scripted(Sender::System, "⚡ Blackout detected in District 3."),
    ChatEvent::scripted(Sender::Agent, "Analyzing cascading impacts…"),
    ChatEvent::scripted(
        Sender::Agent,
        "Three scenarios identified:\n\
         1) Hospital power failure\n\
         2) Public transport disruption\n\
         3) Communication breakdown",
    ),
    ChatEvent::scripted(
        Sender::Agent,
        "Recommended action: Trigger backup generators, reroute traffic, and issue citizen alerts.",
    ),
    ChatEvent::scripted(Sender::Operator, "✅ Acknowledged. Alert received."),
    ChatEvent::scripted(
        Sender::Operator,
        "📝 Please create draft SMS and custom alerts for citizens and city managers.",
    ),
    ChatEvent::scripted(
        Sender::Operator,
        "🚨 Activate the contingency plan as suggested.",
    ),
    ChatEvent::scripted(
        Sender::Operator,
        "🔄 Generate next suggestion for follow-up measures.",
    ),
    ChatEvent::scripted(
        Sender::Agent,
        "Drafting alerts and monitoring impact. Preparing follow-up options…",
    ),
];

static LOG_SEQUENCE: &[LogEvent] = &[
    LogEvent::new(
        "⚡ Event Detection",
        "Blackout event received from grid sensor feed.",
    ),
    LogEvent::new("🗺️ Context Update", "State updated (District 3 at 19:05)."),
    LogEvent::new(
        "Cascade Analysis",
        "Evaluating critical infrastructures: hospitals, transport, communications.",
    ),
    LogEvent::with_severity(
        "🏥 Scenario 1",
        "Hospital emergency power may last < 2h.",
        Severity::High,
    ),
    LogEvent::with_severity(
        "🚇 Scenario 2",
        "Public transport outage → expected traffic jams.",
        Severity::Medium,
    ),
    LogEvent::with_severity(
        "📡 Scenario 3",
        "Mobile networks unstable. Citizen reports unreliable.",
        Severity::High,
    ),
    LogEvent::new(
        "☎️ Signal Loop",
        "Checking 112 emergency calls: multiple blackout-related incidents.",
    ),
    LogEvent::new(
        "📱 Signal Loop",
        "Scanning social networks: high volume of posts about outages.",
    ),
    LogEvent::new(
        "😟 Signal Loop",
        "Confirmation: citizens starting to panic, unrest risk rising.",
    ),
    LogEvent::new(
        "📜 Policy Reasoning",
        "Applied alerting protocol (CAP) + municipal emergency rules.",
    ),
    LogEvent::new("👤 Operator Action", "Operator acknowledged alert."),
    LogEvent::new(
        "👤 Operator Action",
        "Operator requested draft SMS + targeted alerts.",
    ),
    LogEvent::new("👤 Operator Action", "Operator activated contingency plan."),
    LogEvent::new("👤 Operator Action", "Operator requested next suggestion."),
    LogEvent::new(
        "✅ Proposed Action",
        "Backup generators ON, reroute traffic, send alerts via SMS and app.",
    ),
];
