//! Chat advisor transcript and reply clean-up.
//!
//! The text-generation service itself lives outside this crate; it is reached
//! through [`AdvisorBackend`]. Replies come back as markdown and are flattened
//! to plain text before display.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::CoreError;

pub const ADVISOR_GREETING: &str =
    "Hello! I'm your AI Financial Advisor. What would you like to discuss today?";
pub const ADVISOR_FALLBACK: &str = "Sorry, I couldn't process that. Please try again.";

struct CleanupRules {
    bold: Regex,
    italic: Regex,
    underscore: Regex,
    code: Regex,
    heading: Regex,
    list_item: Regex,
    blank_lines: Regex,
}

static RULES: Lazy<CleanupRules> = Lazy::new(|| CleanupRules {
    bold: compile(r"\*\*(.*?)\*\*"),
    italic: compile(r"\*(.*?)\*"),
    underscore: compile(r"_(.*?)_"),
    code: compile(r"`{1,3}(.*?)`{1,3}"),
    heading: compile(r"(?m)^#+\s*(.*)"),
    list_item: compile(r"(?m)^-+\s*"),
    blank_lines: compile(r"\n{2,}"),
});

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static cleanup pattern compiles")
}

/// Strips markdown emphasis, code markers, headings and list dashes, and
/// collapses blank lines.
pub fn clean_reply(text: &str) -> String {
    let rules = &*RULES;
    let text = rules.bold.replace_all(text, "$1");
    let text = rules.italic.replace_all(&text, "$1");
    let text = rules.underscore.replace_all(&text, "$1");
    let text = rules.code.replace_all(&text, "$1");
    let text = rules.heading.replace_all(&text, "$1");
    let text = rules.list_item.replace_all(&text, "• ");
    let text = rules.blank_lines.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Black-box text generation service.
pub trait AdvisorBackend {
    fn reply(&self, prompt: &str) -> Result<String, CoreError>;
}

impl<F> AdvisorBackend for F
where
    F: Fn(&str) -> Result<String, CoreError>,
{
    fn reply(&self, prompt: &str) -> Result<String, CoreError> {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sender {
    User,
    Advisor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}

pub struct Advisor<B> {
    backend: B,
    transcript: Vec<ChatMessage>,
    next_id: u64,
}

impl<B: AdvisorBackend> Advisor<B> {
    pub fn new(backend: B) -> Self {
        let mut advisor = Self {
            backend,
            transcript: Vec::new(),
            next_id: 1,
        };
        advisor.push(Sender::Advisor, ADVISOR_GREETING.to_string());
        advisor
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Sends a prompt and returns the advisor's answer. Blank prompts are ignored.
    ///
    /// Backend failures are logged and answered with [`ADVISOR_FALLBACK`].
    pub fn send(&mut self, prompt: &str) -> Option<&ChatMessage> {
        if prompt.trim().is_empty() {
            return None;
        }
        self.push(Sender::User, prompt.to_string());
        let text = match self.backend.reply(prompt) {
            Ok(raw) => clean_reply(&raw),
            Err(err) => {
                warn!(error = %err, "advisor request failed");
                ADVISOR_FALLBACK.to_string()
            }
        };
        self.push(Sender::Advisor, text);
        self.transcript.last()
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.transcript.push(ChatMessage {
            id: self.next_id,
            sender,
            text,
        });
        self.next_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_markers() {
        let raw = "## Budgeting 101\n\n**Rule** of *thumb*: use `50/30/20`.\n\n\n- Needs\n- Wants\n-- Savings\n";
        insta::assert_snapshot!(clean_reply(raw), @r"
        Budgeting 101
        Rule of thumb: use 50/30/20.
        • Needs
        • Wants
        • Savings
        ");
    }

    #[test]
    fn underscores_and_fences_are_removed() {
        assert_eq!(clean_reply("an _emergency_ fund"), "an emergency fund");
        assert_eq!(clean_reply("```budget```"), "budget");
        assert_eq!(clean_reply("   plain text  "), "plain text");
    }

    #[test]
    fn transcript_starts_with_greeting_and_cleans_replies() {
        let backend = |prompt: &str| -> Result<String, CoreError> {
            Ok(format!("**You asked:** {prompt}"))
        };
        let mut advisor = Advisor::new(backend);
        assert_eq!(advisor.transcript()[0].text, ADVISOR_GREETING);

        let reply = advisor.send("what is APR?").cloned().unwrap();
        assert_eq!(reply.sender, Sender::Advisor);
        assert_eq!(reply.text, "You asked: what is APR?");
        assert_eq!(advisor.transcript().len(), 3);
        assert_eq!(advisor.transcript()[1].sender, Sender::User);
    }

    #[test]
    fn failures_fall_back_and_blank_prompts_are_ignored() {
        let backend = |_: &str| -> Result<String, CoreError> {
            Err(CoreError::ExternalService("offline".into()))
        };
        let mut advisor = Advisor::new(backend);
        assert!(advisor.send("   ").is_none());
        assert_eq!(advisor.transcript().len(), 1);

        let reply = advisor.send("hello").cloned().unwrap();
        assert_eq!(reply.text, ADVISOR_FALLBACK);
        let ids: Vec<u64> = advisor.transcript().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
