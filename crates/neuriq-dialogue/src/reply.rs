//! Reply parsing and rendering.
//!
//! Scripted step texts and analyzer output embed machine-readable markers
//! inside the display text: an options block for quick replies and an
//! action tag for terminal transitions. Parsing strips the markers, and
//! parsing already-stripped text yields nothing further.

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const OPTIONS_OPEN: &str = "<options>";
pub const OPTIONS_CLOSE: &str = "</options>";
pub const ACTION_OPEN: &str = "<action>";
pub const ACTION_CLOSE: &str = "</action>";

/// Separators accepted inside an options block.
const OPTION_SEPARATORS: [char; 4] = ['|', ';', '；', '、'];

/// Terminal action requested by a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalAction {
    /// Run the external analysis over the collected history.
    Analyze,
    /// Open a deep-assessment scale by id.
    OpenScale(String),
}

impl TerminalAction {
    /// Tag body form, the inverse of [`parse_reply`].
    pub fn token(&self) -> String {
        match self {
            TerminalAction::Analyze => "analyze".to_string(),
            TerminalAction::OpenScale(scale_id) => format!("open_scale:{scale_id}"),
        }
    }
}

/// A reply with its markers stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReply {
    /// Display text without any marker blocks.
    pub text: String,
    /// Quick-reply options, in block order.
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TerminalAction>,
}

/// Parse a raw reply into display text, options and an optional action.
///
/// Unknown action tokens are dropped with a warning. An opening marker
/// with no closing marker is left in the text untouched.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let (text, option_blocks) = extract_blocks(raw, OPTIONS_OPEN, OPTIONS_CLOSE);
    let (text, action_blocks) = extract_blocks(&text, ACTION_OPEN, ACTION_CLOSE);

    let options = option_blocks
        .iter()
        .flat_map(|block| split_options(block))
        .collect();
    let action = action_blocks
        .iter()
        .find_map(|block| parse_action(block.trim()));

    ParsedReply {
        text: text.trim().to_string(),
        options,
        action,
    }
}

/// Embed quick-reply options and an action tag into reply text, the
/// inverse of [`parse_reply`].
pub fn render_reply(text: &str, options: &[String], action: Option<&TerminalAction>) -> String {
    let mut out = text.to_string();
    if !options.is_empty() {
        out.push('\n');
        out.push_str(OPTIONS_OPEN);
        out.push_str(&options.join("|"));
        out.push_str(OPTIONS_CLOSE);
    }
    if let Some(action) = action {
        out.push('\n');
        out.push_str(ACTION_OPEN);
        out.push_str(&action.token());
        out.push_str(ACTION_CLOSE);
    }
    out
}

/// Remove every `open..close` block, returning the remaining text and the
/// block bodies in order.
fn extract_blocks(text: &str, open: &str, close: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(text.len());
    let mut bodies = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let after_open = start + open.len();
        match rest[after_open..].find(close) {
            Some(body_len) => {
                out.push_str(&rest[..start]);
                bodies.push(rest[after_open..after_open + body_len].to_string());
                rest = &rest[after_open + body_len + close.len()..];
            }
            // Unterminated marker stays put.
            None => break,
        }
    }
    out.push_str(rest);
    (out, bodies)
}

/// Split a block body on any accepted separator, trimming each entry and
/// dropping empties.
fn split_options(body: &str) -> Vec<String> {
    body.split(&OPTION_SEPARATORS[..])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_action(token: &str) -> Option<TerminalAction> {
    if token == "analyze" {
        return Some(TerminalAction::Analyze);
    }
    if let Some(scale_id) = token.strip_prefix("open_scale:") {
        let scale_id = scale_id.trim();
        if !scale_id.is_empty() {
            return Some(TerminalAction::OpenScale(scale_id.to_string()));
        }
    }
    warn!(token, "unknown action tag dropped");
    None
}
