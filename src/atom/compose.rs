//! Request composition: briefs, replayed history, and the new prompt.

use crate::standards::chat::ChatMessage;
use crate::types::{Brief, Episode};

/// Render briefs, in order, into one system prompt.
///
/// Returns `None` for an empty slice so that no system message is emitted.
pub fn cast_briefs_to_prompt(briefs: &[Brief]) -> Option<String> {
    if briefs.is_empty() {
        return None;
    }

    let sections: Vec<String> = briefs
        .iter()
        .map(|brief| format!("<brief uri=\"{}\">\n{}\n</brief>", brief.uri, brief.content.trim_end()))
        .collect();

    Some(format!(
        "use the following briefs as ground truth for your answer.\n\n{}",
        sections.join("\n\n")
    ))
}

/// Build the message sequence for one ask.
///
/// Order: optional system message, then one user/assistant pair per prior
/// exchange (chronological, verbatim), then the new user prompt.
pub fn compose_messages(
    system_prompt: Option<String>,
    prior_episode: Option<&Episode>,
    prompt: &str,
) -> Vec<ChatMessage> {
    let history = prior_episode.map_or(0, Episode::len);
    let mut messages = Vec::with_capacity(2 * history + 2);

    if let Some(system) = system_prompt {
        messages.push(ChatMessage::system(system));
    }
    if let Some(episode) = prior_episode {
        for exchange in &episode.exchanges {
            messages.push(ChatMessage::user(exchange.input.clone()));
            messages.push(ChatMessage::assistant(exchange.output.clone()));
        }
    }
    messages.push(ChatMessage::user(prompt));
    messages
}

/// Characters across every composed message, counted as Unicode scalars.
pub fn count_chars(messages: &[ChatMessage]) -> u64 {
    messages
        .iter()
        .map(|message| message.content.chars().count() as u64)
        .sum()
}
