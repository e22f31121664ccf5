//! Quick reply options attached to every bot reply.
use crate::chat::ChatMessage;

pub const DEFAULT_OPTIONS: [&str; 3] = [
    "Tell me more",
    "What should I do next?",
    "Back to main menu",
];
pub const FLOOD_RISK_OPTIONS: [&str; 3] = [
    "How can I prepare?",
    "Show emergency contacts",
    "Get local alerts",
];
pub const EMERGENCY_OPTIONS: [&str; 3] = [
    "Call emergency services",
    "Evacuation guidelines",
    "Find shelter",
];

// Checked in order, first match wins. "flood risk" has to come before
// "emergency" since a message can contain both.
const RULES: [(&str, [&str; 3]); 2] = [
    ("flood risk", FLOOD_RISK_OPTIONS),
    ("emergency", EMERGENCY_OPTIONS),
];

/// Pick the quick reply options for a user message using a
/// case-insensitive substring match.
pub fn options_for(user_message: &str) -> Vec<String> {
    let needle = user_message.to_lowercase();
    let options = RULES
        .iter()
        .find(|(keyword, _)| needle.contains(keyword))
        .map(|(_, options)| options)
        .unwrap_or(&DEFAULT_OPTIONS);
    options.iter().map(|s| s.to_string()).collect()
}

/// Turn the model's text into a bot message with quick replies.
pub fn augment(model_text: &str, user_message: &str) -> ChatMessage {
    ChatMessage::bot(model_text, options_for(user_message))
}
