//! Reusable prompts using Handlebars for templating. Strict mode is
//! on so a missing location field fails loudly instead of rendering
//! an empty emergency number.

use std::fmt;

use anyhow::{Error, Result};
use handlebars::Handlebars;
use serde_json::Value;

use crate::core::Location;

#[derive(Debug)]
pub enum Prompt {
    SystemDirective,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const SYSTEM_DIRECTIVE_PROMPT: &str = r"You are Nova, a flood safety assistant for residents of {{city}}, {{state}}, {{country}}.

Answer questions about flood risk, preparation, evacuation, shelters and recovery. Keep answers short, practical and specific to {{city}}. If someone is in immediate danger, tell them to contact emergency services before anything else.

Emergency contacts for {{city}}:
- Police: {{emergencyContacts.police}}
- Flood control: {{emergencyContacts.floodControl}}
- Emergency services: {{emergencyContacts.emergencyServices}}
{{#if coordinates}}
The resident's approximate position is latitude {{coordinates.latitude}}, longitude {{coordinates.longitude}}.
{{/if}}";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Plain text for the model, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::SystemDirective.to_string(), SYSTEM_DIRECTIVE_PROMPT)
        .expect("Failed to register template");
    registry
}

/// Render the system directive for `location`.
pub fn system_directive(location: &Location) -> Result<String, Error> {
    let mut data = serde_json::to_value(location)?;
    // Strict mode treats an absent field as an error even inside `#if`
    // so unknown coordinates are passed as an explicit null
    if data.get("coordinates").is_none() {
        data["coordinates"] = Value::Null;
    }
    let rendered = templates().render(&Prompt::SystemDirective.to_string(), &data)?;
    Ok(rendered)
}
