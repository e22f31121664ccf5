pub mod augment;
pub mod context;
pub mod prompt;
pub mod reply;

pub use augment::augment;
pub use context::ContextBuilder;
pub use reply::{ModelSettings, respond};
