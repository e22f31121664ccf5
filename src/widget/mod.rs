//! The chat widget without any rendering. It owns the visible message
//! log and the busy flag, and runs one turn at a time against the
//! injected session provider, message store and reply backend.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

mod autocorrect;
mod backend;
mod geolocation;
mod notify;
mod session;
mod store;

pub use autocorrect::{Autocorrect, DictionaryAutocorrect, NoAutocorrect};
pub use backend::{DirectReplyBackend, HttpReplyBackend, ReplyBackend};
pub use geolocation::{DEFAULT_GEOLOCATION_URL, Geolocator, HttpGeolocator};
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use session::{Session, SessionProvider, StaticSessionProvider};
pub use store::{MessageStore, SqliteMessageStore};

use crate::api::public::chat::ChatRequest;
use crate::chat::{ChatMessage, NewMessage, TurnError};
use crate::core::{Coordinates, Location};

pub const DEFAULT_CONTEXT_WINDOW: usize = 5;

#[derive(Clone, Debug)]
pub struct WidgetConfig {
    pub location: Location,
    // How many of the most recent messages are sent with each turn
    pub context_window: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            location: Location::default(),
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

/// Marks the widget as busy until dropped, including when a turn's
/// future is dropped part way through.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Widget {
    context_window: usize,
    location: RwLock<Location>,
    messages: RwLock<Vec<ChatMessage>>,
    busy: AtomicBool,
    sessions: Arc<dyn SessionProvider>,
    store: Arc<dyn MessageStore>,
    backend: Arc<dyn ReplyBackend>,
    autocorrect: Arc<dyn Autocorrect>,
    notifier: Arc<dyn Notifier>,
}

impl Widget {
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn location(&self) -> Location {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn recent_history(&self) -> Vec<ChatMessage> {
        let messages = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        let start = messages.len().saturating_sub(self.context_window);
        messages[start..].to_vec()
    }

    fn push(&self, msg: ChatMessage) {
        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(msg);
    }

    /// Run a single turn and return the bot's reply.
    ///
    /// The user message is persisted before the model is called and is
    /// left in place if the call fails.
    pub async fn send(&self, input: &str) -> Result<ChatMessage, TurnError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TurnError::EmptyMessage);
        }
        let _busy = BusyGuard::acquire(&self.busy).ok_or(TurnError::Busy)?;

        let message = self.autocorrect.correct(input);
        if message != input {
            self.notifier.notify(Notice::info(&format!(
                "Spelling adjusted: \"{}\"",
                message
            )));
        }

        let session = self
            .sessions
            .get_session()
            .await
            .ok_or(TurnError::AuthRequired)?;

        self.store
            .append(&NewMessage::from_user(&message, &session.user_id))
            .await
            .map_err(|e| TurnError::Persistence(e.to_string()))?;

        let history = self.recent_history();
        self.push(ChatMessage::user(&message));

        let request = ChatRequest {
            message,
            history,
            location: Some(self.location()),
        };
        let reply = self.backend.reply(&request).await?;

        self.store
            .append(&NewMessage::from_bot(&reply.content))
            .await
            .map_err(|e| TurnError::Persistence(e.to_string()))?;
        self.push(reply.clone());

        Ok(reply)
    }

    /// Like `send` but failures become notices instead of errors so
    /// the input stays usable for the next attempt.
    pub async fn submit(&self, input: &str) -> Option<ChatMessage> {
        match self.send(input).await {
            Ok(reply) => Some(reply),
            Err(err) => {
                match &err {
                    TurnError::EmptyMessage | TurnError::Busy => {
                        tracing::debug!("Ignoring input: {}", err)
                    }
                    _ => tracing::error!("Turn failed: {}", err),
                }
                if let Some(text) = err.notice() {
                    self.notifier.notify(Notice::error(text));
                }
                None
            }
        }
    }

    /// Send a quick reply option as if the user typed it.
    pub async fn select_option(&self, label: &str) -> Option<ChatMessage> {
        self.submit(label).await
    }

    /// Best effort. The current location is kept as is when the
    /// position can't be determined.
    pub async fn locate(&self, geolocator: &dyn Geolocator) -> Option<Coordinates> {
        match geolocator.current_position().await {
            Ok(coordinates) => {
                self.location
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .coordinates = Some(coordinates.clone());
                self.notifier.notify(Notice::success(&format!(
                    "Location updated: {:.4}, {:.4}",
                    coordinates.latitude, coordinates.longitude
                )));
                Some(coordinates)
            }
            Err(e) => {
                tracing::debug!("Keeping default location: {}", e);
                None
            }
        }
    }
}

/// Use `WidgetBuilder::new()` to construct a `Widget`. Autocorrect and
/// notifications are optional.
pub struct WidgetBuilder {
    config: WidgetConfig,
    sessions: Arc<dyn SessionProvider>,
    store: Arc<dyn MessageStore>,
    backend: Arc<dyn ReplyBackend>,
    autocorrect: Arc<dyn Autocorrect>,
    notifier: Arc<dyn Notifier>,
}

impl WidgetBuilder {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        store: Arc<dyn MessageStore>,
        backend: Arc<dyn ReplyBackend>,
    ) -> Self {
        Self {
            config: WidgetConfig::default(),
            sessions,
            store,
            backend,
            autocorrect: Arc::new(NoAutocorrect),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn autocorrect(mut self, autocorrect: Arc<dyn Autocorrect>) -> Self {
        self.autocorrect = autocorrect;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> Widget {
        Widget {
            context_window: self.config.context_window,
            location: RwLock::new(self.config.location),
            messages: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
            sessions: self.sessions,
            store: self.store,
            backend: self.backend,
            autocorrect: self.autocorrect,
            notifier: self.notifier,
        }
    }
}
