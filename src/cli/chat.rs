use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio_rusqlite::Connection;

use super::init::open_db;
use crate::ai::ModelSettings;
use crate::chat::{ChatMessage, find_user_messages};
use crate::core::AppConfig;
use crate::widget::{
    DictionaryAutocorrect, DirectReplyBackend, HttpGeolocator, HttpReplyBackend, Notice,
    NoticeLevel, Notifier, ReplyBackend, SqliteMessageStore, StaticSessionProvider,
    WidgetBuilder, WidgetConfig,
};

const RECENT_QUESTIONS: usize = 3;

struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => eprintln!("! {}", notice.message),
            NoticeLevel::Info | NoticeLevel::Success => println!("* {}", notice.message),
        }
    }
}

fn print_reply(reply: &ChatMessage) {
    println!("{}", reply.content);
    if let Some(options) = &reply.options {
        for (i, option) in options.iter().enumerate() {
            println!("  [{}] {}", i + 1, option);
        }
    }
}

/// A number typed right after a reply picks that quick reply option.
fn resolve_input(line: &str, last_reply: Option<&ChatMessage>) -> String {
    let options = last_reply.and_then(|r| r.options.as_ref());
    if let (Ok(n), Some(options)) = (line.trim().parse::<usize>(), options) {
        if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return option.clone();
        }
    }
    line.to_string()
}

/// The last few questions `user_id` asked, oldest first.
async fn recent_questions(db: &Connection, user_id: &str) -> Result<Vec<String>> {
    let messages = find_user_messages(db, user_id, RECENT_QUESTIONS).await?;
    Ok(messages.into_iter().map(|m| m.content).collect())
}

pub async fn run(
    server: Option<String>,
    api_key: Option<String>,
    user_id: Option<String>,
    locate: bool,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let config = AppConfig::default();
    let db = open_db(&config.db_path).await?;

    let backend: Arc<dyn ReplyBackend> = match &server {
        Some(url) => Arc::new(HttpReplyBackend::new(url, api_key.as_deref())),
        None => Arc::new(DirectReplyBackend::new(
            ModelSettings::from(&config),
            config.location.clone(),
        )),
    };

    let widget = WidgetBuilder::new(
        Arc::new(StaticSessionProvider::new(user_id.as_deref())),
        Arc::new(SqliteMessageStore::new(db.clone())),
        backend,
    )
    .config(WidgetConfig {
        location: config.location.clone(),
        ..WidgetConfig::default()
    })
    .autocorrect(Arc::new(DictionaryAutocorrect::default()))
    .notifier(Arc::new(PrintNotifier))
    .build();

    if locate {
        widget.locate(&HttpGeolocator::default()).await;
    }

    let location = widget.location();
    println!(
        "Hi, I'm Nova. Ask me anything about flood safety in {}.",
        location.city
    );
    if let Some(id) = &user_id {
        let recent = recent_questions(&db, id).await?;
        if !recent.is_empty() {
            println!("Last time you asked:");
            for question in recent {
                println!("  - {}", question);
            }
        }
    }

    let mut last_reply: Option<ChatMessage> = None;
    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let input = resolve_input(&line, last_reply.as_ref());
                if let Err(err) = rl.add_history_entry(line.as_str()) {
                    tracing::debug!("Failed to record input history: {}", err);
                }
                if let Some(reply) = widget.submit(&input).await {
                    print_reply(&reply);
                    last_reply = Some(reply);
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
