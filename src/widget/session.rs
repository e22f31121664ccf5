use async_trait::async_trait;

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user_id: String,
}

/// Source of the signed in user. `None` means nobody is signed in.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn get_session(&self) -> Option<Session>;
}

/// A session fixed at startup, e.g. from a command line flag.
pub struct StaticSessionProvider(Option<Session>);

impl StaticSessionProvider {
    pub fn new(user_id: Option<&str>) -> Self {
        Self(user_id.map(|id| Session {
            user_id: id.to_string(),
        }))
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn get_session(&self) -> Option<Session> {
        self.0.clone()
    }
}
