use std::collections::HashMap;
use chrono::{DateTime, Duration, Local};
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::dashboard::utils::language::Language;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub last_result: Option<String>,
    pub language: Language,
    pub last_access: DateTime<Local>,
}

impl Session {
    fn new() -> Self {
        Self {
            last_result: None,
            language: Language::default(),
            last_access: Local::now(),
        }
    }
}

/// Per-client dashboard state keyed by the `session_id` cookie.
///
/// A session lives for `lifetime` after its last access.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    lifetime: Duration,
}

impl SessionStore {
    pub fn new(lifetime_seconds: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            lifetime: Duration::seconds(lifetime_seconds as i64),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    fn is_expired(&self, session: &Session, now: DateTime<Local>) -> bool {
        now - session.last_access >= self.lifetime
    }

    /// Refreshes the live session behind `session_id`, or opens a new one
    /// under a fresh id when there is none.
    pub async fn touch(&self, session_id: Option<Uuid>) -> (Uuid, Session) {
        let now = Local::now();
        let mut sessions = self.sessions.write().await;
        if let Some(session_id) = session_id {
            if let Some(session) = sessions.get_mut(&session_id) {
                if !self.is_expired(session, now) {
                    session.last_access = now;
                    return (session_id, session.clone());
                }
            }
            sessions.remove(&session_id);
        }
        let session_id = Uuid::new_v4();
        let session = Session::new();
        sessions.insert(session_id, session.clone());
        (session_id, session)
    }

    pub async fn get(&self, session_id: &Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id)
            .filter(|session| !self.is_expired(session, Local::now()))
            .cloned()
    }

    pub async fn set_last_result(&self, session_id: Uuid, last_result: String) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id).or_insert_with(Session::new);
        session.last_result = Some(last_result);
        session.last_access = Local::now();
    }

    pub async fn set_language(&self, session_id: Uuid, language: Language) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id).or_insert_with(Session::new);
        session.language = language;
        session.last_access = Local::now();
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Local::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
