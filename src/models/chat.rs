//! Chat Models
//!
//! Sessions group tutoring turns; every completed turn is stored with the
//! intermediate planning and analysis reports that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored chat session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub user_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored tutoring turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub content: String,
    pub response: String,
    pub planning_analysis: String,
    pub final_analysis: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to persist a new turn
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: i64,
    pub session_id: Option<String>,
    pub content: String,
    pub response: String,
    pub planning_analysis: String,
    pub final_analysis: String,
}

/// Create-session request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Default title for sessions created without one
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// A session with its messages, oldest first
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithMessages {
    #[serde(flatten)]
    pub session: ChatSession,
    pub messages: Vec<ChatMessageRecord>,
}

/// Full history for one user
#[derive(Debug, Clone, Serialize)]
pub struct ChatHistory {
    pub user_id: String,
    pub sessions: Vec<SessionWithMessages>,
    /// Turns sent without a session
    pub messages: Vec<ChatMessageRecord>,
}

impl ChatHistory {
    /// Group `messages` under their sessions. Messages whose session is unknown
    /// are listed at the top level.
    pub fn assemble(
        user_id: i64,
        sessions: Vec<ChatSession>,
        messages: Vec<ChatMessageRecord>,
    ) -> Self {
        let mut grouped: Vec<SessionWithMessages> = sessions
            .into_iter()
            .map(|session| SessionWithMessages {
                session,
                messages: Vec::new(),
            })
            .collect();
        let mut loose = Vec::new();

        for message in messages {
            let slot = message
                .session_id
                .as_deref()
                .and_then(|sid| grouped.iter_mut().find(|s| s.session.id == sid));
            match slot {
                Some(group) => group.messages.push(message),
                None => loose.push(message),
            }
        }

        Self {
            user_id: user_id.to_string(),
            sessions: grouped,
            messages: loose,
        }
    }
}

/// Response body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Fallback text when the model returns nothing
pub const EMPTY_RESPONSE_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";
