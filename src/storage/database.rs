//! SQLite Database
//!
//! Embedded database for persistent storage using rusqlite with r2d2 connection pooling.

use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row};

use crate::models::chat::{ChatMessageRecord, ChatSession, NewChatMessage};
use crate::models::profile::{LearningProfile, LearningProfileInput};
use crate::models::user::UserRecord;
use crate::utils::error::{AppError, AppResult};

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create an in-memory database for testing.
    ///
    /// Uses a single pooled connection so every caller sees the same
    /// in-memory database.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Open (or create) a database file with connection pooling
    pub fn open(db_path: &Path) -> AppResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;

        tracing::info!("[Database] Opened {}", db_path.display());
        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                hashed_password TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS learning_profiles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE,
                verbal_score REAL,
                non_verbal_score REAL,
                self_assessment INTEGER,
                age INTEGER,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS chat_sessions (
                id TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS chat_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                session_id TEXT,
                content TEXT NOT NULL,
                response TEXT NOT NULL,
                planning_analysis TEXT NOT NULL DEFAULT '',
                final_analysis TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                FOREIGN KEY (session_id) REFERENCES chat_sessions(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_chat_messages_user ON chat_messages(user_id, created_at)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_chat_sessions_user ON chat_sessions(user_id)",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Check if the database is healthy
    pub fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.pool.get() {
            conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
        } else {
            false
        }
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Insert a user. Duplicate usernames/emails are reported as conflicts,
    /// username first.
    pub fn create_user(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> AppResult<UserRecord> {
        if self.find_user_by_username(username)?.is_some() {
            return Err(AppError::conflict("Username already registered"));
        }
        if self.find_user_by_email(email)?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO users (username, email, hashed_password) VALUES (?1, ?2, ?3)",
            params![username, email, hashed_password],
        )?;

        Ok(UserRecord {
            id: conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        })
    }

    /// Look up a user by username
    pub fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        self.find_user("username", username)
    }

    /// Look up a user by email
    pub fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.find_user("email", email)
    }

    fn find_user(&self, column: &str, value: &str) -> AppResult<Option<UserRecord>> {
        let conn = self.get_connection()?;
        let sql = format!(
            "SELECT id, username, email, hashed_password FROM users WHERE {} = ?1",
            column
        );
        let result = conn.query_row(&sql, params![value], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                hashed_password: row.get(3)?,
            })
        });

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ========================================================================
    // Learning profiles
    // ========================================================================

    /// Create the profile for a user. Fails if one already exists.
    pub fn create_learning_profile(
        &self,
        user_id: i64,
        input: LearningProfileInput,
    ) -> AppResult<LearningProfile> {
        if self.get_learning_profile(user_id)?.is_some() {
            return Err(AppError::conflict("Learning profile already exists"));
        }

        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO learning_profiles (user_id, verbal_score, non_verbal_score, self_assessment, age)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                input.verbal_score.flatten(),
                input.non_verbal_score.flatten(),
                input.self_assessment.flatten(),
                input.age.flatten(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_learning_profile(user_id)?
            .ok_or_else(|| AppError::internal(format!("Learning profile {} vanished after insert", id)))
    }

    /// Fetch the profile for a user
    pub fn get_learning_profile(&self, user_id: i64) -> AppResult<Option<LearningProfile>> {
        let conn = self.get_connection()?;
        let profile = conn
            .query_row(
                "SELECT id, user_id, verbal_score, non_verbal_score, self_assessment, age
                 FROM learning_profiles WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(LearningProfile {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        verbal_score: row.get(2)?,
                        non_verbal_score: row.get(3)?,
                        self_assessment: row.get(4)?,
                        age: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    /// Apply a partial update to an existing profile
    pub fn update_learning_profile(
        &self,
        user_id: i64,
        input: LearningProfileInput,
    ) -> AppResult<LearningProfile> {
        let mut profile = self
            .get_learning_profile(user_id)?
            .ok_or_else(|| AppError::not_found("Learning profile not found"))?;
        profile.apply(input);

        let conn = self.get_connection()?;
        conn.execute(
            "UPDATE learning_profiles
             SET verbal_score = ?1, non_verbal_score = ?2, self_assessment = ?3, age = ?4
             WHERE user_id = ?5",
            params![
                profile.verbal_score,
                profile.non_verbal_score,
                profile.self_assessment,
                profile.age,
                user_id,
            ],
        )?;
        Ok(profile)
    }

    /// Delete the profile for a user
    pub fn delete_learning_profile(&self, user_id: i64) -> AppResult<()> {
        let conn = self.get_connection()?;
        let affected = conn.execute(
            "DELETE FROM learning_profiles WHERE user_id = ?1",
            params![user_id],
        )?;
        if affected == 0 {
            return Err(AppError::not_found("Learning profile not found"));
        }
        Ok(())
    }

    // ========================================================================
    // Chat sessions
    // ========================================================================

    /// Create a new chat session
    pub fn create_chat_session(&self, user_id: i64, title: &str) -> AppResult<ChatSession> {
        let now = Utc::now();
        let session = ChatSession {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO chat_sessions (id, user_id, title, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.id,
                session.user_id,
                session.title,
                session.created_at.to_rfc3339(),
                session.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(session)
    }

    /// Fetch a session if it belongs to `user_id`
    pub fn get_chat_session(&self, user_id: i64, session_id: &str) -> AppResult<Option<ChatSession>> {
        let conn = self.get_connection()?;
        let session = conn
            .query_row(
                "SELECT id, user_id, title, created_at, updated_at
                 FROM chat_sessions WHERE id = ?1 AND user_id = ?2",
                params![session_id, user_id],
                session_from_row,
            )
            .optional()?;
        Ok(session)
    }

    /// List a user's sessions, newest activity first
    pub fn list_chat_sessions(&self, user_id: i64) -> AppResult<Vec<ChatSession>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, created_at, updated_at
             FROM chat_sessions WHERE user_id = ?1
             ORDER BY updated_at DESC",
        )?;
        let sessions = stmt
            .query_map(params![user_id], session_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(sessions)
    }

    /// Delete a session and its messages. Returns false when the session does
    /// not exist or belongs to someone else.
    pub fn delete_chat_session(&self, user_id: i64, session_id: &str) -> AppResult<bool> {
        let mut conn = self.get_connection()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM chat_messages WHERE session_id = ?1 AND user_id = ?2",
            params![session_id, user_id],
        )?;
        let affected = tx.execute(
            "DELETE FROM chat_sessions WHERE id = ?1 AND user_id = ?2",
            params![session_id, user_id],
        )?;
        tx.commit()?;
        Ok(affected > 0)
    }

    // ========================================================================
    // Chat messages
    // ========================================================================

    /// Persist a completed tutoring turn and bump its session's activity time
    pub fn insert_chat_message(&self, message: NewChatMessage) -> AppResult<ChatMessageRecord> {
        let now = Utc::now();
        let mut conn = self.get_connection()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO chat_messages
             (user_id, session_id, content, response, planning_analysis, final_analysis, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                message.user_id,
                message.session_id,
                message.content,
                message.response,
                message.planning_analysis,
                message.final_analysis,
                now.to_rfc3339(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        if let Some(session_id) = &message.session_id {
            tx.execute(
                "UPDATE chat_sessions SET updated_at = ?1 WHERE id = ?2",
                params![now.to_rfc3339(), session_id],
            )?;
        }
        tx.commit()?;

        Ok(ChatMessageRecord {
            id,
            user_id: message.user_id,
            session_id: message.session_id,
            content: message.content,
            response: message.response,
            planning_analysis: message.planning_analysis,
            final_analysis: message.final_analysis,
            created_at: now,
        })
    }

    /// All turns for a user, oldest first
    pub fn list_chat_messages(&self, user_id: i64) -> AppResult<Vec<ChatMessageRecord>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, session_id, content, response, planning_analysis, final_analysis, created_at
             FROM chat_messages WHERE user_id = ?1
             ORDER BY created_at ASC, id ASC",
        )?;
        let messages = stmt
            .query_map(params![user_id], |row| {
                Ok(ChatMessageRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    session_id: row.get(2)?,
                    content: row.get(3)?,
                    response: row.get(4)?,
                    planning_analysis: row.get(5)?,
                    final_analysis: row.get(6)?,
                    created_at: parse_timestamp(row, 7)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(messages)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<ChatSession> {
    Ok(ChatSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        created_at: parse_timestamp(row, 3)?,
        updated_at: parse_timestamp(row, 4)?,
    })
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
