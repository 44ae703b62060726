//! Redis-backed session store

use chrono::Utc;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::Session,
};

#[derive(Clone)]
pub struct SessionStore {
    conn: ConnectionManager,
}

fn session_key(session_id: impl std::fmt::Display) -> String {
    format!("session:{}", session_id)
}

/// Set of a user's session ids, used to revoke them together
fn user_sessions_key(user_id: Uuid) -> String {
    format!("user_sessions:{}", user_id)
}

impl SessionStore {
    /// Connect to Redis and verify the connection
    pub async fn connect(url: &str) -> AppResult<Self> {
        let client = Client::open(url)?;
        let mut conn = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;

        Ok(Self { conn })
    }

    /// Store a session until its expiry instant
    pub async fn save(&self, session: &Session) -> AppResult<()> {
        let ttl = (session.expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            return Err(AppError::Authentication("Session expired".to_string()));
        }

        let payload = serde_json::to_string(session)
            .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))?;

        let index = user_sessions_key(session.user_id);
        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .set_ex(session_key(session.session_id), payload, ttl as u64)
            .ignore()
            .sadd(&index, session.session_id.to_string())
            .ignore()
            .expire(&index, ttl)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    /// Load a session; `None` once it expired or was revoked
    pub async fn load(&self, session_id: Uuid) -> AppResult<Option<Session>> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(session_key(session_id)).await?;

        payload
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| AppError::Internal(format!("Corrupt session record: {}", e)))
            })
            .transpose()
    }

    /// Revoke a session
    pub async fn remove(&self, session: &Session) -> AppResult<()> {
        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .del(session_key(session.session_id))
            .ignore()
            .srem(user_sessions_key(session.user_id), session.session_id.to_string())
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    /// Revoke every session of `user_id` except `keep`; returns how many were dropped
    pub async fn remove_others(&self, user_id: Uuid, keep: Uuid) -> AppResult<usize> {
        let index = user_sessions_key(user_id);
        let mut conn = self.conn.clone();
        let members: Vec<String> = conn.smembers(&index).await?;

        let keep = keep.to_string();
        let others: Vec<String> = members.into_iter().filter(|id| *id != keep).collect();
        if others.is_empty() {
            return Ok(0);
        }

        let keys: Vec<String> = others.iter().map(session_key).collect();
        redis::pipe()
            .atomic()
            .del(&keys)
            .ignore()
            .srem(&index, &others)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(others.len())
    }

    /// Round-trip to Redis (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            session_key(id),
            "session:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_user_index_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            user_sessions_key(id),
            "user_sessions:00000000-0000-0000-0000-000000000000"
        );
        // Index members are stored as plain ids and map back to session keys
        assert_eq!(session_key(id.to_string()), session_key(id));
    }
}
