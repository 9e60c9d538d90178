use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered push device, owned by the notification collaborator.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PushToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub platform: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Message shape the Expo push relay accepts.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpoPushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    pub sound: Option<String>,
    pub priority: Option<String>,
}

impl ExpoPushMessage {
    pub fn new(token: String, title: String, body: String) -> Self {
        Self {
            to: token,
            title,
            body,
            sound: Some("default".to_string()),
            priority: Some("high".to_string()),
        }
    }
}
