use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::models::notification::{ExpoPushMessage, PushToken};

const BROADCAST_QUEUE_SIZE: usize = 64;
const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    pub title: String,
    pub body: String,
}

/// Fire-and-forget broadcast delivery.
///
/// Callers enqueue onto a bounded channel and move on; a background worker
/// resolves device tokens and relays to the push service. No failure on
/// this path ever reaches the caller's response, it is only logged.
#[derive(Clone)]
pub struct NotificationService {
    sender: mpsc::Sender<BroadcastMessage>,
}

impl NotificationService {
    /// Spawn the delivery worker. Must be called from within the runtime.
    pub fn new(pool: PgPool) -> Self {
        let (sender, mut receiver) = mpsc::channel::<BroadcastMessage>(BROADCAST_QUEUE_SIZE);

        tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                if let Err(e) = deliver_broadcast(&pool, &message).await {
                    tracing::error!("Failed to deliver broadcast '{}': {}", message.title, e);
                }
            }
            tracing::info!("Notification worker shutting down");
        });

        Self { sender }
    }

    /// Enqueue a broadcast to every user with a registered device.
    /// A full queue drops the message rather than blocking the caller.
    pub fn broadcast_to_all(&self, title: String, body: String) {
        if let Err(e) = self.sender.try_send(BroadcastMessage { title, body }) {
            tracing::warn!("Dropping broadcast notification: {}", e);
        }
    }
}

async fn deliver_broadcast(pool: &PgPool, message: &BroadcastMessage) -> Result<(), String> {
    let tokens = sqlx::query_as::<_, PushToken>(
        "SELECT id, user_id, token, platform, is_active, created_at, updated_at
         FROM push_tokens WHERE is_active = true",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| format!("Database error fetching tokens: {}", e))?;

    if tokens.is_empty() {
        tracing::info!("No active push tokens, broadcast '{}' skipped", message.title);
        return Ok(());
    }

    let messages: Vec<ExpoPushMessage> = tokens
        .into_iter()
        .map(|t| ExpoPushMessage::new(t.token, message.title.clone(), message.body.clone()))
        .collect();

    tracing::info!(
        "Relaying broadcast '{}' to {} devices",
        message.title,
        messages.len()
    );

    let client = reqwest::Client::new();
    let response = client
        .post(EXPO_PUSH_URL)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .json(&messages)
        .send()
        .await
        .map_err(|e| format!("HTTP error: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("Push service error ({}): {}", status, error_text));
    }

    Ok(())
}
