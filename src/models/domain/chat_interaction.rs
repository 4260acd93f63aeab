use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatInteraction {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl ChatInteraction {
    pub fn new(user_id: &str, message: &str, response: &str) -> Self {
        ChatInteraction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            response: response.to_string(),
            created_at: Utc::now(),
        }
    }
}
