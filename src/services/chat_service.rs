use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;
use validator::Validate;

use crate::{
    config::Config,
    constants::prompts,
    errors::AppResult,
    models::{domain::ChatInteraction, dto::request::ChatRequest},
    repositories::ChatInteractionRepository,
    services::text_generation::{generate_with_timeout, TextGenerator},
};

/// Most interactions kept for retry; older ones are dropped first.
pub const PENDING_CAPACITY: usize = 100;

/// Renders interactions (newest first) as chronological `Q:`/`A:` lines.
pub fn format_context(interactions: &[ChatInteraction]) -> String {
    interactions
        .iter()
        .rev()
        .flat_map(|i| [format!("Q: {}", i.message), format!("A: {}", i.response)])
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct ChatService {
    repository: Arc<dyn ChatInteractionRepository>,
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    context_size: i64,
    /// Interactions whose store failed; retried before the next store.
    pending: Mutex<Vec<ChatInteraction>>,
}

impl ChatService {
    pub fn new(
        repository: Arc<dyn ChatInteractionRepository>,
        generator: Arc<dyn TextGenerator>,
        config: &Config,
    ) -> Self {
        Self {
            repository,
            generator,
            timeout: config.generation_timeout(),
            context_size: config.chat_context_size,
            pending: Mutex::new(Vec::new()),
        }
    }

    async fn context_for(&self, user_id: &str) -> String {
        match self
            .repository
            .recent_by_user(user_id, 0, self.context_size)
            .await
        {
            Ok(interactions) => format_context(&interactions),
            Err(e) => {
                log::warn!("Could not load chat context for user '{}': {}", user_id, e);
                String::new()
            }
        }
    }

    async fn store(&self, interaction: ChatInteraction) {
        let mut batch: Vec<ChatInteraction> = self.pending.lock().await.drain(..).collect();
        batch.push(interaction);

        let mut failed = Vec::new();
        for interaction in batch {
            if let Err(e) = self.repository.create(interaction.clone()).await {
                log::warn!("Buffering chat interaction '{}': {}", interaction.id, e);
                failed.push(interaction);
            }
        }
        if failed.is_empty() {
            return;
        }

        let mut pending = self.pending.lock().await;
        // failures are older than anything buffered while the lock was released
        failed.append(&mut pending);
        if failed.len() > PENDING_CAPACITY {
            let dropped = failed.len() - PENDING_CAPACITY;
            log::warn!(
                "Chat buffer full; dropping {} oldest unsaved interaction(s)",
                dropped
            );
            failed.drain(..dropped);
        }
        *pending = failed;
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn reply(&self, user_id: &str, request: ChatRequest) -> AppResult<String> {
        request.validate()?;

        let context = self.context_for(user_id).await;
        let prompt = prompts::tutor_prompt(&context, &request.message);
        let reply = generate_with_timeout(self.generator.as_ref(), &prompt, self.timeout).await?;

        self.store(ChatInteraction::new(user_id, &request.message, &reply))
            .await;
        Ok(reply)
    }

    pub async fn history(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<ChatInteraction>> {
        self.repository.recent_by_user(user_id, offset, limit).await
    }
}
