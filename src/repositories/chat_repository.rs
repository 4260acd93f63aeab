use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{CollectionName, Database},
    errors::AppResult,
    models::domain::ChatInteraction,
};

#[async_trait]
pub trait ChatInteractionRepository: Send + Sync {
    async fn create(&self, interaction: ChatInteraction) -> AppResult<ChatInteraction>;
    /// Newest first.
    async fn recent_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<ChatInteraction>>;
}

pub struct MongoChatInteractionRepository {
    collection: Collection<ChatInteraction>,
}

impl MongoChatInteractionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection(CollectionName::ChatInteractions);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_index).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatInteractionRepository for MongoChatInteractionRepository {
    async fn create(&self, interaction: ChatInteraction) -> AppResult<ChatInteraction> {
        self.collection.insert_one(&interaction).await?;
        Ok(interaction)
    }

    async fn recent_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<ChatInteraction>> {
        let interactions = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(interactions)
    }
}
