use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{CollectionName, Database},
    errors::AppResult,
    models::domain::Essay,
};

#[async_trait]
pub trait EssayRepository: Send + Sync {
    async fn create(&self, essay: Essay) -> AppResult<Essay>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Essay>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Essay>>;
}

pub struct MongoEssayRepository {
    collection: Collection<Essay>,
}

impl MongoEssayRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection(CollectionName::Essays);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_index).await?;
        Ok(())
    }
}

#[async_trait]
impl EssayRepository for MongoEssayRepository {
    async fn create(&self, essay: Essay) -> AppResult<Essay> {
        self.collection.insert_one(&essay).await?;
        Ok(essay)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Essay>> {
        let essay = self.collection.find_one(doc! { "id": id }).await?;
        Ok(essay)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Essay>> {
        let essays = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(essays)
    }
}
