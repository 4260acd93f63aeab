use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{CollectionName, Database},
    errors::AppResult,
    models::domain::QuizResult,
};

#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult>;
    /// Newest first. `topic` narrows to results of quizzes on that topic.
    async fn list_by_user(&self, user_id: &str, topic: Option<&str>) -> AppResult<Vec<QuizResult>>;
}

pub struct MongoQuizResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoQuizResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection(CollectionName::QuizResults);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_topic_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "topic": 1 })
            .options(IndexOptions::builder().name("user_topic".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_topic_index).await?;

        log::info!("Successfully created indexes for quiz_results collection");
        Ok(())
    }
}

#[async_trait]
impl QuizResultRepository for MongoQuizResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn list_by_user(&self, user_id: &str, topic: Option<&str>) -> AppResult<Vec<QuizResult>> {
        let mut filter = doc! { "user_id": user_id };
        if let Some(topic) = topic {
            filter.insert("topic", topic);
        }

        let results = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }
}
