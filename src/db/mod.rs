use std::time::{Duration, Instant};

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "sathelp-server";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Every collection this service reads or writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Users,
    Quizzes,
    QuizResults,
    Essays,
    ChatInteractions,
}

impl CollectionName {
    pub const ALL: [CollectionName; 5] = [
        CollectionName::Users,
        CollectionName::Quizzes,
        CollectionName::QuizResults,
        CollectionName::Essays,
        CollectionName::ChatInteractions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Users => "users",
            CollectionName::Quizzes => "quizzes",
            CollectionName::QuizResults => "quiz_results",
            CollectionName::Essays => "essays",
            CollectionName::ChatInteractions => "chat_interactions",
        }
    }
}

/// Result of a successful readiness ping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PingReport {
    pub database: String,
    pub latency_ms: u64,
}

/// Driver options for `config`: stable API, a small pool and fail-fast timeouts.
pub async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

    options.app_name = Some(APP_NAME.to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(2);
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(CONNECT_TIMEOUT);

    Ok(options)
}

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;
        let db = Self {
            client,
            db_name: config.mongo_db_name.clone(),
        };

        let report = db.ping().await?;
        log::info!(
            "Connected to MongoDB database '{}' in {} ms",
            report.database,
            report.latency_ms
        );
        Ok(db)
    }

    pub fn collection<T>(&self, name: CollectionName) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.db_name).collection(name.as_str())
    }

    /// Round-trips a `ping` against the service database.
    pub async fn ping(&self) -> AppResult<PingReport> {
        let started = Instant::now();
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        Ok(PingReport {
            database: self.db_name.clone(),
            latency_ms: started.elapsed().as_millis() as u64,
        })
    }
}
