use std::sync::Arc;

use crate::config::AppConfig;
use crate::repositories::{PgStudentRepository, RepositoryError, StudentRepository};

pub struct AppState {
    pub config: AppConfig,
    pub students: Arc<dyn StudentRepository>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self, RepositoryError> {
        let students =
            PgStudentRepository::connect(&config.database_url, config.database_max_connections)
                .await?;

        Ok(Self::with_repository(config, Arc::new(students)))
    }

    pub fn with_repository(config: AppConfig, students: Arc<dyn StudentRepository>) -> Self {
        Self { config, students }
    }
}
