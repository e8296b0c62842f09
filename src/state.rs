use crate::{config::Config, db::DbPool, ml::MlClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub ml: Option<MlClient>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config, ml: Option<MlClient>) -> Self {
        Self { pool, config, ml }
    }
}
