use std::sync::Arc;

use crate::{config::Config, database::DatabaseConnection, database::models::history::ArchiveHistory};

/// Global state shared across all requests.
pub type SharedGlobal = Arc<Global>;

pub struct Global {
    pub config: Config,
    pub database: Arc<DatabaseConnection>,
    pub history: ArchiveHistory,
}
