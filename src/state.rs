use std::sync::Arc;

use crate::config::Config;

pub type SharedState = Arc<AppState>;

/// Handlers only read the configuration; each request opens its own
/// database connection from `config.database_path`.
pub struct AppState {
    pub config: Config,
}
