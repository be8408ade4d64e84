use crate::config::Config;
use crate::database::Database;

pub struct AppState {
    pub db: Database,
    pub config: Config,
}
