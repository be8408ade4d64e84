use dotenv::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub bind_addr: String,
    pub seed_on_startup: bool,
}

impl Config {
    /// Reads configuration from the environment (and a `.env` file when
    /// present), with working defaults for local development.
    pub fn init() -> Config {
        dotenv().ok();
        let db_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| String::from("sqlite://employees.db"));
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| String::from("0.0.0.0:8080"));
        let seed_on_startup = env::var("SEED_ON_STARTUP")
            .map(|value| !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Config {
            db_url,
            bind_addr,
            seed_on_startup,
        }
    }
}
