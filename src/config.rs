use std::env;

#[derive(Clone)]
pub struct Config {
    pub mongodb_url: String,
    pub database_name: String,
    pub server_addr: String,
}

impl Config {
    /// Reads straight from the process environment; `.env` loading happens
    /// once at startup.
    pub fn from_env() -> Self {
        Self {
            mongodb_url: env::var("MONGODB_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "hrms_lite".to_string()),
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_unset() {
        unsafe {
            env::remove_var("MONGODB_URL");
            env::remove_var("DATABASE_NAME");
            env::remove_var("SERVER_ADDR");
        }

        let config = Config::from_env();
        assert_eq!(config.mongodb_url, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "hrms_lite");
        assert_eq!(config.server_addr, "127.0.0.1:8080");
    }
}
