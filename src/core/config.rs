use axum::http::HeaderValue;
use dotenv::dotenv;
use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

const DEFAULT_TOKEN_SECRET: &str = "un segreto meno bello";

#[derive(Debug, Clone)]
pub struct Config {
    /// Full connection string, takes precedence over the DB_* parts
    pub database_url: Option<String>,
    pub db_user: String,
    pub db_pass: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub app_env: String,
    /// The only origin allowed to make credentialed cross-origin requests
    pub client_origin: HeaderValue,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok();

        let db_user = env::var("DB_USER").unwrap_or_else(|_| "root".to_string());
        let db_pass = env::var("DB_PASS").unwrap_or_default();
        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT")
            .unwrap_or_else(|_| "3306".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid DB_PORT: must be a number between 0-65535".to_string())?;
        let db_name = env::var("DB_NAME").unwrap_or_else(|_| "soloSphereDB".to_string());

        if database_url.is_none() && env::var("DB_USER").is_err() {
            return Err("Either DATABASE_URL or DB_USER/DB_PASS must be set in .env file".to_string());
        }

        let jwt_secret = env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            warn!("ACCESS_TOKEN_SECRET not set, using default (not secure for production!)");
            DEFAULT_TOKEN_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let connection_lifetime_secs = env::var("DB_CONNECTION_LIFETIME_SECS")
            .unwrap_or_else(|_| "1800".to_string())
            .parse::<u64>()
            .map_err(|_| "Invalid DB_CONNECTION_LIFETIME_SECS: must be a positive number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let client_origin = env::var("CLIENT_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());
        let client_origin = HeaderValue::from_str(&client_origin)
            .map_err(|_| format!("Invalid CLIENT_ORIGIN: {}", client_origin))?;

        Ok(Config {
            database_url,
            db_user,
            db_pass,
            db_host,
            db_port,
            db_name,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            connection_lifetime_secs,
            app_env,
            client_origin,
        })
    }

    /// Production mode switches the session cookie to `Secure; SameSite=None`
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Builds the MySQL connection options, either from DATABASE_URL or from the
    /// individual credentials (no URL escaping needed for the password this way)
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, sqlx::Error> {
        match &self.database_url {
            Some(url) => MySqlConnectOptions::from_str(url),
            None => Ok(MySqlConnectOptions::new()
                .host(&self.db_host)
                .port(self.db_port)
                .username(&self.db_user)
                .password(&self.db_pass)
                .database(&self.db_name)),
        }
    }

    /// Stampa la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        let database = match &self.database_url {
            Some(url) => Self::mask_url(url),
            None => format!(
                "mysql://{}:***@{}:{}/{}",
                self.db_user, self.db_host, self.db_port, self.db_name
            ),
        };
        info!("Server configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Allowed Origin: {:?}", self.client_origin);
        info!("   Database: {}", database);
        info!("   Max DB Connections: {}", self.max_connections);
        info!("   Connection Lifetime: {}s", self.connection_lifetime_secs);
        if self.jwt_secret == DEFAULT_TOKEN_SECRET {
            warn!("   Token Secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("   Token Secret: custom secret configured");
        }
    }

    /// Maschera l'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}
