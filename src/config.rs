use std::env;

/// Fallback signing key used when JWT_SECRET is absent from the environment.
const DEFAULT_JWT_SECRET: &str = "a_chave_secreta_para_seu_sistema_de_comanda";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret: jwt_secret(),
        })
    }
}

/// Shared secret used to sign and verify bearer tokens.
pub fn jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string())
}
