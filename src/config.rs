use anyhow::anyhow;

#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub api_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| anyhow!("JWT_SECRET not found"))?;

        let database_url = std::env::var("DATABASE_URL").ok();

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let api_prefix = std::env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string());

        Ok(AppConfig {
            jwt_secret,
            database_url,
            bind_addr,
            api_prefix,
        })
    }
}
