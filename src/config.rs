#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Secret concatenated with plaintext passwords before hashing. Optional
    /// at startup: a missing salt only fails the create operation.
    pub password_salt: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let password_salt = std::env::var("PASSWORD_SALT").ok();
        Ok(Self {
            database_url,
            password_salt,
        })
    }
}
