use dotenvy::dotenv;
use std::env;

/// Process-level configuration, read once by the composition root and handed
/// into the component constructors. Missing required variables are fatal at
/// startup; nothing here is read lazily at request time.
#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub token_ttl: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_ttl: env::var("TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .expect("TOKEN_TTL must be a number of seconds"),
        }
    }
}
