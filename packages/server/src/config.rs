use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Shared secret for the bearer check on /browse and /search.
    pub api_secret: String,
    /// Base URL of the embedding/vector-index backend.
    pub embed_api_url: String,
    /// Contact identity sent in the Wikipedia User-Agent.
    pub contact: String,
    pub google_api_key: String,
    pub google_cx: String,
    /// Model whose tokenizer vocabulary the token budgeter uses.
    pub tokenizer_model: String,
    /// Input ceiling of the embedding backend, in tokens.
    pub embed_token_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8181".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            api_secret: env::var("API_SECRET").context("API_SECRET must be set")?,
            embed_api_url: env::var("EMBED_API_URL")
                .unwrap_or_else(|_| "http://db:4211".to_string()),
            contact: env::var("CONTACT").context("CONTACT must be set")?,
            google_api_key: env::var("GOOGLE_API_KEY").context("GOOGLE_API_KEY must be set")?,
            google_cx: env::var("GOOGLE_CX").context("GOOGLE_CX must be set")?,
            tokenizer_model: env::var("TOKENIZER_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo-16k".to_string()),
            embed_token_limit: env::var("EMBED_TOKEN_LIMIT")
                .unwrap_or_else(|_| "8190".to_string())
                .parse()
                .context("EMBED_TOKEN_LIMIT must be a valid number")?,
        })
    }
}
