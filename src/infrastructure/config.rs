use std::env;

#[derive(Clone)]
pub struct Config {
    pub library_path: String,
    pub orders_path: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            library_path: env::var("LIBRARY_PATH").unwrap_or_else(|_| "library.json".to_string()),
            orders_path: env::var("ORDERS_PATH").unwrap_or_else(|_| "orders.json".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
        }
    }
}
