use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub owner_id: i64,
    pub data_dir: PathBuf,
    pub http_port: u16,
    pub api_user: String,
    pub api_password: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let owner_id = env::var("OWNER_ID")
            .map_err(|_| anyhow!("OWNER_ID must be set"))?
            .trim()
            .parse()
            .map_err(|_| anyhow!("OWNER_ID must be a numeric Telegram user id"))?;

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let data_dir = if data_dir.trim().is_empty() {
            PathBuf::from("./data")
        } else {
            PathBuf::from(data_dir)
        };

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let api_user = env::var("API_USER").map_err(|_| anyhow!("API_USER must be set"))?;
        let api_password =
            env::var("API_PASSWORD").map_err(|_| anyhow!("API_PASSWORD must be set"))?;

        let jwt_secret = env::var("SECRET_KEY").map_err(|_| anyhow!("SECRET_KEY must be set"))?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("SECRET_KEY must be set"));
        }

        Ok(Config {
            telegram_bot_token: token,
            owner_id,
            data_dir,
            http_port,
            api_user,
            api_password,
            jwt_secret,
        })
    }
}
