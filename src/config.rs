use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub api_id: i32,
    pub api_hash: String,
    pub phone: String,
    pub chat_title: String,
    pub session_path: PathBuf,
}

impl Config {
    pub fn new(
        api_id: i32,
        api_hash: String,
        phone: String,
        chat_title: String,
        session_path: Option<PathBuf>,
    ) -> Result<Self> {
        if api_id <= 0 {
            return Err(Error::Config(format!("api id must be positive, got {api_id}")));
        }
        let api_hash = require("api hash", api_hash)?;
        let phone = require("phone number", phone)?;
        if chat_title.is_empty() {
            return Err(Error::Config("chat title is empty".to_string()));
        }
        let session_path = session_path.unwrap_or_else(|| default_data_dir().join(SESSION_FILE_NAME));

        Ok(Self {
            api_id,
            api_hash,
            phone,
            chat_title,
            session_path,
        })
    }
}

const SESSION_FILE_NAME: &str = "user.session";

fn require(name: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Config(format!("{name} is empty")));
    }
    Ok(trimmed.to_string())
}

fn default_data_dir() -> PathBuf {
    let base = env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    base.join(".local").join("share").join("tg-members")
}
