use std::{env, net::SocketAddr, path::PathBuf};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub oauth_client_id: Option<String>,
    pub listen_addr: SocketAddr,
    pub session_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let raw_url =
            lookup("RUNPOOL_API_URL").unwrap_or_else(|| "http://localhost:8080".to_string());
        let api_base_url = Url::parse(&raw_url)
            .map_err(|err| AppError::Config(format!("invalid RUNPOOL_API_URL: {err}")))?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "RUNPOOL_API_URL must be http(s), got {}",
                api_base_url.scheme()
            )));
        }

        let oauth_client_id = lookup("RUNPOOL_OAUTH_CLIENT_ID").filter(|id| !id.trim().is_empty());

        let listen_addr: SocketAddr = lookup("APP_LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let session_file = lookup("RUNPOOL_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("runpool-session.json"));

        Ok(Self {
            api_base_url,
            oauth_client_id,
            listen_addr,
            session_file,
        })
    }
}
