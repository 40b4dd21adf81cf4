use crate::{
    config::AppConfig,
    services::{api::RunPoolApi, session::SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: SessionStore,
    pub api: RunPoolApi,
}

impl AppState {
    pub fn new(config: AppConfig, session: SessionStore) -> Self {
        let api = RunPoolApi::new(config.api_base_url.clone());
        Self {
            config,
            session,
            api,
        }
    }
}
