use std::sync::Arc;

use anyhow::Context as _;

use crate::config::{Credentials, Settings};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub struct Global {
    pub config: Settings,
    pub credentials: Option<Credentials>,
    pub http_client: reqwest::Client,
}

impl Global {
    pub fn init(config: Settings) -> anyhow::Result<Arc<Self>> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("http client")?;

        let credentials = config.credentials();

        Ok(Arc::new(Self {
            config,
            credentials,
            http_client,
        }))
    }
}
