use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for a probe run, stored as JSON next to the
/// binary. A missing file is replaced with `ProbeConfig::default()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub app_name: String,
    pub entrypoint: String,
    pub platform: PlatformConfig,
}

/// How to reach the remote execution platform. With no `endpoint` the
/// entrypoint runs in-process instead of being sent anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub endpoint: Option<String>,
    pub token_id_var: String,
    pub token_secret_var: String,
    pub request_timeout_seconds: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            app_name: "ai-deployment-intel".to_string(),
            entrypoint: "hello".to_string(),
            platform: PlatformConfig {
                endpoint: None,
                token_id_var: "DEPLOY_TOKEN_ID".to_string(),
                token_secret_var: "DEPLOY_TOKEN_SECRET".to_string(),
                request_timeout_seconds: 30,
            },
        }
    }
}

impl ProbeConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_remote(&self) -> bool {
        self.platform.endpoint.is_some()
    }
}
