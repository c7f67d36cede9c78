use crate::config::PlatformConfig;
use async_trait::async_trait;
use common::ProbeReport;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Everything that can go wrong between the probe and the remote execution
/// platform. The probe itself performs no error-prone logic; every failure
/// in this taxonomy originates at the platform boundary and surfaces to the
/// caller unretried.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("credential variable {var} is not set")]
    MissingCredentials { var: String },
    #[error("platform rejected the credential pair")]
    InvalidCredentials,
    #[error("platform endpoint unreachable")]
    Unreachable(#[source] reqwest::Error),
    #[error("platform reported deployment failure (status {status}): {body}")]
    RemoteFailure { status: u16, body: String },
    #[error("platform reply was not a probe report")]
    MalformedReply(#[source] reqwest::Error),
    #[error("no entrypoint named {name} is registered")]
    UnknownEntrypoint { name: String },
}

/// The opaque credential pair for the platform. Process-scoped, never
/// persisted. `Debug` redacts both values so they cannot leak through logs.
#[derive(Clone)]
pub struct Credentials {
    pub token_id: String,
    pub token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token_id", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read the credential pair from the two configured environment
    /// variables. An unset or empty variable is a hard failure.
    pub fn from_env(config: &PlatformConfig) -> Result<Self, PlatformError> {
        let token_id = read_var(&config.token_id_var)?;
        let token_secret = read_var(&config.token_secret_var)?;
        Ok(Self {
            token_id,
            token_secret,
        })
    }
}

fn read_var(var: &str) -> Result<String, PlatformError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PlatformError::MissingCredentials {
            var: var.to_string(),
        }),
    }
}

/// One invocation of an app entrypoint, as sent to the platform.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationRequest {
    pub app: String,
    pub entrypoint: String,
}

/// Seam between the runner and whatever executes the entrypoint.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, request: &InvocationRequest) -> Result<ProbeReport, PlatformError>;
}

/// Runs the entrypoint in-process. This is the path taken when no platform
/// endpoint is configured, and the seam the tests use.
pub struct LocalInvoker;

#[async_trait]
impl Invoker for LocalInvoker {
    async fn invoke(&self, request: &InvocationRequest) -> Result<ProbeReport, PlatformError> {
        match request.entrypoint.as_str() {
            "hello" => Ok(crate::runner::hello()),
            other => Err(PlatformError::UnknownEntrypoint {
                name: other.to_string(),
            }),
        }
    }
}

/// Sends the invocation to the platform endpoint over HTTP and parses the
/// probe report it returns.
pub struct RemoteInvoker {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl RemoteInvoker {
    pub fn new(
        endpoint: String,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PlatformError::Unreachable)?;
        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }
}

#[async_trait]
impl Invoker for RemoteInvoker {
    async fn invoke(&self, request: &InvocationRequest) -> Result<ProbeReport, PlatformError> {
        info!("Sending {}::{} to {}", request.app, request.entrypoint, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Token-Id", &self.credentials.token_id)
            .header("X-Token-Secret", &self.credentials.token_secret)
            .json(request)
            .send()
            .await
            .map_err(PlatformError::Unreachable)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlatformError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::RemoteFailure {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ProbeReport>()
            .await
            .map_err(PlatformError::MalformedReply)
    }
}
