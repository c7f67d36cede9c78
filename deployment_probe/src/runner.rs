use crate::config::ProbeConfig;
use crate::platform::{Credentials, InvocationRequest, Invoker, LocalInvoker, PlatformError, RemoteInvoker};
use anyhow::{Context, Result};
use common::ProbeReport;
use std::time::Duration;
use tracing::info;

/// The message the probe entrypoint always emits.
pub const CONFIRMATION: &str = "Hello from AI Deployment Intel!";

/// The probe entrypoint. A trivial, side-effect-free computation whose only
/// purpose is to prove that code reached an execution environment and ran.
pub fn hello() -> ProbeReport {
    ProbeReport::success(CONFIRMATION)
}

/// Lifecycle of a single probe invocation. There are no intermediate
/// states, no retries, and no branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Invoked,
    Completed,
}

/// Drives one probe invocation: checks that the credential pair is present,
/// hands the entrypoint to the platform, and reports the confirmation back.
pub struct ProbeRunner {
    config: ProbeConfig,
    invoker: Box<dyn Invoker>,
    state: ProbeState,
}

impl ProbeRunner {
    /// Build a runner from configuration. The credential presence check
    /// happens here, in both local and remote mode, so a missing pair fails
    /// loudly before anything is invoked. The values go straight to the
    /// platform client and are never logged.
    pub fn from_config(config: ProbeConfig) -> Result<Self, PlatformError> {
        let credentials = Credentials::from_env(&config.platform)?;

        let invoker: Box<dyn Invoker> = match &config.platform.endpoint {
            Some(endpoint) => Box::new(RemoteInvoker::new(
                endpoint.clone(),
                credentials,
                Duration::from_secs(config.platform.request_timeout_seconds),
            )?),
            None => Box::new(LocalInvoker),
        };

        Ok(Self {
            config,
            invoker,
            state: ProbeState::Invoked,
        })
    }

    /// Build a runner around a caller-supplied invoker. Skips the
    /// credential check; used where the platform boundary is stubbed out.
    pub fn with_invoker(config: ProbeConfig, invoker: Box<dyn Invoker>) -> Self {
        Self {
            config,
            invoker,
            state: ProbeState::Invoked,
        }
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Run the probe once: `Invoked` -> `Completed`.
    pub async fn run(&mut self) -> Result<ProbeReport> {
        info!("=== Starting deployment probe for {} ===", self.config.app_name);
        self.state = ProbeState::Invoked;

        let request = InvocationRequest {
            app: self.config.app_name.clone(),
            entrypoint: self.config.entrypoint.clone(),
        };

        info!("Calling {}() on the platform...", request.entrypoint);
        let report = self
            .invoker
            .invoke(&request)
            .await
            .context("Probe invocation failed")?;

        self.state = ProbeState::Completed;
        info!("Got result back: {}", report.message);
        Ok(report)
    }
}
