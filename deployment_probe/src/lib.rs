pub mod config;
pub mod platform;
pub mod runner;
pub mod validator;

pub use config::{PlatformConfig, ProbeConfig};
pub use platform::{Credentials, Invoker, LocalInvoker, PlatformError, RemoteInvoker};
pub use runner::{hello, ProbeRunner, ProbeState};
pub use validator::ValidationSuite;
