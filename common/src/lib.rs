use serde::{Deserialize, Serialize};

/// The fixed confirmation value the probe emits on a successful run.
///
/// This is the wire shape the remote execution platform returns for the
/// probe entrypoint, and the same shape the local stub produces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeReport {
    pub status: ProbeStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
}

impl ProbeReport {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Success,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, ProbeStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_wire_shape() {
        let report = ProbeReport::success("Hello from AI Deployment Intel!");
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"status":"success","message":"Hello from AI Deployment Intel!"}"#
        );
    }
}
