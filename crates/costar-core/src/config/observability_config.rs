use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive used when `COSTAR_LOG` is unset. Default: `costar=info`.
    pub log_filter: Option<String>,
    /// Emit JSON log lines. Default: false.
    pub json: Option<bool>,
}

impl ObservabilityConfig {
    pub fn effective_log_filter(&self) -> String {
        self.log_filter
            .clone()
            .unwrap_or_else(|| "costar=info".to_string())
    }

    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}
