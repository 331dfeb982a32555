//! Server configuration from environment variables.

/// Runtime configuration, read once at startup.
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub scheduler_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("FIQ_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db_path: std::env::var("FIQ_DB_PATH").unwrap_or_else(|_| "financeiq.db".to_string()),
            scheduler_enabled: std::env::var("FIQ_SCHEDULER_ENABLED")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_truthy_forms() {
        for v in ["1", "true", "TRUE", "yes", "on", " True "] {
            assert!(parse_bool(v), "{v}");
        }
        for v in ["0", "false", "no", "off", ""] {
            assert!(!parse_bool(v), "{v}");
        }
    }
}
