use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at start-up.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub genai_api_key: String,
    pub genai_base_url: String,
    /// Low-latency model used for classification and short insight lists.
    pub fast_model: String,
    /// Higher-capability model used for the executive report.
    pub pro_model: String,
    /// `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub feedback_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("genai_api_key", &"[redacted]")
            .field("genai_base_url", &self.genai_base_url)
            .field("fast_model", &self.fast_model)
            .field("pro_model", &self.pro_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("feedback_path", &self.feedback_path)
            .finish()
    }
}
