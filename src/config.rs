#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_dispatch_depth: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let api_base_url = env_required("ACTIONFLOW_API_URL")?;

        let request_timeout_secs: u64 = env_or("ACTIONFLOW_REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid ACTIONFLOW_REQUEST_TIMEOUT_SECS: {e}"))?;

        let max_dispatch_depth: u32 = env_or("ACTIONFLOW_MAX_DISPATCH_DEPTH", "8")
            .parse()
            .map_err(|e| format!("Invalid ACTIONFLOW_MAX_DISPATCH_DEPTH: {e}"))?;

        let log_level = env_or("ACTIONFLOW_LOG_LEVEL", "info");

        Ok(Config {
            api_base_url,
            request_timeout_secs,
            max_dispatch_depth,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
