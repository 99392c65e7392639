use std::env;

/// Application configuration loaded from environment variables.
/// Credentials are never embedded in source; everything external is
/// injected here with an explicit lifetime (owned by the binary).
#[derive(Debug, Clone)]
pub struct Config {
    // Postgres
    pub database_url: String,

    // Bearer token verification
    pub jwt_secret: String,
    pub jwt_issuer: String,

    // IDAnalyzer (KYC document scans)
    pub idanalyzer_api_key: String,
    pub idanalyzer_profile_id: String,
    pub idanalyzer_base_url: String,

    // Mono (disbursement + repayment virtual accounts)
    pub mono_base_url: String,
    pub mono_api_key: String,

    // HTTP server
    pub api_host: String,
    pub api_port: u16,

    /// When enabled, an IDAnalyzer "review" decision parks the user in
    /// KYC PENDING instead of collapsing into FAILED.
    pub kyc_manual_review: bool,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            jwt_secret: required_env("JWT_SECRET"),
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "jaycee".to_string()),
            idanalyzer_api_key: required_env("IDANALYZER_API_KEY"),
            idanalyzer_profile_id: required_env("IDANALYZER_PROFILE_ID"),
            idanalyzer_base_url: env::var("IDANALYZER_BASE_URL")
                .unwrap_or_else(|_| "https://api2.idanalyzer.com".to_string()),
            mono_base_url: env::var("MONO_BASE_URL")
                .unwrap_or_else(|_| "https://api.withmono.com".to_string()),
            mono_api_key: required_env("MONO_API_KEY"),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT must be a number"),
            kyc_manual_review: env::var("KYC_MANUAL_REVIEW")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
