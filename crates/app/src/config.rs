use grimoire_core::Locale;

/// Front-end configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against the
/// course backend; override via environment variables (a `.env` file is
/// loaded first by `main`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Spell API base path (default: `http://localhost:5000/api`).
    pub api_base_url: String,
    /// Identity provider base URL (default: the Identity Toolkit v1
    /// endpoint).
    pub auth_base_url: String,
    /// Identity provider web API key.
    pub auth_api_key: String,
    /// Startup locale (default: `fr`).
    pub locale: Locale,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var         | Default                                        |
    /// |-----------------|------------------------------------------------|
    /// | `API_BASE_URL`  | `http://localhost:5000/api`                    |
    /// | `AUTH_BASE_URL` | `https://identitytoolkit.googleapis.com/v1`    |
    /// | `AUTH_API_KEY`  | (empty)                                        |
    /// | `LOCALE`        | `fr`                                           |
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000/api".into());

        let auth_base_url = std::env::var("AUTH_BASE_URL")
            .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".into());

        let auth_api_key = std::env::var("AUTH_API_KEY").unwrap_or_default();

        let locale = std::env::var("LOCALE")
            .ok()
            .and_then(|value| Locale::parse(&value))
            .unwrap_or_default();

        Self {
            api_base_url,
            auth_base_url,
            auth_api_key,
            locale,
        }
    }
}
