use benchline_events::message::MessageConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Warehouse webhook endpoint; run events are forwarded there when set.
    pub warehouse_url: Option<String>,
    /// Tag set the ONT plate factory resolves sample oligos against.
    pub ont_tag_set_name: String,
    /// Identity fields stamped on outbound warehouse messages.
    pub message: MessageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `WAREHOUSE_URL`        | unset (forwarding off)     |
    /// | `ONT_TAG_SET_NAME`     | `ont_native_96`            |
    /// | `LIMS_NAME`            | `benchline`                |
    /// | `ONT_INSTRUMENT_NAME`  | `GXB02004`                 |
    /// | `ONT_STUDY_UUID`       | empty                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let warehouse_url = std::env::var("WAREHOUSE_URL").ok().filter(|s| !s.is_empty());

        let ont_tag_set_name =
            std::env::var("ONT_TAG_SET_NAME").unwrap_or_else(|_| "ont_native_96".into());

        let message = MessageConfig {
            lims: std::env::var("LIMS_NAME").unwrap_or_else(|_| "benchline".into()),
            instrument_name: std::env::var("ONT_INSTRUMENT_NAME")
                .unwrap_or_else(|_| "GXB02004".into()),
            study_uuid: std::env::var("ONT_STUDY_UUID").unwrap_or_default(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            warehouse_url,
            ont_tag_set_name,
            message,
        }
    }
}
