/// Configuration constants for the AWX API
pub mod api {
    /// Base path for AWX API v2
    pub const BASE_PATH: &str = "/api/v2";

    /// Default page size requested from list endpoints
    pub const DEFAULT_PAGE_SIZE: u32 = 25;
}

/// Environment variable names used by `AwxClient::from_env`
pub mod env {
    /// AWX host, e.g. "awx.example.com"
    pub const HOST: &str = "AWX_HOST";

    /// Personal access token (takes precedence over username/password)
    pub const TOKEN: &str = "AWX_TOKEN";

    /// Username for basic authentication
    pub const USERNAME: &str = "AWX_USERNAME";

    /// Password for basic authentication
    pub const PASSWORD: &str = "AWX_PASSWORD";
}
