use std::time::Duration;

/// Paths of the backend endpoints, joined onto [`ApiSettings::base_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub config: String,
    pub modules: String,
    pub environments: String,
    pub cancel: String,
    pub deploy: String,
    pub sync: String,
    pub version: String,
    pub ship: String,
    pub create_module: String,
    pub release: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            config: "/api/config".to_string(),
            modules: "/api/modules".to_string(),
            environments: "/api/environments".to_string(),
            cancel: "/api/cancel".to_string(),
            deploy: "/api/deploy".to_string(),
            sync: "/api/sync".to_string(),
            version: "/api/version".to_string(),
            ship: "/api/ship".to_string(),
            create_module: "/api/modules/create".to_string(),
            release: "/api/modules/release".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Applies to JSON requests; operation streams run until the backend closes them.
    pub request_timeout: Duration,
    pub endpoints: Endpoints,
}

impl ApiSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            endpoints: Endpoints::default(),
        }
    }
}
