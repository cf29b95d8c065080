//! Process configuration from environment variables.

use std::env;

const DEFAULT_SUPPLIER_URL: &str = "https://supplier.example.com/api/v1";

/// Upstream dropshipping supplier. A missing token is demo mode, not an
/// error: both gateways then fabricate plausible responses locally.
#[derive(Clone, Debug)]
pub struct SupplierConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl SupplierConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("SUPPLIER_API_URL").unwrap_or_else(|_| DEFAULT_SUPPLIER_URL.to_string()),
            api_token: env::var("SUPPLIER_API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
        }
    }

    /// Configuration with no credential; used by tests and demo deployments.
    pub fn demo() -> Self {
        Self { base_url: DEFAULT_SUPPLIER_URL.to_string(), api_token: None }
    }

    pub fn is_demo(&self) -> bool {
        self.api_token.is_none()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub supplier: SupplierConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080);
        Self { port, supplier: SupplierConfig::from_env() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let cfg = SupplierConfig { base_url: "https://api.example.com/v1/".into(), api_token: None };
        assert_eq!(cfg.endpoint("/products"), "https://api.example.com/v1/products");
    }

    #[test]
    fn test_demo_config_has_no_credential() {
        assert!(SupplierConfig::demo().is_demo());
    }
}
