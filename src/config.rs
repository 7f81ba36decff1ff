use bon::Builder;
use url::Url;

/// Which SynapsePay deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// The UAT sandbox.
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://uat-api.synapsefi.com/v3.1",
            Environment::Production => "https://api.synapsefi.com/v3.1",
        }
    }
}

/// Platform credentials and client identity sent with every request.
#[derive(Builder, Debug, Clone)]
pub struct ClientConfig {
    /// Platform client id.
    #[builder(into)]
    pub client_id: String,
    /// Platform client secret.
    #[builder(into)]
    pub client_secret: String,
    /// Device fingerprint of the end user.
    #[builder(into)]
    pub fingerprint: String,
    /// IP address of the end user.
    #[builder(into)]
    pub ip_address: String,
    #[builder(default)]
    pub environment: Environment,
    /// Overrides the environment's base URL, e.g. for a local proxy.
    pub base_url: Option<Url>,
}

impl ClientConfig {
    /// The base URL requests are resolved against, without a trailing slash.
    pub fn resolved_base_url(&self) -> String {
        let base = match &self.base_url {
            Some(url) => url.as_str(),
            None => self.environment.base_url(),
        };
        base.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .client_id("id")
            .client_secret("secret")
            .fingerprint("fp")
            .ip_address("127.0.0.1")
            .build()
    }

    #[test]
    fn test_defaults_to_sandbox() {
        let config = config();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(
            config.resolved_base_url(),
            "https://uat-api.synapsefi.com/v3.1"
        );
    }

    #[test]
    fn test_base_url_override() {
        let config = ClientConfig {
            environment: Environment::Production,
            base_url: Some(Url::parse("http://localhost:8080/v3.1/").unwrap()),
            ..config()
        };
        assert_eq!(config.resolved_base_url(), "http://localhost:8080/v3.1");
    }
}
