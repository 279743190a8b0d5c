use std::time::Duration;

use super::router::ServiceName;

/// Configuration for the dispatcher
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Base URL of the tomcat consumer instance
    pub tomcat_consumer_url: String,

    /// Base URL of the jetty consumer instance
    pub jetty_consumer_url: String,

    /// Base URL of the tomcat producer instance
    pub tomcat_producer_url: String,

    /// Base URL of the jetty producer instance
    pub jetty_producer_url: String,

    /// Timeout for a relayed request (milliseconds)
    pub request_timeout_ms: u64,

    /// Origin echoed in `Access-Control-Allow-Origin` on relayed responses
    pub allowed_origin: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            tomcat_consumer_url: "http://consumer:8080/consumer".to_string(),
            jetty_consumer_url: "http://consumer-jetty:8080/consumer".to_string(),
            tomcat_producer_url: "http://producer:8080/producer".to_string(),
            jetty_producer_url: "http://producer-jetty:8080/producer".to_string(),
            request_timeout_ms: 5000,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl DispatcherConfig {
    /// Set the base URL of one instance (builder pattern)
    pub fn with_endpoint(mut self, service: ServiceName, url: impl Into<String>) -> Self {
        let url = url.into();
        match service {
            ServiceName::TomcatConsumer => self.tomcat_consumer_url = url,
            ServiceName::JettyConsumer => self.jetty_consumer_url = url,
            ServiceName::TomcatProducer => self.tomcat_producer_url = url,
            ServiceName::JettyProducer => self.jetty_producer_url = url,
        }
        self
    }

    /// Set the relay timeout in milliseconds (builder pattern)
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Set the allowed CORS origin (builder pattern)
    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }

    pub fn endpoint(&self, service: ServiceName) -> &str {
        match service {
            ServiceName::TomcatConsumer => &self.tomcat_consumer_url,
            ServiceName::JettyConsumer => &self.jetty_consumer_url,
            ServiceName::TomcatProducer => &self.tomcat_producer_url,
            ServiceName::JettyProducer => &self.jetty_producer_url,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = DispatcherConfig::default();
        assert_eq!(
            config.endpoint(ServiceName::TomcatConsumer),
            "http://consumer:8080/consumer"
        );
        assert_eq!(
            config.endpoint(ServiceName::JettyProducer),
            "http://producer-jetty:8080/producer"
        );
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_with_endpoint() {
        let config = DispatcherConfig::default()
            .with_endpoint(ServiceName::JettyConsumer, "http://127.0.0.1:9001/consumer")
            .with_request_timeout_ms(750)
            .with_allowed_origin("*");

        assert_eq!(
            config.endpoint(ServiceName::JettyConsumer),
            "http://127.0.0.1:9001/consumer"
        );
        assert_eq!(
            config.endpoint(ServiceName::TomcatConsumer),
            "http://consumer:8080/consumer"
        );
        assert_eq!(config.request_timeout_ms, 750);
        assert_eq!(config.allowed_origin, "*");
    }
}
