//! Configuration for the page scripts

/// Base path of the JSON API.
/// - Same-origin deployment: "/api"
/// - Split deployment: set `TOUTIAO_API_BASE` at build time
pub const DEFAULT_API_BASE: &str = match option_env!("TOUTIAO_API_BASE") {
    Some(base) => base,
    None => "/api",
};

/// Default `tracing` filter, overridable with `TOUTIAO_LOG` at build time.
pub const DEFAULT_LOG_FILTER: &str = match option_env!("TOUTIAO_LOG") {
    Some(filter) => filter,
    None => "info",
};

/// Where API requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every resource fragment is joined onto.
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ClientConfig {
    /// Config with an explicit base.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Join a resource fragment such as `post/3/like` onto the API base.
    pub fn endpoint(&self, resource: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let resource = resource.trim_start_matches('/');
        format!("{}/{}", base, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::ClientConfig;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = ClientConfig::new("/api/");
        assert_eq!(config.endpoint("/post/3/like"), "/api/post/3/like");
        assert_eq!(config.endpoint("user/9/follow"), "/api/user/9/follow");
    }

    #[test]
    fn absolute_base_is_kept() {
        let config = ClientConfig::new("https://example.com/api");
        assert_eq!(config.endpoint("post/1/comment"), "https://example.com/api/post/1/comment");
    }
}
