//! Session configuration

use std::time::Duration;

/// Configuration for a talk-back session
#[derive(Debug, Clone)]
pub struct TalkbackConfig {
    /// Per-operation network timeout, applied to each read and write
    /// individually (default: 5 seconds)
    pub timeout: Duration,

    /// Local UDP port offered in SETUP as `client_port=N-N+1`
    /// (default: 5000)
    pub client_port: u16,

    /// Username override; takes precedence over one embedded in the URL
    pub username: Option<String>,

    /// Password override; takes precedence over one embedded in the URL
    pub password: Option<String>,

    /// Dump complete requests and responses to the debug log
    pub debug_protocol: bool,
}

impl Default for TalkbackConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            client_port: 5000,
            username: None,
            password: None,
            debug_protocol: false,
        }
    }
}

impl TalkbackConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> TalkbackConfigBuilder {
        TalkbackConfigBuilder::default()
    }
}

/// Builder for [`TalkbackConfig`]
#[derive(Debug, Clone, Default)]
pub struct TalkbackConfigBuilder {
    config: TalkbackConfig,
}

impl TalkbackConfigBuilder {
    /// Set the per-operation timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the local RTP port offered in SETUP. The RTCP port is the
    /// next port up, so 0 and 65535 are rejected at session construction.
    #[must_use]
    pub fn client_port(mut self, port: u16) -> Self {
        self.config.client_port = port;
        self
    }

    /// Set explicit credentials, overriding any embedded in the URL
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    /// Enable full wire dumps at debug log level
    #[must_use]
    pub fn debug_protocol(mut self, enable: bool) -> Self {
        self.config.debug_protocol = enable;
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> TalkbackConfig {
        self.config
    }
}
