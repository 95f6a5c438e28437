//! Application Configuration
//!
//! Plain config structs; the binary fills them from the environment.

use platform::identity::IdentityTokenKey;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_APP_IDENTIFIER: &str = "ZK-Confession";

/// Storage network description served to the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub network: String,
    pub gateway_url: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub faucet_url: String,
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            network: "devnet".to_string(),
            gateway_url: "https://devnet.irys.xyz".to_string(),
            rpc_url: "https://rpc.devnet.irys.xyz/v1".to_string(),
            explorer_url: "https://devnet.irys.xyz".to_string(),
            faucet_url: "https://faucet.devnet.irys.xyz".to_string(),
        }
    }
}

/// Confession application configuration
#[derive(Debug, Clone)]
pub struct ConfessionConfig {
    /// Value of the `App` tag on every upload
    pub app_identifier: String,
    /// Verifies bearer tokens minted by the account service
    pub identity_key: IdentityTokenKey,
    pub network: NetworkInfo,
}

impl Default for ConfessionConfig {
    fn default() -> Self {
        Self {
            app_identifier: DEFAULT_APP_IDENTIFIER.to_string(),
            identity_key: IdentityTokenKey::disabled(),
            network: NetworkInfo::default(),
        }
    }
}

impl ConfessionConfig {
    /// Create config with a random identity secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            identity_key: IdentityTokenKey::new(platform::crypto::random_secret()),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }
}

/// Upload helper process configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Interpreter or executable to spawn
    pub command: String,
    /// Script passed as the first argument, if any
    pub script: Option<PathBuf>,
    /// Working directory of the helper
    pub working_dir: Option<PathBuf>,
    /// Bound on one whole request/reply exchange
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            command: "node".to_string(),
            script: Some(PathBuf::from("irys_service.js")),
            working_dir: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Moderation API configuration
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// Base URL; `None` disables moderation (every check fails open)
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ModerationConfig {
    /// Full URL of the moderation endpoint
    pub fn endpoint(&self) -> Option<String> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| format!("{}/v1/moderate", url.trim_end_matches('/')))
    }
}
