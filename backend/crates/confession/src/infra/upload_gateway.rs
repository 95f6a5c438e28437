//! Upload helper process client
//!
//! The helper is a short-lived process per call: one JSON request on stdin,
//! free-form logging on stdout, and the JSON reply as the last non-empty
//! stdout line.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::config::GatewayConfig;
use crate::domain::gateway::{
    UploadError, UploadGateway, UploadReceipt, UploadRequest, UploadTag, WalletBalance,
};

#[derive(Debug, Serialize)]
struct HelperRequest<'a> {
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
    tags: &'a [UploadTag],
}

#[derive(Debug, Deserialize)]
struct HelperReply {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    tx_id: Option<String>,
    #[serde(default)]
    gateway_url: Option<String>,
    #[serde(default)]
    explorer_url: Option<String>,
    #[serde(default)]
    timestamp: Option<serde_json::Value>,
    #[serde(default)]
    balance: Option<String>,
    #[serde(default)]
    formatted: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

impl HelperReply {
    /// Reject `success = false` replies
    fn into_success(self) -> Result<Self, UploadError> {
        if self.success {
            Ok(self)
        } else {
            Err(UploadError::Rejected(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

fn required(field: Option<String>, name: &str) -> Result<String, UploadError> {
    field
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| UploadError::Malformed(format!("missing {name}")))
}

/// Pick the reply out of the helper's stdout
fn parse_reply(stdout: &str) -> Result<HelperReply, UploadError> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(UploadError::EmptyReply)?;

    serde_json::from_str(line).map_err(|e| UploadError::Malformed(e.to_string()))
}

/// Upload gateway backed by an external helper process
#[derive(Debug, Clone)]
pub struct ProcessUploadGateway {
    config: GatewayConfig,
}

impl ProcessUploadGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.command);
        if let Some(script) = &self.config.script {
            cmd.arg(script);
        }
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// One request/reply exchange, bounded by the configured timeout
    async fn call(&self, request: HelperRequest<'_>) -> Result<HelperReply, UploadError> {
        let payload =
            serde_json::to_vec(&request).map_err(|e| UploadError::Malformed(e.to_string()))?;

        let exchange = async {
            let mut child = self
                .command()
                .spawn()
                .map_err(|e| UploadError::Spawn(e.to_string()))?;

            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(&payload)
                    .await
                    .map_err(|e| UploadError::Io(e.to_string()))?;
                // Closing stdin signals end of request
                drop(stdin);
            }

            child
                .wait_with_output()
                .await
                .map_err(|e| UploadError::Io(e.to_string()))
        };

        // On timeout the child is dropped and killed
        let output = tokio::time::timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| UploadError::Timeout(self.config.timeout))??;

        if !output.status.success() {
            tracing::warn!(
                action = request.action,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Upload helper exited unsuccessfully"
            );
            return Err(UploadError::Exited(output.status.to_string()));
        }

        parse_reply(&String::from_utf8_lossy(&output.stdout))
    }
}

impl UploadGateway for ProcessUploadGateway {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, UploadError> {
        let reply = self
            .call(HelperRequest {
                action: "upload",
                data: Some(&request.data),
                tags: &request.tags,
            })
            .await?
            .into_success()?;

        let receipt = UploadReceipt {
            tx_id: required(reply.tx_id, "tx_id")?,
            gateway_url: required(reply.gateway_url, "gateway_url")?,
            explorer_url: required(reply.explorer_url, "explorer_url")?,
            timestamp: reply.timestamp.as_ref().and_then(serde_json::Value::as_i64),
        };

        tracing::debug!(tx_id = %receipt.tx_id, "Upload helper stored document");
        Ok(receipt)
    }

    async fn balance(&self) -> Result<WalletBalance, UploadError> {
        let reply = self
            .call(HelperRequest {
                action: "balance",
                data: None,
                tags: &[],
            })
            .await?
            .into_success()?;

        let balance = required(reply.balance, "balance")?;
        Ok(WalletBalance {
            formatted: reply.formatted.unwrap_or_else(|| balance.clone()),
            balance,
        })
    }

    async fn address(&self) -> Result<String, UploadError> {
        let reply = self
            .call(HelperRequest {
                action: "address",
                data: None,
                tags: &[],
            })
            .await?
            .into_success()?;

        required(reply.address, "address")
    }
}
