//! Stdio transport — reads JSON-RPC from stdin, writes to stdout.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::protocol::VisionHandler;
use crate::types::{JsonRpcError, ModuleError, ModuleResult, RequestId};

use super::framing;

/// Stdio transport for hosts that launch the module as a child process.
pub struct StdioTransport {
    handler: VisionHandler,
}

impl StdioTransport {
    pub fn new(handler: VisionHandler) -> Self {
        Self { handler }
    }

    /// Run the transport loop — reads from stdin, writes to stdout.
    /// Returns when the host closes stdin.
    pub async fn run(&self) -> ModuleResult<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        tracing::info!("stdio transport started");

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await.map_err(ModuleError::Io)?;

            if bytes_read == 0 {
                tracing::info!("EOF on stdin, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match framing::parse_message(trimmed) {
                Ok(msg) => {
                    if let Some(response) = self.handler.handle_message(msg).await {
                        let framed = framing::frame_message(&response)?;
                        stdout
                            .write_all(framed.as_bytes())
                            .await
                            .map_err(ModuleError::Io)?;
                        stdout.flush().await.map_err(ModuleError::Io)?;
                    }
                }
                Err(e) => {
                    tracing::warn!("parse error: {e}");
                    let error_response =
                        JsonRpcError::new(RequestId::Null, e.code(), e.to_string());
                    let value = serde_json::to_value(error_response)
                        .map_err(|e| ModuleError::InternalError(e.to_string()))?;
                    let framed = framing::frame_message(&value)?;
                    stdout
                        .write_all(framed.as_bytes())
                        .await
                        .map_err(ModuleError::Io)?;
                    stdout.flush().await.map_err(ModuleError::Io)?;
                }
            }
        }

        Ok(())
    }
}
