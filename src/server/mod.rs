//! Bridge server
//!
//! Reads one JSON invocation per line and writes one JSON response per line.
//! The binary runs it over stdio; tests run it over in-memory buffers.

mod handlers;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::CommandRouter;
use crate::types::{BotResult, Invocation};

pub use handlers::*;

/// JSON-lines server in front of a command router
pub struct BridgeServer {
    router: CommandRouter,
}

impl BridgeServer {
    pub fn new(router: CommandRouter) -> Self {
        Self { router }
    }

    /// Serve until the reader hits end of input
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> BotResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let response = self.handle_line(trimmed).await;
            let json = serde_json::to_string(&response)?;
            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        log::info!("bridge input closed");
        Ok(())
    }

    /// Handle a single request line
    pub async fn handle_line(&self, line: &str) -> BridgeResponse {
        let mut request: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("unparseable bridge line: {}", e);
                return BridgeResponse::failure(Value::Null, PARSE_ERROR, e.to_string());
            }
        };

        let id = request
            .as_object_mut()
            .and_then(|obj| obj.remove("id"))
            .unwrap_or(Value::Null);

        let invocation: Invocation = match serde_json::from_value(request) {
            Ok(inv) => inv,
            Err(e) => return BridgeResponse::failure(id, INVALID_REQUEST, e.to_string()),
        };

        match self.router.dispatch(&invocation).await {
            Ok(reply) => BridgeResponse::success(id, reply),
            Err(err) => {
                log::debug!("command '{}' failed: {}", invocation.command, err);
                BridgeResponse::from_command_error(id, &err)
            }
        }
    }
}
