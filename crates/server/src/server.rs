//! MCP server over newline-delimited JSON-RPC.

use std::future::Future;

use cleanslate_tools::ToolRegistry;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::protocol::{
    CallParams, CallResult, PROTOCOL_VERSION, Request, Response, TextContent, error_codes,
};

pub const SERVER_NAME: &str = "cleanslate-mcp";

pub struct McpServer {
    tools: ToolRegistry,
}

impl McpServer {
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    /// Handle one raw line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Unparsable message");
                return Some(parse_error());
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: Request = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "Malformed request");
                return Some(Response::error(id, error_codes::INVALID_REQUEST, "Invalid request"));
            }
        };

        self.handle(request).await
    }

    pub async fn handle(&self, request: Request) -> Option<Response> {
        debug!(method = %request.method, "Request received");

        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => Response::success(id, initialize_result()),
            "ping" => Response::success(id, json!({})),
            "tools/list" => Response::success(id, json!({ "tools": self.tools.definitions() })),
            "tools/call" => self.call_tool(id, request.params).await,
            method => {
                warn!(method, "Unknown method");
                Response::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {method}"),
                )
            }
        };

        Some(response)
    }

    async fn call_tool(&self, id: Value, params: Value) -> Response {
        let params: CallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(_) => {
                return Response::error(id, error_codes::INVALID_PARAMS, "Missing tool name");
            }
        };

        let outcome = self.tools.call(&params.name, &params.arguments).await;

        let text = match serde_json::to_string_pretty(&outcome.payload) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Failed to encode tool result");
                return Response::error(id, error_codes::INTERNAL_ERROR, "Internal error");
            }
        };

        let result = CallResult {
            content: vec![TextContent::Text { text }],
            is_error: outcome.is_error.then_some(true),
        };

        match serde_json::to_value(result) {
            Ok(result) => Response::success(id, result),
            Err(_) => Response::error(id, error_codes::INTERNAL_ERROR, "Internal error"),
        }
    }

    /// Serve requests from `reader` until it ends or `shutdown` resolves.
    /// Requests are answered one at a time; shutdown is only observed while
    /// waiting for the next line. A line that is not UTF-8 gets a parse error.
    pub async fn serve<R, W, S>(&self, mut reader: R, mut writer: W, shutdown: S) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        let mut buf = Vec::new();
        tokio::pin!(shutdown);

        loop {
            buf.clear();
            let read = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                read = reader.read_until(b'\n', &mut buf) => read?,
            };

            if read == 0 {
                debug!("Input closed");
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim()).await,
                Err(err) => {
                    warn!(error = %err, "Message is not UTF-8");
                    Some(parse_error())
                }
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_vec(&response)?;
                encoded.push(b'\n');
                writer.write_all(&encoded).await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Serve on stdin/stdout until end of input, SIGINT or SIGTERM.
    pub async fn run(&self) -> std::io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        info!("CleanSlate MCP server started on stdio");
        let result = self.serve(stdin, stdout, shutdown_signal()).await;
        info!("CleanSlate MCP server stopped");
        result
    }
}

fn parse_error() -> Response {
    Response::error(Value::Null, error_codes::PARSE_ERROR, "Parse error")
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
