//! MCP server transports.
//!
//! Both transports share one dispatch path: JSON-RPC requests are routed to
//! the MCP method handlers (`initialize`, `tools/list`, `tools/call`) against
//! an immutable tool registry. STDIO reads line-delimited requests from stdin
//! and answers on stdout; HTTP serves the same protocol through Actix Web
//! alongside health, metrics, and SSE discovery endpoints.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use actix_web::http::header;
use actix_web::middleware::{Compress, DefaultHeaders, Logger};
use actix_web::{App, HttpResponse, HttpServer, Result, web};
use bytes::Bytes;
use futures_util::stream;
use serde_json::Value;
use tracing::{error, info};

use crate::core::config::ServerConfig;
use crate::core::protocol::{
    INVALID_PARAMS, MCP_PROTOCOL_VERSION, METHOD_NOT_FOUND, PARSE_ERROR, RpcRequest, RpcResponse,
};
use crate::core::registry::ToolRegistry;
use crate::tools;

/// Server identity shared across worker threads and reported by `initialize`.
#[derive(Clone)]
pub struct AppState {
    pub server_name: String,
    pub server_version: String,
}

impl AppState {
    fn from_config(config: &ServerConfig) -> Self {
        Self {
            server_name: config.name.clone(),
            server_version: config.version.clone(),
        }
    }
}

/// Route a parsed JSON-RPC request to its MCP method handler.
pub fn dispatch(state: &AppState, registry: &ToolRegistry, req: &RpcRequest) -> RpcResponse {
    match req.method.as_str() {
        "initialize" => handle_initialize(state, req.id.clone()),
        "tools/list" => handle_tools_list(registry, req.id.clone()),
        "tools/call" => handle_tools_call(registry, req.id.clone(), req.params.clone()),
        other => RpcResponse::failure(
            req.id.clone(),
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        ),
    }
}

fn handle_initialize(state: &AppState, id: Option<Value>) -> RpcResponse {
    RpcResponse::success(
        id,
        serde_json::json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": state.server_name,
                "version": state.server_version,
            },
        }),
    )
}

fn handle_tools_list(registry: &ToolRegistry, id: Option<Value>) -> RpcResponse {
    RpcResponse::success(id, serde_json::json!({ "tools": registry.tools() }))
}

/// Execute a tool call.
///
/// Tool failures (bad arguments) are tool results with `isError: true`; only
/// a missing params object or an unknown tool name is a protocol-level error.
fn handle_tools_call(
    registry: &ToolRegistry,
    id: Option<Value>,
    params: Option<Value>,
) -> RpcResponse {
    let Some(params) = params else {
        return RpcResponse::failure(id, INVALID_PARAMS, "Invalid params");
    };

    let name = params.get("name").and_then(Value::as_str).unwrap_or("");
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}));

    match registry.call(name, arguments) {
        Some(Ok(result)) => RpcResponse::success(id, tool_content(result.to_string(), false)),
        Some(Err(err)) => RpcResponse::success(id, tool_content(format!("Error: {err}"), true)),
        None => RpcResponse::failure(id, METHOD_NOT_FOUND, format!("Unknown tool: {name}")),
    }
}

/// MCP content envelope wrapping a tool's textual output.
fn tool_content(text: String, is_error: bool) -> Value {
    serde_json::json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

/// Liveness endpoint for load balancers and monitoring.
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "mod19-server",
    })))
}

/// Total requests processed since startup.
pub async fn metrics(counter: web::Data<AtomicU64>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "requests_total": counter.load(Ordering::Relaxed),
        "status": "ok",
    })))
}

/// JSON-RPC endpoint for HTTP mode.
pub async fn rpc(
    state: web::Data<AppState>,
    registry: web::Data<Arc<ToolRegistry>>,
    counter: web::Data<AtomicU64>,
    req: web::Json<RpcRequest>,
) -> Result<HttpResponse> {
    // Only atomicity is needed here, not ordering with other operations.
    counter.fetch_add(1, Ordering::Relaxed);
    Ok(HttpResponse::Ok().json(dispatch(&state, &registry, &req)))
}

/// Tool discovery as a single server-sent event.
pub async fn sse_tools(registry: web::Data<Arc<ToolRegistry>>) -> Result<HttpResponse> {
    let payload = serde_json::json!({
        "tools": registry.tools(),
        "count": registry.tools().len(),
    });
    let frame = Bytes::from(format!("data: {payload}\n\n"));

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(header::CacheControl(vec![
            header::CacheDirective::NoCache,
            header::CacheDirective::NoStore,
            header::CacheDirective::MustRevalidate,
        ]))
        // nginx would otherwise buffer the stream
        .insert_header(("x-accel-buffering", "no"))
        .streaming(stream::once(async move {
            Ok::<_, std::convert::Infallible>(frame)
        })))
}

/// Route and state configuration shared by the HTTP server and its tests.
pub fn configure(
    state: web::Data<AppState>,
    registry: web::Data<Arc<ToolRegistry>>,
    counter: web::Data<AtomicU64>,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(state.clone())
            .app_data(registry.clone())
            .app_data(counter.clone())
            .route("/health", web::get().to(health))
            .route("/metrics", web::get().to(metrics))
            .route("/sse", web::get().to(sse_tools))
            .route("/mcp", web::post().to(rpc))
            .route("/", web::post().to(rpc))
            .route("/", web::get().to(health));
    }
}

/// Run the server in HTTP mode.
///
/// Worker count defaults to the CPU count capped at 16 (override with
/// `WORKER_THREADS`); connection limits and timeouts are tuned for sustained
/// production traffic.
pub async fn run_http(config: ServerConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr();

    let state = web::Data::new(AppState::from_config(&config));
    let registry = web::Data::new(tools::initialize());
    // Shared across workers for the /metrics endpoint.
    let counter = web::Data::new(AtomicU64::new(0));

    let workers = std::env::var("WORKER_THREADS")
        .ok()
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or_else(|| num_cpus::get().clamp(1, 16));

    info!(
        name = %config.name,
        version = %config.version,
        addr = %bind_addr,
        workers,
        "starting MCP server (HTTP mode)"
    );

    HttpServer::new(move || {
        App::new()
            // Compress JSON responses (gzip/brotli)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-XSS-Protection", "1; mode=block")),
            )
            // %r = request line, %s = status, %Dms = duration in milliseconds
            .wrap(Logger::new("%r %s %Dms"))
            .configure(configure(state.clone(), registry.clone(), counter.clone()))
    })
    .workers(workers)
    .max_connections(10_000)
    .max_connection_rate(1_000)
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_secs(30))
    .client_disconnect_timeout(Duration::from_secs(2))
    .shutdown_timeout(10)
    .bind(&bind_addr)?
    .run()
    .await
}

/// Run the server in STDIO mode: read line-delimited JSON-RPC requests from
/// stdin, answer on stdout. Diagnostics go to stderr so stdout stays a clean
/// protocol stream.
pub async fn run_stdio(config: ServerConfig) -> std::io::Result<()> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

    info!(
        name = %config.name,
        version = %config.version,
        "starting MCP server (STDIO mode)"
    );

    let state = AppState::from_config(&config);
    let registry = tools::initialize();

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::with_capacity(8192, stdin).lines();
    let stdout = tokio::io::stdout();
    let mut stdout = BufWriter::with_capacity(8192, stdout);

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(req) => {
                // Notifications carry no id and get no response.
                if req.id.is_none() {
                    continue;
                }
                dispatch(&state, &registry, &req)
            }
            Err(err) => {
                error!(%err, "failed to parse request line");
                // A parse-error response needs an id recovered from the raw line.
                match recover_id(&line) {
                    Some(id) => {
                        RpcResponse::failure(Some(id), PARSE_ERROR, format!("Parse error: {err}"))
                    }
                    None => continue,
                }
            }
        };

        let json = serde_json::to_string(&response)?;
        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        // Flush per response so clients are not left waiting on a full buffer.
        stdout.flush().await?;
    }

    Ok(())
}

/// Best-effort extraction of the request id from a line that failed to parse
/// as a JSON-RPC request.
fn recover_id(line: &str) -> Option<Value> {
    serde_json::from_str::<Value>(line).ok()?.get("id").cloned()
}
