//! 仪表盘 HTTP 服务
//!
//! 只有一个路由 `GET /`，每次请求都会触发一次流量累计并渲染页面。

pub mod http;
pub mod render;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

use crate::error::{DashError, Result};
use crate::monitor::ServerMetrics;
use crate::tracker::TrafficTracker;
use self::http::{Method, Request, Response, Status};
pub use render::DashboardInfo;

/// 读取请求头的超时(秒)
const REQUEST_TIMEOUT_SECS: u64 = 10;

struct AppContext {
    tracker: Arc<TrafficTracker>,
    info: DashboardInfo,
    metrics: Arc<ServerMetrics>,
}

pub struct DashboardServer {
    listener: TcpListener,
    context: Arc<AppContext>,
}

impl DashboardServer {
    pub fn bind(
        addr: SocketAddr,
        tracker: Arc<TrafficTracker>,
        info: DashboardInfo,
        metrics: Arc<ServerMetrics>,
    ) -> Result<Self> {
        let listener = create_listener(addr)?;
        Ok(Self {
            listener,
            context: Arc::new(AppContext {
                tracker,
                info,
                metrics,
            }),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// 持续接受连接，直到 `shutdown` 完成
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down dashboard server");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            warn!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };

                    let context = Arc::clone(&self.context);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &context).await {
                            debug!("Connection from {} failed: {}", peer, e);
                        }
                    });
                }
            }
        }
    }
}

fn create_listener(addr: SocketAddr) -> Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        socket2::Domain::IPV4
    } else {
        socket2::Domain::IPV6
    };
    let socket = socket2::Socket::new(domain, socket2::Type::STREAM, None)
        .map_err(|e| DashError::Http(format!("Failed to create socket: {}", e)))?;

    // 重启后可以立刻重新绑定端口
    socket
        .set_reuse_address(true)
        .map_err(|e| DashError::Http(format!("Failed to set reuse address: {}", e)))?;
    socket
        .bind(&addr.into())
        .map_err(|e| DashError::Http(format!("Failed to bind {}: {}", addr, e)))?;
    socket
        .listen(128)
        .map_err(|e| DashError::Http(format!("Failed to listen on {}: {}", addr, e)))?;
    socket
        .set_nonblocking(true)
        .map_err(|e| DashError::Http(format!("Failed to set non-blocking mode: {}", e)))?;

    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}

async fn handle_connection(mut stream: TcpStream, context: &AppContext) -> Result<()> {
    let head = tokio::time::timeout(
        Duration::from_secs(REQUEST_TIMEOUT_SECS),
        http::read_request_head(&mut stream),
    )
    .await
    .map_err(|_| DashError::Timeout(REQUEST_TIMEOUT_SECS))??;

    let (response, include_body) = match http::parse_request_head(&head) {
        Ok(request) => {
            let include_body = request.method != Method::Head;
            (route(&request, context).await, include_body)
        }
        Err(e) => {
            debug!("Rejecting request: {}", e);
            (Response::text(Status::BAD_REQUEST, "bad request"), true)
        }
    };

    context
        .metrics
        .record_request(response.status.code < 500);

    stream.write_all(&response.encode(include_body)).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn route(request: &Request, context: &AppContext) -> Response {
    if request.path != "/" {
        return Response::text(Status::NOT_FOUND, "not found");
    }
    if request.method == Method::Other {
        return Response::text(Status::METHOD_NOT_ALLOWED, "method not allowed")
            .with_header("Allow", "GET, HEAD");
    }

    match index(context).await {
        Ok(page) => Response::html(page),
        Err(e) => {
            error!("Failed to update traffic totals: {}", e);
            Response::text(Status::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

async fn index(context: &AppContext) -> Result<String> {
    let tracker = Arc::clone(&context.tracker);
    // 读计数与读写文件都是阻塞操作
    let totals = tokio::task::spawn_blocking(move || tracker.poll()).await??;
    debug!(
        "{}: received {:.3} GB, transmitted {:.3} GB, remaining {:.3} GB",
        context.tracker.interface(),
        totals.received_gb,
        totals.transmitted_gb,
        totals.remaining_gb
    );
    Ok(render::render_dashboard(&context.info, &totals))
}
