use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::gateway::Upstream;
use crate::settings::ServerSettings;
use super::handler::RequestHandler;
use super::Result;

pub struct ServerListener {
    http_listener: TcpListener,
}

impl ServerListener {
    pub async fn bind(settings: &ServerSettings) -> Result<Self> {
        let addr = settings.socket_addr();
        let http_listener = TcpListener::bind(addr)
            .await
            .map_err(|e| {
                error!(error = %e, address = %addr, "HTTP 포트 바인딩 실패");
                e
            })?;

        info!(address = %http_listener.local_addr()?, "HTTP 리스너 시작");

        Ok(Self { http_listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.http_listener.local_addr()?)
    }

    /// 종료 신호가 올 때까지 연결을 받습니다. 진행 중인 연결은 각자의 태스크에서 끝까지 처리됩니다.
    pub async fn run_until<U, F>(self, handler: Arc<RequestHandler<U>>, shutdown: F) -> Result<()>
    where
        U: Upstream + 'static,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                result = self.http_listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            debug!(remote = %remote_addr, "연결 수락");
                            let handler = handler.clone();
                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                if let Err(err) = handler.handle_connection(io).await {
                                    error!(error = %err, "HTTP 연결 처리 실패");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "HTTP 연결 수락 실패");
                        }
                    }
                }

                _ = &mut shutdown => {
                    info!("종료 신호 수신, 리스너 중지");
                    return Ok(());
                }
            }
        }
    }

    pub async fn run<U>(self, handler: Arc<RequestHandler<U>>) -> Result<()>
    where
        U: Upstream + 'static,
    {
        self.run_until(handler, std::future::pending()).await
    }
}
