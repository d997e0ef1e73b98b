pub mod handler;
pub mod listener;
pub mod error;

pub type Result<T> = std::result::Result<T, Error>;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::gateway::Gateway;
use crate::settings::Settings;
pub use error::Error;
pub use handler::RequestHandler;
pub use listener::ServerListener;

/// 설정으로 조립된 게이트웨이 서버
pub struct GatewayServer {
    listener: ServerListener,
    handler: Arc<RequestHandler>,
}

impl GatewayServer {
    pub async fn bind(settings: &Settings) -> Result<Self> {
        let gateway = Gateway::from_settings(&settings.backend)?;
        info!(
            backend = %gateway.target(),
            prefix = %settings.backend.path_prefix,
            timeout_secs = settings.backend.timeout_secs,
            "게이트웨이 초기화"
        );

        let listener = ServerListener::bind(&settings.server).await?;

        Ok(Self {
            listener,
            handler: Arc::new(RequestHandler::new(gateway)),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn run(self) -> Result<()> {
        self.listener.run(self.handler).await
    }

    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.listener.run_until(self.handler, shutdown).await
    }
}
