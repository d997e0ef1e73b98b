use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{HeaderMap, Request, StatusCode};
use hyper_util::client::legacy;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use super::error::GatewayError;

pub type OutgoingRequest = Request<Full<Bytes>>;

/// 본문까지 모두 수신한 백엔드 응답
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// 백엔드로 요청을 보내는 전송 계층
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, req: OutgoingRequest) -> Result<BackendResponse, GatewayError>;
}

/// hyper 커넥션 풀 기반의 HTTP/1 전송
#[derive(Clone)]
pub struct HyperUpstream {
    client: legacy::Client<HttpConnector, Full<Bytes>>,
}

impl HyperUpstream {
    pub fn new() -> Self {
        let connector = HttpConnector::new();
        let client = legacy::Client::builder(TokioExecutor::new())
            .build::<_, Full<Bytes>>(connector);

        Self { client }
    }
}

impl Default for HyperUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Upstream for HyperUpstream {
    async fn send(&self, req: OutgoingRequest) -> Result<BackendResponse, GatewayError> {
        let res = self.client.request(req).await.map_err(GatewayError::Upstream)?;

        let (parts, body) = res.into_parts();
        let body = body
            .collect()
            .await
            .map_err(GatewayError::ResponseBody)?
            .to_bytes();
        debug!(status = %parts.status, bytes_size = body.len(), "Backend response collected");

        Ok(BackendResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}
