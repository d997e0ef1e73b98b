//! 브라우저와 HTTP 전용 백엔드 사이의 포워딩 게이트웨이
//!
//! 요청 하나는 다음 순서로 처리됩니다.
//!
//! 1. 경로 재작성 ([`PathRewriter`])
//! 2. 헤더 필터링 ([`headers`])
//! 3. 본문 버퍼링 ([`body`])
//! 4. 백엔드 호출 후 응답 중계, 실패 시 502 합성 ([`error::bad_gateway`])
//!
//! 결과는 항상 두 가지 중 하나입니다. 백엔드가 어떤 상태 코드로든 응답하면
//! 그대로 중계하고, 상태 코드를 얻기 전에 전송이 실패하면 502를 돌려줍니다.

pub mod body;
pub mod error;
pub mod headers;
pub mod rewrite;
pub mod target;
pub mod upstream;

use std::time::{Duration, Instant};

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::header::{HeaderValue, CONTENT_LENGTH};
use hyper::http::request;
use hyper::{Request, Response};
use uuid::Uuid;

use crate::logging::{log_request, RequestLog};
use crate::settings::{BackendSettings, SettingsError};

pub use error::GatewayError;
pub use rewrite::PathRewriter;
pub use target::BackendTarget;
pub use upstream::{BackendResponse, HyperUpstream, OutgoingRequest, Upstream};

pub type RelayedResponse = Response<Full<Bytes>>;

/// 단일 백엔드로 요청을 중계하는 게이트웨이
///
/// 요청 간에 공유되는 상태는 모두 불변입니다.
pub struct Gateway<U = HyperUpstream> {
    target: BackendTarget,
    rewriter: PathRewriter,
    upstream: U,
    timeout: Duration,
}

impl Gateway<HyperUpstream> {
    pub fn from_settings(settings: &BackendSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::new(
            settings.target()?,
            PathRewriter::new(settings.path_prefix.clone()),
            HyperUpstream::new(),
            settings.timeout(),
        ))
    }
}

impl<U: Upstream> Gateway<U> {
    pub fn new(target: BackendTarget, rewriter: PathRewriter, upstream: U, timeout: Duration) -> Self {
        Self {
            target,
            rewriter,
            upstream,
            timeout,
        }
    }

    pub fn target(&self) -> &BackendTarget {
        &self.target
    }

    /// 이 게이트웨이가 처리할 경로인지 확인합니다.
    pub fn accepts(&self, path_and_query: &str) -> bool {
        self.rewriter.matches(path_and_query)
    }

    /// 요청을 백엔드로 중계하고 호출자에게 돌려줄 응답을 만듭니다.
    ///
    /// 실패는 모두 여기서 502 응답으로 바뀌므로 호출자는 항상 완전한 응답을 받습니다.
    pub async fn handle<B>(&self, req: Request<B>) -> RelayedResponse
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let start_time = Instant::now();
        let mut log = RequestLog::new(Uuid::new_v4().to_string());
        log.with_request(&req);

        let response = match self.relay(req, &mut log).await {
            Ok(backend) => {
                log.with_response(backend.status);
                relayed_response(backend)
            }
            Err(e) => {
                log.with_error(&e);
                error::bad_gateway(&e)
            }
        };

        log.duration_ms = start_time.elapsed().as_millis() as u64;
        log_request(&log);

        response
    }

    async fn relay<B>(&self, req: Request<B>, log: &mut RequestLog) -> Result<BackendResponse, GatewayError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let (parts, body) = req.into_parts();
        let body = body::buffer_body(&parts.method, body).await?;

        let outgoing = self.outgoing_request(&parts, body)?;
        log.with_target(&outgoing.uri().to_string());

        tokio::time::timeout(self.timeout, self.upstream.send(outgoing))
            .await
            .map_err(|_| GatewayError::Timeout(self.timeout))?
    }

    /// 인바운드 요청 헤드와 버퍼링된 본문으로 백엔드 요청을 만듭니다.
    pub fn outgoing_request(
        &self,
        parts: &request::Parts,
        body: Option<Bytes>,
    ) -> Result<OutgoingRequest, GatewayError> {
        let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
        let url = self.rewriter.target_url(&self.target, path_and_query);

        // 프레이밍 헤더는 인바운드 구간 기준이므로 버퍼 크기로 다시 정함
        let mut headers = headers::outbound_headers(&parts.headers);
        headers::strip_body_framing(&mut headers);
        if let Some(bytes) = &body {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
        }

        let mut outgoing = Request::builder()
            .method(parts.method.clone())
            .uri(url.as_str())
            .body(Full::new(body.unwrap_or_default()))?;
        *outgoing.headers_mut() = headers;

        Ok(outgoing)
    }
}

/// 백엔드 응답을 상태 코드와 본문은 그대로, 헤더는 hop-by-hop을 뺀 채 옮깁니다.
pub fn relayed_response(backend: BackendResponse) -> RelayedResponse {
    let mut response = Response::new(Full::new(backend.body));
    *response.status_mut() = backend.status;
    *response.headers_mut() = headers::relayed_headers(&backend.headers);
    response
}
