use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use tracing::error;

/// 백엔드 상태 코드를 얻기 전에 발생한 전송 실패
///
/// 어떤 변형이든 호출자에게는 502로 전달됩니다. 백엔드가 돌려준 4xx/5xx는
/// 여기에 속하지 않고 그대로 중계됩니다.
#[derive(Debug)]
pub enum GatewayError {
    /// 백엔드 기본 URL이 유효하지 않음
    InvalidTarget {
        url: String,
        reason: String,
    },
    /// 재작성된 URL 등으로 백엔드 요청을 만들 수 없음
    InvalidRequest(hyper::http::Error),
    /// 인바운드 요청 본문 읽기 실패
    RequestBody(String),
    /// 백엔드 연결 또는 응답 헤더 수신 실패
    Upstream(hyper_util::client::legacy::Error),
    /// 백엔드 응답 본문 읽기 실패
    ResponseBody(hyper::Error),
    /// 백엔드 호출 제한 시간 초과
    Timeout(Duration),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::InvalidTarget { url, reason } =>
                write!(f, "유효하지 않은 백엔드 URL {}: {}", url, reason),
            GatewayError::InvalidRequest(e) =>
                write!(f, "백엔드 요청 생성 실패: {}", e),
            GatewayError::RequestBody(e) =>
                write!(f, "요청 본문 읽기 실패: {}", e),
            GatewayError::Upstream(e) =>
                write!(f, "백엔드 요청 실패: {}", error_chain(e)),
            GatewayError::ResponseBody(e) =>
                write!(f, "백엔드 응답 본문 읽기 실패: {}", error_chain(e)),
            GatewayError::Timeout(limit) =>
                write!(f, "백엔드 응답 시간 초과 ({}ms)", limit.as_millis()),
        }
    }
}

impl StdError for GatewayError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            GatewayError::InvalidRequest(e) => Some(e),
            GatewayError::Upstream(e) => Some(e),
            GatewayError::ResponseBody(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hyper::http::Error> for GatewayError {
    fn from(err: hyper::http::Error) -> Self {
        GatewayError::InvalidRequest(err)
    }
}

// hyper 클라이언트 에러는 "client error (Connect)"처럼 원인이 source에만 담겨 있음
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// 전송 실패를 502 JSON 응답으로 변환합니다.
pub fn bad_gateway(err: &GatewayError) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Bad gateway",
        "details": err.to_string(),
    });

    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = StatusCode::BAD_GATEWAY;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// 게이트웨이 경계 밖의 요청에 대한 404 JSON 응답
pub fn not_found() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from_static(br#"{"error":"Not found"}"#)))
        .unwrap_or_else(|e| {
            error!(error = %e, "404 응답 생성 실패");
            Response::new(Full::new(Bytes::from_static(b"Not found")))
        })
}
