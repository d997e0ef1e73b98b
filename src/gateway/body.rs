use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::Method;

use super::error::GatewayError;

/// GET/HEAD 이외의 메서드만 본문을 전달합니다.
pub fn carries_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

/// 인바운드 본문을 끝까지 읽어 하나의 버퍼로 만듭니다.
///
/// GET/HEAD는 본문을 읽지 않고 버리며, 비어 있는 본문도 `None`입니다.
pub async fn buffer_body<B>(method: &Method, body: B) -> Result<Option<Bytes>, GatewayError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    if !carries_body(method) {
        return Ok(None);
    }

    let bytes = body
        .collect()
        .await
        .map_err(|e| GatewayError::RequestBody(e.to_string()))?
        .to_bytes();

    Ok((!bytes.is_empty()).then_some(bytes))
}
