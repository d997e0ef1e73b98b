use hyper::header::{HeaderMap, HeaderName, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};

/// 한 전송 구간에만 의미가 있어 중계 경계를 넘기면 안 되는 헤더
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "transfer-encoding",
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "upgrade",
];

pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|hop| hop.eq_ignore_ascii_case(name))
}

/// 백엔드로 보낼 헤더. `Host`만 제외하고 값 순서까지 그대로 복사합니다.
///
/// `Host`는 아웃바운드 클라이언트가 백엔드 URL 기준으로 다시 채웁니다.
pub fn outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    copy_except(inbound, |name| name == HOST)
}

/// 호출자에게 돌려줄 헤더. hop-by-hop 헤더를 제외합니다.
pub fn relayed_headers(backend: &HeaderMap) -> HeaderMap {
    copy_except(backend, |name| is_hop_by_hop(name.as_str()))
}

/// 본문을 보내지 않을 때 남아 있는 프레이밍 헤더를 제거합니다.
pub fn strip_body_framing(headers: &mut HeaderMap) {
    headers.remove(CONTENT_LENGTH);
    headers.remove(TRANSFER_ENCODING);
}

fn copy_except(source: &HeaderMap, skip: impl Fn(&HeaderName) -> bool) -> HeaderMap {
    let mut copied = HeaderMap::with_capacity(source.keys_len());
    for (name, value) in source.iter() {
        if !skip(name) {
            copied.append(name.clone(), value.clone());
        }
    }
    copied
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{HeaderValue, CONTENT_TYPE, SET_COOKIE};

    #[test]
    fn test_hop_by_hop_case_insensitive() {
        for name in ["Connection", "KEEP-ALIVE", "Transfer-Encoding", "te", "Trailer", "Upgrade"] {
            assert!(is_hop_by_hop(name), "{}는 hop-by-hop이어야 함", name);
        }

        assert!(!is_hop_by_hop("Content-Type"));
        assert!(!is_hop_by_hop("Authorization"));
        assert!(!is_hop_by_hop("Host"));
        assert!(!is_hop_by_hop("trailers"));
    }

    #[test]
    fn test_outbound_headers_drop_host_only() {
        let mut inbound = HeaderMap::new();
        inbound.insert(HOST, HeaderValue::from_static("dashboard.example.com"));
        inbound.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        inbound.insert("connection", HeaderValue::from_static("keep-alive"));
        inbound.insert("authorization", HeaderValue::from_static("Bearer abc"));

        let outbound = outbound_headers(&inbound);
        assert!(outbound.get(HOST).is_none());
        assert_eq!(outbound[CONTENT_TYPE], "application/json");
        assert_eq!(outbound["authorization"], "Bearer abc");
        assert_eq!(outbound["connection"], "keep-alive");
        assert_eq!(outbound.len(), 3);
    }

    #[test]
    fn test_relayed_headers_drop_every_hop_by_hop_header() {
        let mut backend = HeaderMap::new();
        for name in HOP_BY_HOP_HEADERS {
            backend.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static("x"),
            );
        }
        backend.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        backend.insert("x-model-version", HeaderValue::from_static("1.0"));

        let relayed = relayed_headers(&backend);
        for name in HOP_BY_HOP_HEADERS {
            assert!(relayed.get(name).is_none(), "{}가 남아 있음", name);
        }
        assert_eq!(relayed[CONTENT_TYPE], "application/json");
        assert_eq!(relayed["x-model-version"], "1.0");
    }

    #[test]
    fn test_multi_value_headers_preserved_in_order() {
        let mut backend = HeaderMap::new();
        backend.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        backend.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let relayed = relayed_headers(&backend);
        let cookies: Vec<_> = relayed.get_all(SET_COOKIE).iter().collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_strip_body_framing() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("17"));
        headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        strip_body_framing(&mut headers);
        assert_eq!(headers.len(), 1);
        assert!(headers.contains_key(CONTENT_TYPE));
    }
}
