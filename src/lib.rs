//! Forwarding Gateway는 HTTPS 오리진 뒤에서 HTTP 전용 백엔드로 요청을 중계하는
//! 경량 게이트웨이입니다.
//!
//! # 주요 기능
//!
//! - 고정 접두사 기반 경로 재작성
//! - `Host` 및 hop-by-hop 헤더 필터링
//! - 요청/응답 본문 전체 버퍼링 중계
//! - 전송 실패 시 502 JSON 응답 합성
//!
//! # 예제
//!
//! ```
//! use forwarding_gateway::gateway::{BackendTarget, PathRewriter};
//!
//! // 끝의 '/'는 제거됨
//! let target = BackendTarget::new("http://127.0.0.1:8000/").unwrap();
//! let rewriter = PathRewriter::new("/api/proxy");
//!
//! assert_eq!(
//!     rewriter.target_url(&target, "/api/proxy/predict"),
//!     "http://127.0.0.1:8000/predict"
//! );
//!
//! // 접두사만 남으면 루트 경로로 전달
//! assert_eq!(rewriter.target_url(&target, "/api/proxy"), "http://127.0.0.1:8000/");
//! ```
//!
//! # 헤더 필터링
//!
//! ```
//! use forwarding_gateway::gateway::headers::{relayed_headers, is_hop_by_hop};
//! use hyper::header::{HeaderMap, HeaderValue};
//!
//! let mut backend = HeaderMap::new();
//! backend.insert("content-type", HeaderValue::from_static("application/json"));
//! backend.insert("keep-alive", HeaderValue::from_static("timeout=5"));
//!
//! let relayed = relayed_headers(&backend);
//! assert!(relayed.contains_key("content-type"));
//! assert!(!relayed.contains_key("keep-alive"));
//! assert!(is_hop_by_hop("Transfer-Encoding"));
//! ```

pub mod gateway;
pub mod logging;
pub mod server;
pub mod settings;
