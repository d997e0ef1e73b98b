use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioTimer;
use tracing::debug;

use crate::gateway::{error::not_found, Gateway, Upstream};

/// 호스팅 어댑터: 접두사 아래 요청만 게이트웨이로 넘깁니다.
pub struct RequestHandler<U = crate::gateway::HyperUpstream> {
    gateway: Gateway<U>,
}

impl<U: Upstream> RequestHandler<U> {
    pub fn new(gateway: Gateway<U>) -> Self {
        Self { gateway }
    }

    pub async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, Infallible> {
        let path_and_query = req.uri().path_and_query().map_or("/", |pq| pq.as_str());

        if !self.gateway.accepts(path_and_query) {
            debug!(method = %req.method(), path = %path_and_query, "게이트웨이 경로가 아닌 요청");
            return Ok(not_found());
        }

        Ok(self.gateway.handle(req).await)
    }

    pub async fn handle_connection<I>(&self, io: I) -> std::result::Result<(), hyper::Error>
    where
        I: hyper::rt::Read + hyper::rt::Write + Unpin,
    {
        http1::Builder::new()
            .timer(TokioTimer::new())
            .serve_connection(
                io,
                service_fn(|req| self.handle_request(req)),
            )
            .await
    }
}
