use std::fmt;

use hyper::Uri;
use url::Url;

use super::error::GatewayError;

/// 게이트웨이의 유일한 업스트림 오리진
///
/// 프로세스 시작 시 한 번 만들어지고 이후 변경되지 않습니다. 끝의 `/` 하나는
/// 제거된 상태로 보관하므로 재작성된 경로를 그대로 이어 붙일 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    base: String,
}

impl BackendTarget {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let trimmed = base_url.trim();
        let base = trimmed.strip_suffix('/').unwrap_or(trimmed);

        let invalid = |reason: &str| GatewayError::InvalidTarget {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(base).map_err(|e| invalid(&e.to_string()))?;

        if parsed.scheme() != "http" {
            return Err(invalid("http 스킴만 지원합니다"));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(invalid("호스트가 없습니다"));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("쿼리나 프래그먼트를 포함할 수 없습니다"));
        }

        // 보관한 문자열은 그대로 요청 URI가 되므로 hyper 기준으로도 검사
        format!("{}/", base)
            .parse::<Uri>()
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self { base: base.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// 기본 URL 뒤에 재작성된 경로를 붙여 백엔드 URL을 만듭니다.
    pub fn join(&self, path: &str) -> String {
        let mut url = String::with_capacity(self.base.len() + path.len());
        url.push_str(&self.base);
        url.push_str(path);
        url
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let target = BackendTarget::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(target.as_str(), "http://127.0.0.1:8000");

        let target = BackendTarget::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(target.as_str(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_base_path_kept() {
        let target = BackendTarget::new("http://backend.local/v1/").unwrap();
        assert_eq!(target.join("/predict"), "http://backend.local/v1/predict");
    }

    #[test]
    fn test_invalid_targets() {
        let cases = [
            "not a url",
            "https://backend.local",
            "ftp://backend.local",
            "http://backend.local/?debug=1",
            "",
            "http://127.0.0.1:9/a b",
        ];

        for url in cases {
            assert!(
                matches!(BackendTarget::new(url), Err(GatewayError::InvalidTarget { .. })),
                "{:?}는 거부되어야 함",
                url
            );
        }
    }
}
