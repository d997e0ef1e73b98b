use std::borrow::Cow;

use super::target::BackendTarget;

/// 고정 접두사 아래의 인바운드 경로를 백엔드 URL로 바꿉니다.
///
/// 순수 문자열 변환이며 결과 경로의 유효성은 검사하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRewriter {
    prefix: String,
}

impl PathRewriter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// 경로가 접두사 경계 안에 있는지 확인합니다. `/api/proxyfoo`는 해당하지 않습니다.
    pub fn matches(&self, path_and_query: &str) -> bool {
        match path_and_query.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }

    /// 접두사를 제거합니다. 남은 경로가 비면 `/`가 됩니다.
    ///
    /// 접두사로 시작하지 않는 경로는 그대로 반환합니다.
    pub fn strip<'a>(&self, path_and_query: &'a str) -> Cow<'a, str> {
        let rest = path_and_query
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(path_and_query);

        if rest.is_empty() {
            Cow::Borrowed("/")
        } else if rest.starts_with('?') {
            Cow::Owned(format!("/{}", rest))
        } else {
            Cow::Borrowed(rest)
        }
    }

    pub fn target_url(&self, target: &BackendTarget, path_and_query: &str) -> String {
        target.join(&self.strip(path_and_query))
    }
}
