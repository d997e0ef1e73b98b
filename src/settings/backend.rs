use serde::Deserialize;
use std::env;
use std::time::Duration;
use crate::gateway::BackendTarget;
use super::{server::parse_env_var, SettingsError};

pub const DEFAULT_PATH_PREFIX: &str = "/api/proxy";

/// 백엔드 오리진 설정
///
/// `base_url`에는 기본값이 없습니다. 설정되지 않으면 검증 단계에서 실패합니다.
#[derive(Clone, Debug, Deserialize)]
pub struct BackendSettings {
    /// 백엔드 기본 URL (예: http://10.0.0.5:8000)
    #[serde(default)]
    pub base_url: Option<String>,

    /// 게이트웨이가 처리하는 경로 접두사
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// 백엔드 호출 제한 시간 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_path_prefix() -> String { DEFAULT_PATH_PREFIX.to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl BackendSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let base_url = env::var("BACKEND_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let settings = Self {
            base_url,
            path_prefix: env::var("PROXY_PATH_PREFIX").unwrap_or_else(|_| default_path_prefix()),
            timeout_secs: parse_env_var("PROXY_BACKEND_TIMEOUT", default_timeout_secs)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.target()?;

        let prefix = &self.path_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(SettingsError::InvalidConfig {
                field: "backend.path_prefix".to_string(),
                reason: format!("'/'로 시작하고 '/'로 끝나지 않는 경로여야 합니다: {:?}", prefix),
            });
        }

        if self.timeout_secs == 0 {
            return Err(SettingsError::InvalidConfig {
                field: "backend.timeout_secs".to_string(),
                reason: "제한 시간은 0보다 커야 합니다".to_string(),
            });
        }

        Ok(())
    }

    /// 검증된 백엔드 대상을 생성합니다.
    pub fn target(&self) -> Result<BackendTarget, SettingsError> {
        let base_url = self.base_url.as_deref().ok_or_else(|| SettingsError::EnvVarMissing {
            var_name: "BACKEND_BASE_URL".to_string(),
        })?;

        BackendTarget::new(base_url).map_err(|e| SettingsError::InvalidConfig {
            field: "backend.base_url".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            path_prefix: default_path_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
