//! 설정 관리: logsift.toml 파싱 및 런타임 설정
//!
//! [`LogsiftConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGSIFT_ANALYSIS_SEED=7` 형식)
//! 3. 설정 파일 (`logsift.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), logsift_core::error::LogsiftError> {
//! use logsift_core::config::LogsiftConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogsiftConfig::load("logsift.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogsiftConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LogsiftError};

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_FILE: &str = "logsift.toml";

/// 클러스터 수 상한
const MAX_CLUSTER_COUNT: usize = 16;

/// k-means 반복 횟수 상한
const MAX_ITERATIONS: usize = 10_000;

/// logsift 통합 설정
///
/// `logsift.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsiftConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 분석 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl LogsiftConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LogsiftError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 있으면 로드하고, 없으면 기본값에 환경변수만 적용합니다.
    ///
    /// 사용자가 설정 파일을 명시하지 않았을 때 사용합니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LogsiftError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LogsiftError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogsiftError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogsiftError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogsiftError> {
        toml::from_str(toml_str).map_err(|e| {
            LogsiftError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGSIFT_{SECTION}_{FIELD}`
    /// 예: `LOGSIFT_ANALYSIS_CLUSTER_COUNT=3`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGSIFT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGSIFT_GENERAL_LOG_FORMAT");

        // Analysis
        override_csv(
            &mut self.analysis.severity_terms,
            "LOGSIFT_ANALYSIS_SEVERITY_TERMS",
        );
        override_string(
            &mut self.analysis.login_marker,
            "LOGSIFT_ANALYSIS_LOGIN_MARKER",
        );
        override_string(
            &mut self.analysis.failed_login_marker,
            "LOGSIFT_ANALYSIS_FAILED_LOGIN_MARKER",
        );
        override_usize(
            &mut self.analysis.cluster_count,
            "LOGSIFT_ANALYSIS_CLUSTER_COUNT",
        );
        override_u64(&mut self.analysis.seed, "LOGSIFT_ANALYSIS_SEED");
        override_usize(
            &mut self.analysis.max_iterations,
            "LOGSIFT_ANALYSIS_MAX_ITERATIONS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogsiftError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.analysis.validate()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 분석 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 심각도 어휘 (대소문자 구분 부분 문자열)
    pub severity_terms: Vec<String>,
    /// 로그인 트리거 문자열
    pub login_marker: String,
    /// 로그인 실패 트리거 문자열
    pub failed_login_marker: String,
    /// 이상 탐지 클러스터 수
    pub cluster_count: usize,
    /// k-means 초기화 시드
    pub seed: u64,
    /// k-means 최대 반복 횟수
    pub max_iterations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            severity_terms: vec!["Error".to_owned(), "Critical".to_owned()],
            login_marker: "logged in".to_owned(),
            failed_login_marker: "Failed login attempt".to_owned(),
            cluster_count: 2,
            seed: 42,
            max_iterations: 300,
        }
    }
}

impl AnalysisConfig {
    /// 분석 섹션의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogsiftError> {
        if self.severity_terms.is_empty() {
            return Err(invalid(
                "analysis.severity_terms",
                "at least one severity term is required",
            ));
        }
        if self.severity_terms.iter().any(|t| t.is_empty()) {
            return Err(invalid(
                "analysis.severity_terms",
                "severity terms must not be empty strings",
            ));
        }
        if self.login_marker.is_empty() {
            return Err(invalid("analysis.login_marker", "must not be empty"));
        }
        if self.failed_login_marker.is_empty() {
            return Err(invalid("analysis.failed_login_marker", "must not be empty"));
        }
        if self.cluster_count == 0 || self.cluster_count > MAX_CLUSTER_COUNT {
            return Err(invalid(
                "analysis.cluster_count",
                &format!("must be 1-{MAX_CLUSTER_COUNT}"),
            ));
        }
        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS {
            return Err(invalid(
                "analysis.max_iterations",
                &format!("must be 1-{MAX_ITERATIONS}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> LogsiftError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
    .into()
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val.split(',').map(|s| s.trim().to_owned()).collect();
    }
}
