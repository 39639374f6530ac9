//! 로그 분석기 설정
//!
//! [`AnalyzerConfig`]는 core의 [`AnalysisConfig`](logsift_core::config::AnalysisConfig)를
//! 기반으로 분석기 전용 설정을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use logsift_core::config::LogsiftConfig;
//! use logsift_log_analyzer::config::AnalyzerConfig;
//!
//! let core_config = LogsiftConfig::default();
//! let config = AnalyzerConfig::from_core(&core_config.analysis);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// 클러스터 수 상한
const MAX_CLUSTER_COUNT: usize = 16;

/// k-means 반복 횟수 상한
const MAX_ITERATIONS: usize = 10_000;

/// 로그 분석기 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
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

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::from_core(&logsift_core::config::AnalysisConfig::default())
    }
}

impl AnalyzerConfig {
    /// core의 `AnalysisConfig`에서 분석기 설정을 생성합니다.
    pub fn from_core(core: &logsift_core::config::AnalysisConfig) -> Self {
        Self {
            severity_terms: core.severity_terms.clone(),
            login_marker: core.login_marker.clone(),
            failed_login_marker: core.failed_login_marker.clone(),
            cluster_count: core.cluster_count,
            seed: core.seed,
            max_iterations: core.max_iterations,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.severity_terms.is_empty() || self.severity_terms.iter().any(|t| t.is_empty()) {
            return Err(AnalyzerError::Config {
                field: "severity_terms".to_owned(),
                reason: "must contain at least one non-empty term".to_owned(),
            });
        }

        if self.login_marker.is_empty() || self.failed_login_marker.is_empty() {
            return Err(AnalyzerError::Config {
                field: "login_marker".to_owned(),
                reason: "trigger markers must not be empty".to_owned(),
            });
        }

        if self.cluster_count == 0 || self.cluster_count > MAX_CLUSTER_COUNT {
            return Err(AnalyzerError::Config {
                field: "cluster_count".to_owned(),
                reason: format!("must be 1-{MAX_CLUSTER_COUNT}"),
            });
        }

        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS {
            return Err(AnalyzerError::Config {
                field: "max_iterations".to_owned(),
                reason: format!("must be 1-{MAX_ITERATIONS}"),
            });
        }

        Ok(())
    }
}

/// 분석기 설정 빌더
#[derive(Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 설정에서 시작하는 빌더를 생성합니다.
    pub fn from_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// 심각도 어휘를 설정합니다.
    pub fn severity_terms(mut self, terms: Vec<String>) -> Self {
        self.config.severity_terms = terms;
        self
    }

    /// 로그인 트리거 문자열을 설정합니다.
    pub fn login_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.login_marker = marker.into();
        self
    }

    /// 로그인 실패 트리거 문자열을 설정합니다.
    pub fn failed_login_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.failed_login_marker = marker.into();
        self
    }

    /// 클러스터 수를 설정합니다.
    pub fn cluster_count(mut self, count: usize) -> Self {
        self.config.cluster_count = count;
        self
    }

    /// 시드를 설정합니다.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// 최대 반복 횟수를 설정합니다.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.config.max_iterations = iterations;
        self
    }

    /// 설정을 검증하고 `AnalyzerConfig`를 생성합니다.
    pub fn build(self) -> Result<AnalyzerConfig, AnalyzerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
