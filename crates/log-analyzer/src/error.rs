//! 로그 분석기 에러 타입
//!
//! [`AnalyzerError`]는 로그 분석기 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<AnalyzerError> for LogsiftError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.
//!
//! `MalformedLine`, `InvalidTimestamp`, `InsufficientDataForClustering`은
//! 분석기 내부에서 복구되는 에러입니다. 파일 전체 분석 결과로 노출되지 않습니다.

use logsift_core::error::{AnalysisError, ConfigError, LogsiftError, ParseError};

/// 로그 분석기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// 입력 파일을 열거나 읽을 수 없음
    #[error("file not readable: {path}: {reason}")]
    FileNotReadable {
        /// 입력 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 라인 문법 불일치 (건너뜀)
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 라인 번호 (1부터)
        line: usize,
        /// 불일치 사유
        reason: String,
    },

    /// 형식은 맞지만 달력상 유효하지 않은 타임스탬프
    #[error("invalid timestamp at line {line}: '{value}'")]
    InvalidTimestamp {
        /// 라인 번호 (1부터)
        line: usize,
        /// 원본 타임스탬프 문자열
        value: String,
    },

    /// 서로 다른 데이터 포인트 수가 클러스터 수보다 적음
    #[error("insufficient data for clustering: {points} distinct points for {clusters} clusters")]
    InsufficientDataForClustering {
        /// 서로 다른 특징 벡터 수
        points: usize,
        /// 요청된 클러스터 수
        clusters: usize,
    },

    /// 분석 단계의 전제 조건 위반
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl From<AnalyzerError> for LogsiftError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::FileNotReadable { .. } => {
                LogsiftError::Io(std::io::Error::other(err.to_string()))
            }
            AnalyzerError::MalformedLine { line, reason } => {
                LogsiftError::Parse(ParseError::Malformed { line, reason })
            }
            AnalyzerError::InvalidTimestamp { line, value } => {
                LogsiftError::Parse(ParseError::InvalidTimestamp { line, value })
            }
            AnalyzerError::InsufficientDataForClustering { points, clusters } => {
                LogsiftError::Analysis(AnalysisError::InsufficientData { points, clusters })
            }
            AnalyzerError::InvalidInput(reason) => {
                LogsiftError::Analysis(AnalysisError::InvalidInput(reason))
            }
            AnalyzerError::Config { field, reason } => {
                LogsiftError::Config(ConfigError::InvalidValue { field, reason })
            }
            AnalyzerError::Io(e) => LogsiftError::Io(e),
            AnalyzerError::Regex(e) => LogsiftError::Config(ConfigError::InvalidValue {
                field: "pattern".to_owned(),
                reason: e.to_string(),
            }),
        }
    }
}
