//! 에러 타입: 도메인별 에러 정의

/// logsift 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogsiftError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 분석 단계 에러
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 분석 단계 에러
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 입력 이벤트가 단계의 전제 조건을 만족하지 않음
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 클러스터 수보다 서로 다른 데이터 포인트가 적음
    #[error("insufficient data for clustering: {points} distinct points for {clusters} clusters")]
    InsufficientData { points: usize, clusters: usize },
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 라인 문법 불일치
    #[error("malformed line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// 형식은 맞지만 달력상 유효하지 않은 타임스탬프
    #[error("invalid timestamp at line {line}: '{value}'")]
    InvalidTimestamp { line: usize, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_top_level() {
        let err: LogsiftError = ConfigError::FileNotFound {
            path: "logsift.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, LogsiftError::Config(_)));
        assert!(err.to_string().contains("logsift.toml"));
    }

    #[test]
    fn insufficient_data_display() {
        let err = AnalysisError::InsufficientData {
            points: 1,
            clusters: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("1 distinct points"));
        assert!(msg.contains("2 clusters"));
    }

    #[test]
    fn parse_error_display_includes_line() {
        let err = ParseError::InvalidTimestamp {
            line: 7,
            value: "2024-13-01 10:00:00".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("2024-13-01"));
    }
}
