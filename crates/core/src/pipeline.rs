//! 파이프라인 trait: 모듈 확장 포인트 정의

use crate::error::LogsiftError;
use crate::types::LogEvent;

/// 로그 파서 trait
///
/// 새로운 라인 형식을 지원하려면 이 trait을 구현합니다.
pub trait LogParser: Send + Sync {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 한 라인을 이벤트로 파싱
    ///
    /// `line_no`는 1부터 시작하는 입력 라인 번호입니다.
    fn parse_line(&self, line_no: usize, line: &str) -> Result<LogEvent, LogsiftError>;
}
