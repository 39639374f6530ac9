//! 도메인 타입: 시스템 전역에서 사용되는 공통 타입
//!
//! 파서가 만들어 내고 모든 분석 단계가 읽는 [`LogEvent`]를 정의합니다.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// 로그 라인 타임스탬프 형식 (`YYYY-MM-DD HH:MM:SS`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 파싱된 로그 이벤트
///
/// 한 번 생성되면 변경되지 않습니다. `hour`, `day` 등 파생 값은
/// 모두 `timestamp`에서 계산되며 따로 저장하지 않습니다.
///
/// `timestamp`가 `None`이면 라인의 형식은 맞았지만 달력상 유효하지
/// 않은 시각(예: 13월)이었다는 뜻입니다. 이런 이벤트는 시간 기반 분석에서
/// 제외됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// 입력 파일의 라인 번호 (1부터 시작)
    line: usize,
    /// 원본 타임스탬프 문자열
    raw_timestamp: String,
    /// 파싱된 타임스탬프 (유효하지 않으면 None)
    timestamp: Option<NaiveDateTime>,
    /// 이벤트를 발생시킨 컴포넌트/호스트
    source: String,
    /// 나머지 메시지 (빈 문자열 가능)
    message: String,
}

impl LogEvent {
    /// 새 이벤트를 생성합니다.
    pub fn new(
        line: usize,
        raw_timestamp: impl Into<String>,
        timestamp: Option<NaiveDateTime>,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            raw_timestamp: raw_timestamp.into(),
            timestamp,
            source: source.into(),
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn raw_timestamp(&self) -> &str {
        &self.raw_timestamp
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 유효한 타임스탬프가 있는지 여부
    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    /// 시 (0-23)
    pub fn hour(&self) -> Option<u32> {
        self.timestamp.map(|ts| ts.hour())
    }

    /// 일 (1-31)
    pub fn day(&self) -> Option<u32> {
        self.timestamp.map(|ts| ts.day())
    }

    /// 시 단위로 절삭한 타임스탬프
    pub fn hour_bucket(&self) -> Option<NaiveDateTime> {
        self.timestamp
            .and_then(|ts| ts.date().and_hms_opt(ts.hour(), 0, 0))
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.raw_timestamp, self.source, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn derived_fields_follow_timestamp() {
        let event = LogEvent::new(
            1,
            "2024-03-17 14:25:09",
            Some(ts("2024-03-17 14:25:09")),
            "hostA",
            "hello",
        );
        assert_eq!(event.hour(), Some(14));
        assert_eq!(event.day(), Some(17));
        assert_eq!(event.hour_bucket(), Some(ts("2024-03-17 14:00:00")));
    }

    #[test]
    fn unset_timestamp_has_no_derived_fields() {
        let event = LogEvent::new(3, "2024-13-01 10:00:00", None, "hostA", "msg");
        assert!(!event.has_timestamp());
        assert_eq!(event.hour(), None);
        assert_eq!(event.day(), None);
        assert_eq!(event.hour_bucket(), None);
    }

    #[test]
    fn display_renders_original_fields() {
        let event = LogEvent::new(1, "2024-01-01 10:00:00", None, "web", "Error: disk full");
        assert_eq!(event.to_string(), "2024-01-01 10:00:00 web Error: disk full");
    }

    #[test]
    fn serializes_with_null_timestamp() {
        let event = LogEvent::new(2, "2024-02-30 00:00:00", None, "db", "");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json["timestamp"].is_null());
        assert_eq!(json["source"], "db");
    }
}
