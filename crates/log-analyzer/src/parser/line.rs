//! 고정 필드 라인 파서
//!
//! 한 라인은 세 필드로 구성됩니다.
//!
//! ```text
//! YYYY-MM-DD HH:MM:SS SOURCE MESSAGE...
//! ```
//!
//! - 타임스탬프: 정확히 `YYYY-MM-DD HH:MM:SS` 모양 (ASCII 숫자)
//! - 소스: 공백 없는 토큰 하나
//! - 메시지: 나머지 전체 (공백 포함, 빈 문자열 가능)
//!
//! 라인 앞뒤 공백은 매칭 전에 제거합니다 (들여쓴 라인도 유효).
//! 문법과 맞지 않는 라인은 [`AnalyzerError::MalformedLine`]이 되어 건너뜁니다.
//! 모양은 맞지만 달력상 존재하지 않는 시각(예: `2024-13-01`, 윤초 `23:59:60`)은
//! 버리지 않고 타임스탬프가 비어 있는 이벤트로 남깁니다.
//!
//! # 사용 예시
//! ```ignore
//! use logsift_log_analyzer::parser::FixedFieldParser;
//!
//! let parser = FixedFieldParser::new()?;
//! let store = parser.parse("2024-01-01 10:00:00 hostA user logged in\n");
//! assert_eq!(store.len(), 1);
//! ```

use chrono::{NaiveDateTime, Timelike};
use metrics::counter;
use regex::Regex;
use tracing::debug;

use logsift_core::error::LogsiftError;
use logsift_core::metrics::{
    PARSER_EVENTS_TOTAL, PARSER_INVALID_TIMESTAMPS_TOTAL, PARSER_LINES_SKIPPED_TOTAL,
};
use logsift_core::pipeline::LogParser;
use logsift_core::types::{LogEvent, TIMESTAMP_FORMAT};

use crate::error::AnalyzerError;
use crate::store::{EventStore, ParseStats};

/// 라인 문법
const LINE_PATTERN: &str =
    r"^([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2})\s+(\S+)(?:\s+(.*))?$";

/// 고정 필드 라인 파서
///
/// 정규식은 생성 시 한 번만 컴파일합니다.
pub struct FixedFieldParser {
    pattern: Regex,
}

impl FixedFieldParser {
    /// 새 파서를 생성합니다.
    pub fn new() -> Result<Self, AnalyzerError> {
        Ok(Self {
            pattern: Regex::new(LINE_PATTERN)?,
        })
    }

    /// 로그 파일 전체 텍스트를 파싱하여 이벤트 저장소를 만듭니다.
    ///
    /// 문법과 맞지 않는 라인은 건너뛰고, 전체 파싱은 실패하지 않습니다.
    pub fn parse(&self, text: &str) -> EventStore {
        let mut stats = ParseStats::default();
        let mut events = Vec::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            stats.total_lines += 1;

            if raw_line.trim().is_empty() {
                stats.blank_lines += 1;
                continue;
            }

            match self.parse_line(line_no, raw_line) {
                Ok(event) => {
                    if !event.has_timestamp() {
                        stats.invalid_timestamps += 1;
                    }
                    events.push(event);
                }
                Err(e) => {
                    debug!(line = line_no, error = %e, "skipping malformed line");
                    stats.skipped_lines += 1;
                }
            }
        }

        counter!(PARSER_EVENTS_TOTAL).increment(events.len() as u64);
        counter!(PARSER_LINES_SKIPPED_TOTAL).increment(stats.skipped_lines as u64);
        counter!(PARSER_INVALID_TIMESTAMPS_TOTAL).increment(stats.invalid_timestamps as u64);

        EventStore::new(events, stats)
    }

    /// 한 라인을 파싱합니다.
    ///
    /// 문법 불일치는 에러, 달력상 유효하지 않은 타임스탬프는
    /// 타임스탬프가 빈 이벤트로 반환합니다.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<LogEvent, AnalyzerError> {
        let line = line.trim();

        let caps = self
            .pattern
            .captures(line)
            .ok_or_else(|| AnalyzerError::MalformedLine {
                line: line_no,
                reason: describe_mismatch(line),
            })?;

        // 패턴상 1, 2번 그룹은 매칭 시 항상 존재
        let (Some(raw_ts), Some(source)) = (caps.get(1), caps.get(2)) else {
            return Err(AnalyzerError::MalformedLine {
                line: line_no,
                reason: "missing timestamp or source field".to_owned(),
            });
        };
        let message = caps.get(3).map_or("", |m| m.as_str());

        let timestamp = match parse_timestamp(line_no, raw_ts.as_str()) {
            Ok(ts) => Some(ts),
            Err(e) => {
                debug!(line = line_no, error = %e, "keeping event without timestamp");
                None
            }
        };

        Ok(LogEvent::new(
            line_no,
            raw_ts.as_str(),
            timestamp,
            source.as_str(),
            message,
        ))
    }
}

impl LogParser for FixedFieldParser {
    fn format_name(&self) -> &str {
        "fixed-field"
    }

    fn parse_line(&self, line_no: usize, line: &str) -> Result<LogEvent, LogsiftError> {
        FixedFieldParser::parse_line(self, line_no, line).map_err(Into::into)
    }
}

/// 모양이 맞는 타임스탬프 문자열을 달력 시각으로 변환합니다.
///
/// chrono는 `%S`에 60(윤초)을 허용하지만 초는 0-59만 유효한 것으로 봅니다.
fn parse_timestamp(line_no: usize, raw: &str) -> Result<NaiveDateTime, AnalyzerError> {
    let invalid = || AnalyzerError::InvalidTimestamp {
        line: line_no,
        value: raw.to_owned(),
    };
    let ts = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    if ts.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(ts)
}

/// 디버그 로그용 불일치 사유
fn describe_mismatch(line: &str) -> String {
    if line.split_whitespace().count() < 3 {
        "expected '<date> <time> <source> [message]'".to_owned()
    } else {
        "timestamp must be 'YYYY-MM-DD HH:MM:SS'".to_owned()
    }
}
