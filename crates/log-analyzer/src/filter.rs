//! 심각도 필터 -- 메시지에 심각도 어휘가 포함된 이벤트 선택
//!
//! 어휘는 대소문자를 구분하는 부분 문자열 집합입니다 (단어 단위 매칭 아님).
//! 기본 어휘는 `Error`, `Critical`입니다.

use metrics::counter;
use tracing::debug;

use logsift_core::metrics::FILTER_MATCHED_TOTAL;
use logsift_core::types::LogEvent;

use crate::error::AnalyzerError;

/// 심각도 필터
#[derive(Debug, Clone)]
pub struct SeverityFilter {
    vocabulary: Vec<String>,
}

impl SeverityFilter {
    /// 주어진 어휘로 필터를 생성합니다.
    ///
    /// 어휘가 비어 있거나 빈 문자열을 포함하면 에러를 반환합니다
    /// (빈 문자열은 모든 메시지에 매칭되기 때문).
    pub fn new(vocabulary: Vec<String>) -> Result<Self, AnalyzerError> {
        if vocabulary.is_empty() || vocabulary.iter().any(String::is_empty) {
            return Err(AnalyzerError::Config {
                field: "severity_terms".to_owned(),
                reason: "must contain at least one non-empty term".to_owned(),
            });
        }
        Ok(Self { vocabulary })
    }

    /// 어휘 목록
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// 메시지가 어휘 중 하나라도 포함하는지 여부
    pub fn matches(&self, event: &LogEvent) -> bool {
        self.vocabulary
            .iter()
            .any(|term| event.message().contains(term.as_str()))
    }

    /// 매칭되는 이벤트를 입력 순서대로 반환합니다.
    pub fn filter<'a>(&self, events: &'a [LogEvent]) -> Vec<&'a LogEvent> {
        let matched: Vec<&LogEvent> = events.iter().filter(|e| self.matches(e)).collect();
        debug!(
            total = events.len(),
            matched = matched.len(),
            "severity filter applied"
        );
        counter!(FILTER_MATCHED_TOTAL).increment(matched.len() as u64);
        matched
    }
}

impl Default for SeverityFilter {
    fn default() -> Self {
        Self {
            vocabulary: vec!["Error".to_owned(), "Critical".to_owned()],
        }
    }
}
