//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더가 설치되지 않은 경우 매크로 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logsift_`
//! - 단계명: `parser_`, `filter_`, `correlator_`, `detector_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(logsift_core::metrics::PARSER_LINES_SKIPPED_TOTAL).increment(1);
//! ```

// ─── Parser 메트릭 ─────────────────────────────────────────────────

/// Parser: 이벤트로 변환된 라인 수 (counter)
pub const PARSER_EVENTS_TOTAL: &str = "logsift_parser_events_total";

/// Parser: 문법 불일치로 건너뛴 라인 수 (counter)
pub const PARSER_LINES_SKIPPED_TOTAL: &str = "logsift_parser_lines_skipped_total";

/// Parser: 유효하지 않은 타임스탬프 수 (counter)
pub const PARSER_INVALID_TIMESTAMPS_TOTAL: &str = "logsift_parser_invalid_timestamps_total";

// ─── Analysis 메트릭 ───────────────────────────────────────────────

/// Filter: 심각도 어휘에 매칭된 이벤트 수 (counter)
pub const FILTER_MATCHED_TOTAL: &str = "logsift_filter_matched_total";

/// Correlator: 상관 그룹에 포함된 이벤트 수 (counter)
pub const CORRELATOR_EVENTS_TOTAL: &str = "logsift_correlator_events_total";

/// Detector: 이상으로 분류된 이벤트 수 (counter)
pub const DETECTOR_ANOMALIES_TOTAL: &str = "logsift_detector_anomalies_total";

/// Detector: 클러스터 수를 줄여 재시도한 횟수 (counter)
pub const DETECTOR_FALLBACKS_TOTAL: &str = "logsift_detector_fallbacks_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 직후 한 번 호출합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(PARSER_EVENTS_TOTAL, "Log lines converted into events");
    describe_counter!(
        PARSER_LINES_SKIPPED_TOTAL,
        "Log lines skipped because they did not match the line grammar"
    );
    describe_counter!(
        PARSER_INVALID_TIMESTAMPS_TOTAL,
        "Events whose timestamp is not a valid calendar date/time"
    );
    describe_counter!(FILTER_MATCHED_TOTAL, "Events matching the severity vocabulary");
    describe_counter!(
        CORRELATOR_EVENTS_TOTAL,
        "Events emitted as members of qualifying correlation groups"
    );
    describe_counter!(DETECTOR_ANOMALIES_TOTAL, "Events labelled anomalous");
    describe_counter!(
        DETECTOR_FALLBACKS_TOTAL,
        "Clustering runs retried with fewer clusters than requested"
    );
}
