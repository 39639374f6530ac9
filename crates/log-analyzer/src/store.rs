//! 이벤트 저장소 -- 파싱된 이벤트의 순서 보존 컬렉션과 시간 인덱스
//!
//! [`EventStore`]는 입력 라인 순서를 그대로 유지합니다 (타임스탬프로
//! 재정렬하지 않음). 시간 범위 조회를 위해 유효한 타임스탬프를 가진
//! 이벤트의 위치를 시각 순으로 정렬한 보조 인덱스를 함께 보관합니다.
//!
//! 생성 이후에는 읽기 전용입니다. 모든 분석 단계는 [`EventStore::events`]로
//! 불변 슬라이스를 받아 새 결과를 만듭니다.

use std::ops::Deref;

use chrono::NaiveDateTime;
use serde::Serialize;

use logsift_core::types::LogEvent;

/// 파싱 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// 읽은 전체 라인 수
    pub total_lines: usize,
    /// 빈 라인 수
    pub blank_lines: usize,
    /// 문법 불일치로 건너뛴 라인 수
    pub skipped_lines: usize,
    /// 유효하지 않은 타임스탬프를 가진 이벤트 수
    pub invalid_timestamps: usize,
}

/// 파싱된 이벤트 저장소
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    /// 입력 순서대로의 이벤트
    events: Vec<LogEvent>,
    /// (타임스탬프, 위치) -- 시각 순 정렬, 같은 시각은 입력 순
    time_index: Vec<(NaiveDateTime, usize)>,
    /// 파싱 통계
    stats: ParseStats,
}

impl EventStore {
    /// 이벤트 목록과 파싱 통계로 저장소를 생성합니다.
    pub fn new(events: Vec<LogEvent>, stats: ParseStats) -> Self {
        let mut time_index: Vec<(NaiveDateTime, usize)> = events
            .iter()
            .enumerate()
            .filter_map(|(pos, e)| e.timestamp().map(|ts| (ts, pos)))
            .collect();
        // 안정 정렬: 같은 시각이면 입력 순서 유지
        time_index.sort_by_key(|(ts, _)| *ts);

        Self {
            events,
            time_index,
            stats,
        }
    }

    /// 이벤트 슬라이스 (입력 순서)
    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    /// 파싱 통계
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// 유효한 타임스탬프를 가진 이벤트만 입력 순서대로 복제하여 반환합니다.
    pub fn timed_events(&self) -> Vec<LogEvent> {
        self.events
            .iter()
            .filter(|e| e.has_timestamp())
            .cloned()
            .collect()
    }

    /// 유효한 타임스탬프를 가진 이벤트 수
    pub fn timed_len(&self) -> usize {
        self.time_index.len()
    }

    /// 관측된 가장 이른/늦은 타임스탬프
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.time_index.first()?.0;
        let last = self.time_index.last()?.0;
        Some((first, last))
    }

    /// `[start, end)` 구간에 속한 이벤트를 시각 순으로 반환합니다.
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&LogEvent> {
        if start >= end {
            return Vec::new();
        }
        let lo = self.time_index.partition_point(|(ts, _)| *ts < start);
        let hi = self.time_index.partition_point(|(ts, _)| *ts < end);
        self.time_index[lo..hi]
            .iter()
            .map(|(_, pos)| &self.events[*pos])
            .collect()
    }
}

impl Deref for EventStore {
    type Target = [LogEvent];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_core::types::TIMESTAMP_FORMAT;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn event(line: usize, stamp: Option<&str>) -> LogEvent {
        LogEvent::new(
            line,
            stamp.unwrap_or("2024-13-01 00:00:00"),
            stamp.map(ts),
            "host",
            format!("line {line}"),
        )
    }

    fn sample_store() -> EventStore {
        EventStore::new(
            vec![
                event(1, Some("2024-01-01 12:00:00")),
                event(2, Some("2024-01-01 10:30:00")),
                event(3, None),
                event(4, Some("2024-01-01 11:15:00")),
            ],
            ParseStats::default(),
        )
    }

    #[test]
    fn preserves_input_order() {
        let store = sample_store();
        let lines: Vec<usize> = store.iter().map(|e| e.line()).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }

    #[test]
    fn time_range_ignores_unset_timestamps() {
        let store = sample_store();
        let (first, last) = store.time_range().unwrap();
        assert_eq!(first, ts("2024-01-01 10:30:00"));
        assert_eq!(last, ts("2024-01-01 12:00:00"));
        assert_eq!(store.timed_len(), 3);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn between_returns_half_open_range_in_time_order() {
        let store = sample_store();
        let hits = store.between(ts("2024-01-01 10:00:00"), ts("2024-01-01 12:00:00"));
        let lines: Vec<usize> = hits.iter().map(|e| e.line()).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn between_with_inverted_range_is_empty() {
        let store = sample_store();
        assert!(
            store
                .between(ts("2024-01-02 00:00:00"), ts("2024-01-01 00:00:00"))
                .is_empty()
        );
    }

    #[test]
    fn timed_events_excludes_unset() {
        let store = sample_store();
        let timed = store.timed_events();
        assert_eq!(timed.len(), 3);
        assert!(timed.iter().all(LogEvent::has_timestamp));
    }

    #[test]
    fn empty_store_has_no_range() {
        let store = EventStore::default();
        assert!(store.is_empty());
        assert!(store.time_range().is_none());
    }
}
