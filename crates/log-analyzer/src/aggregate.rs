//! 집계 -- 시간대별 이벤트 수, 소스별 이벤트 수
//!
//! 시간대 집계는 첫 버킷부터 마지막 버킷까지 빈 시간대를 0으로 채운
//! 조밀한(dense) 계열을 만듭니다. 타임스탬프가 없는 이벤트는 제외됩니다.
//! 구간이 [`MAX_DENSE_HOURS`]를 넘으면 관측된 버킷만 시각 순으로 돌려줍니다.
//!
//! 소스 집계는 건수 내림차순이며, 건수가 같으면 먼저 등장한 소스가 앞에 옵니다.

use std::collections::HashMap;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::warn;

use logsift_core::types::LogEvent;

/// 0으로 채우는 시간대 계열의 최대 길이 (10년)
pub const MAX_DENSE_HOURS: i64 = 24 * 366 * 10;

/// 시간대 버킷 하나의 이벤트 수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    /// 버킷 시작 시각 (분/초 0)
    pub hour: NaiveDateTime,
    /// 이벤트 수
    pub count: usize,
}

/// 소스 하나의 이벤트 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

/// 시간대별 이벤트 수를 계산합니다.
pub fn hourly_counts(events: &[LogEvent]) -> Vec<HourlyCount> {
    let mut buckets: HashMap<NaiveDateTime, usize> = HashMap::new();
    for bucket in events.iter().filter_map(LogEvent::hour_bucket) {
        *buckets.entry(bucket).or_default() += 1;
    }

    let (Some(&first), Some(&last)) = (buckets.keys().min(), buckets.keys().max()) else {
        return Vec::new();
    };

    let span_hours = (last - first).num_hours();
    if span_hours >= MAX_DENSE_HOURS {
        warn!(
            first = %first,
            last = %last,
            span_hours,
            max_hours = MAX_DENSE_HOURS,
            "hourly span too wide, emitting observed buckets only"
        );
        let mut sparse: Vec<HourlyCount> = buckets
            .into_iter()
            .map(|(hour, count)| HourlyCount { hour, count })
            .collect();
        sparse.sort_by_key(|c| c.hour);
        return sparse;
    }

    let step = TimeDelta::hours(1);
    let mut counts = Vec::new();
    let mut hour = first;
    while hour <= last {
        counts.push(HourlyCount {
            hour,
            count: buckets.get(&hour).copied().unwrap_or(0),
        });
        hour += step;
    }
    counts
}

/// 소스별 이벤트 수를 계산합니다.
pub fn source_counts(events: &[LogEvent]) -> Vec<SourceCount> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SourceCount> = Vec::new();

    for event in events {
        match position.get(event.source()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                position.insert(event.source(), counts.len());
                counts.push(SourceCount {
                    source: event.source().to_owned(),
                    count: 1,
                });
            }
        }
    }

    // 안정 정렬: 동률이면 최초 등장 순서 유지
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_core::types::TIMESTAMP_FORMAT;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn event(line: usize, stamp: &str, source: &str) -> LogEvent {
        let parsed = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok();
        LogEvent::new(line, stamp, parsed, source, "msg")
    }

    #[test]
    fn hourly_counts_fill_gaps_with_zero() {
        let events = vec![
            event(1, "2024-01-01 10:05:00", "a"),
            event(2, "2024-01-01 10:59:59", "a"),
            event(3, "2024-01-01 13:00:00", "b"),
        ];
        let counts = hourly_counts(&events);
        let expected = vec![
            HourlyCount { hour: ts("2024-01-01 10:00:00"), count: 2 },
            HourlyCount { hour: ts("2024-01-01 11:00:00"), count: 0 },
            HourlyCount { hour: ts("2024-01-01 12:00:00"), count: 0 },
            HourlyCount { hour: ts("2024-01-01 13:00:00"), count: 1 },
        ];
        assert_eq!(counts, expected);
    }

    #[test]
    fn hourly_counts_are_chronological_for_unordered_input() {
        let events = vec![
            event(1, "2024-01-02 01:00:00", "a"),
            event(2, "2024-01-01 23:30:00", "a"),
        ];
        let counts = hourly_counts(&events);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0].hour, ts("2024-01-01 23:00:00"));
        assert_eq!(counts[2].hour, ts("2024-01-02 01:00:00"));
    }

    #[test]
    fn hourly_counts_skip_untimed_events() {
        let events = vec![
            event(1, "2024-01-01 10:00:00", "a"),
            event(2, "2024-13-01 10:00:00", "a"),
        ];
        let counts = hourly_counts(&events);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn hourly_counts_wide_span_is_sparse() {
        let events = vec![
            event(1, "2099-12-31 23:00:00", "a"),
            event(2, "1900-01-01 00:00:00", "a"),
            event(3, "1900-01-01 00:30:00", "b"),
        ];
        let counts = hourly_counts(&events);
        let expected = vec![
            HourlyCount { hour: ts("1900-01-01 00:00:00"), count: 2 },
            HourlyCount { hour: ts("2099-12-31 23:00:00"), count: 1 },
        ];
        assert_eq!(counts, expected);
    }

    #[test]
    fn hourly_counts_just_under_limit_stays_dense() {
        let first = ts("2020-01-01 00:00:00");
        let last = first + TimeDelta::hours(MAX_DENSE_HOURS - 1);
        let events = vec![
            event(1, "2020-01-01 00:00:00", "a"),
            event(2, &last.format(TIMESTAMP_FORMAT).to_string(), "a"),
        ];
        assert_eq!(hourly_counts(&events).len() as i64, MAX_DENSE_HOURS);
    }

    #[test]
    fn hourly_counts_empty_input() {
        assert!(hourly_counts(&[]).is_empty());
        let untimed = vec![event(1, "2024-13-01 10:00:00", "a")];
        assert!(hourly_counts(&untimed).is_empty());
    }

    #[test]
    fn source_counts_sorted_by_count_then_first_seen() {
        let events = vec![
            event(1, "2024-01-01 10:00:00", "web"),
            event(2, "2024-01-01 10:00:00", "db"),
            event(3, "2024-01-01 10:00:00", "auth"),
            event(4, "2024-01-01 10:00:00", "auth"),
            event(5, "2024-01-01 10:00:00", "db"),
        ];
        let counts = source_counts(&events);
        let flat: Vec<(&str, usize)> = counts.iter().map(|c| (c.source.as_str(), c.count)).collect();
        assert_eq!(flat, vec![("db", 2), ("auth", 2), ("web", 1)]);
    }

    #[test]
    fn source_counts_include_untimed_events() {
        let events = vec![event(1, "2024-13-01 10:00:00", "x")];
        assert_eq!(source_counts(&events)[0].count, 1);
    }

    #[test]
    fn source_counts_are_case_sensitive() {
        let events = vec![
            event(1, "2024-01-01 10:00:00", "Web"),
            event(2, "2024-01-01 10:00:00", "web"),
        ];
        assert_eq!(source_counts(&events).len(), 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn totals_match_event_counts(
                rows in prop::collection::vec((0u32..3, 0u32..24, "[a-c]"), 0..40)
            ) {
                let events: Vec<LogEvent> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, (day, hour, source))| {
                        let stamp = format!("2024-02-{:02} {hour:02}:30:00", day + 1);
                        event(i + 1, &stamp, source)
                    })
                    .collect();

                let hourly_total: usize = hourly_counts(&events).iter().map(|c| c.count).sum();
                let source_total: usize = source_counts(&events).iter().map(|c| c.count).sum();
                prop_assert_eq!(hourly_total, events.len());
                prop_assert_eq!(source_total, events.len());

                let hours = hourly_counts(&events);
                for pair in hours.windows(2) {
                    prop_assert_eq!(pair[1].hour - pair[0].hour, TimeDelta::hours(1));
                }
            }
        }
    }
}
