//! 이벤트 상관 분석 -- 로그인/로그인 실패 트리거 기준 그룹화
//!
//! 이벤트를 저장소 순서대로 훑으며 그룹 카운터를 유지합니다.
//! 트리거(로그인 또는 로그인 실패) 이벤트를 만날 때마다 카운터가 1 증가하고,
//! 다음 트리거 직전까지의 이벤트는 모두 같은 그룹에 속합니다 (누적 합 방식 분할).
//!
//! ```text
//! message:  login   normal  failed  normal  normal
//! trigger:    1       0       1       0       0
//! group:      1       1       2       2       2
//! ```
//!
//! 구성원이 둘 이상인 그룹만 결과에 포함됩니다. 트리거가 하나도 없으면 전체가
//! 그룹 0이며, 이벤트가 둘 이상일 때만 결과에 포함됩니다. 연속된 트리거는
//! 각자 별도의 그룹을 시작합니다.

use metrics::counter;
use serde::Serialize;
use tracing::debug;

use logsift_core::metrics::CORRELATOR_EVENTS_TOTAL;
use logsift_core::types::LogEvent;

/// 그룹을 시작한 트리거 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// 로그인 성공
    Login,
    /// 로그인 실패
    FailedLogin,
}

/// 상관 그룹에 속한 이벤트
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelatedEvent<'a> {
    /// 그룹 ID (진단용)
    pub group_id: u64,
    /// 이벤트
    pub event: &'a LogEvent,
}

/// 구성원이 둘 이상인 상관 그룹
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationGroup<'a> {
    /// 그룹 ID
    pub id: u64,
    /// 첫 이벤트의 트리거 종류 (그룹 0이면 None)
    pub trigger: Option<TriggerKind>,
    /// 구성원 (입력 순서)
    pub members: Vec<&'a LogEvent>,
}

/// 이벤트 상관 분석기
#[derive(Debug, Clone)]
pub struct EventCorrelator {
    login_marker: String,
    failed_login_marker: String,
}

impl EventCorrelator {
    /// 트리거 문자열로 상관 분석기를 생성합니다.
    pub fn new(login_marker: impl Into<String>, failed_login_marker: impl Into<String>) -> Self {
        Self {
            login_marker: login_marker.into(),
            failed_login_marker: failed_login_marker.into(),
        }
    }

    /// 이벤트가 트리거인지 판별합니다.
    ///
    /// 두 문자열을 모두 포함하면 로그인 실패로 분류합니다.
    pub fn trigger_kind(&self, event: &LogEvent) -> Option<TriggerKind> {
        let message = event.message();
        if message.contains(self.failed_login_marker.as_str()) {
            Some(TriggerKind::FailedLogin)
        } else if message.contains(self.login_marker.as_str()) {
            Some(TriggerKind::Login)
        } else {
            None
        }
    }

    /// 각 이벤트에 그룹 ID를 부여합니다 (누적 합).
    fn assign_groups(&self, events: &[LogEvent]) -> Vec<u64> {
        let mut counter = 0u64;
        events
            .iter()
            .map(|event| {
                if self.trigger_kind(event).is_some() {
                    counter += 1;
                }
                counter
            })
            .collect()
    }

    /// 구성원이 둘 이상인 그룹을 ID 순으로 반환합니다.
    pub fn groups<'a>(&self, events: &'a [LogEvent]) -> Vec<CorrelationGroup<'a>> {
        let ids = self.assign_groups(events);
        let mut groups: Vec<CorrelationGroup<'a>> = Vec::new();

        // 그룹 ID는 단조 증가하므로 연속 구간이 곧 그룹
        for (event, id) in events.iter().zip(ids) {
            if let Some(group) = groups.last_mut().filter(|g| g.id == id) {
                group.members.push(event);
                continue;
            }
            groups.push(CorrelationGroup {
                id,
                trigger: self.trigger_kind(event),
                members: vec![event],
            });
        }

        groups.retain(|g| g.members.len() > 1);
        groups
    }

    /// 자격을 갖춘 그룹의 구성원을 입력 순서대로 반환합니다.
    pub fn correlate<'a>(&self, events: &'a [LogEvent]) -> Vec<CorrelatedEvent<'a>> {
        let groups = self.groups(events);
        let correlated: Vec<CorrelatedEvent<'a>> = groups
            .iter()
            .flat_map(|group| {
                group.members.iter().map(move |event| CorrelatedEvent {
                    group_id: group.id,
                    event: *event,
                })
            })
            .collect();

        debug!(
            total = events.len(),
            groups = groups.len(),
            correlated = correlated.len(),
            "event correlation finished"
        );
        counter!(CORRELATOR_EVENTS_TOTAL).increment(correlated.len() as u64);
        correlated
    }
}

impl Default for EventCorrelator {
    fn default() -> Self {
        Self::new("logged in", "Failed login attempt")
    }
}
