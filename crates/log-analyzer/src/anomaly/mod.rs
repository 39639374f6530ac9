//! 이상 탐지 -- 시간 특징 클러스터링 기반 소수 그룹 탐지
//!
//! 각 이벤트의 특징 벡터는 `(시, 일)`입니다. [`kmeans`]로 이벤트를
//! `cluster_count`개(기본 2) 클러스터로 나눈 뒤, 구성원이 가장 많은 클러스터를
//! 정상으로 보고 나머지 클러스터에 속한 이벤트를 이상으로 분류합니다.
//!
//! # 전제 조건
//! 모든 입력 이벤트는 유효한 타임스탬프를 가져야 합니다. 그렇지 않으면
//! [`AnalyzerError::InvalidInput`]을 반환합니다.
//!
//! # 퇴화 케이스
//! - 이벤트가 없으면 빈 결과
//! - 서로 다른 특징 벡터가 `cluster_count`보다 적으면 클러스터 수를 그 개수로
//!   줄여 다시 수행 (`reduced_from`에 원래 값 기록)
//! - 모든 이벤트의 특징이 같으면 전부 클러스터 0, 이상 없음

pub mod kmeans;

use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use logsift_core::metrics::{DETECTOR_ANOMALIES_TOTAL, DETECTOR_FALLBACKS_TOTAL};
use logsift_core::types::LogEvent;

use crate::error::AnalyzerError;
use kmeans::{KMeans, KMeansFit, Point};

/// 클러스터 할당 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterAssignment {
    /// 입력 이벤트 순서대로의 클러스터 인덱스
    pub labels: Vec<usize>,
    /// 정상 클러스터 인덱스 (최다 구성원, 동률이면 낮은 인덱스)
    pub normal_cluster: usize,
    /// 클러스터별 구성원 수
    pub cluster_sizes: Vec<usize>,
    /// 최종 중심 `(시, 일)`
    pub centroids: Vec<Point>,
    /// 실제로 사용한 클러스터 수
    pub cluster_count: usize,
    /// k-means 할당 단계 수
    pub iterations: usize,
}

impl ClusterAssignment {
    fn from_fit(fit: KMeansFit) -> Self {
        let cluster_sizes = fit.cluster_sizes();
        let mut normal_cluster = 0;
        for (idx, &size) in cluster_sizes.iter().enumerate() {
            if size > cluster_sizes[normal_cluster] {
                normal_cluster = idx;
            }
        }
        Self {
            cluster_count: fit.centroids.len(),
            labels: fit.labels,
            normal_cluster,
            cluster_sizes,
            centroids: fit.centroids,
            iterations: fit.iterations,
        }
    }
}

/// 이상 탐지 결과
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport<'a> {
    /// 이상으로 분류된 이벤트 (입력 순서)
    pub anomalies: Vec<&'a LogEvent>,
    /// 클러스터 할당 (입력이 비어 있으면 None)
    pub assignment: Option<ClusterAssignment>,
    /// 클러스터 수를 줄였다면 원래 요청 값
    pub reduced_from: Option<usize>,
}

/// 이상 탐지기
#[derive(Debug, Clone, Copy)]
pub struct AnomalyDetector {
    cluster_count: usize,
    max_iterations: usize,
    seed: u64,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(2, 300, 42)
    }
}

impl AnomalyDetector {
    pub fn new(cluster_count: usize, max_iterations: usize, seed: u64) -> Self {
        Self {
            cluster_count,
            max_iterations,
            seed,
        }
    }

    /// 이벤트의 `(시, 일)` 특징 벡터를 추출합니다.
    fn features(events: &[LogEvent]) -> Result<Vec<Point>, AnalyzerError> {
        events
            .iter()
            .map(|event| match (event.hour(), event.day()) {
                (Some(hour), Some(day)) => Ok([f64::from(hour), f64::from(day)]),
                _ => Err(AnalyzerError::InvalidInput(format!(
                    "event at line {} has no valid timestamp",
                    event.line()
                ))),
            })
            .collect()
    }

    /// 이상 이벤트를 탐지합니다.
    pub fn detect<'a>(&self, events: &'a [LogEvent]) -> Result<AnomalyReport<'a>, AnalyzerError> {
        let points = Self::features(events)?;

        if points.is_empty() {
            return Ok(AnomalyReport {
                anomalies: Vec::new(),
                assignment: None,
                reduced_from: None,
            });
        }

        let mut reduced_from = None;
        let fit = match KMeans::new(self.cluster_count, self.max_iterations, self.seed).fit(&points)
        {
            Ok(fit) => fit,
            Err(AnalyzerError::InsufficientDataForClustering { points: distinct, clusters }) => {
                warn!(
                    distinct_points = distinct,
                    requested_clusters = clusters,
                    "not enough distinct feature points, reducing cluster count"
                );
                counter!(DETECTOR_FALLBACKS_TOTAL).increment(1);
                reduced_from = Some(clusters);
                KMeans::new(distinct, self.max_iterations, self.seed).fit(&points)?
            }
            Err(e) => return Err(e),
        };

        let assignment = ClusterAssignment::from_fit(fit);
        let anomalies: Vec<&LogEvent> = events
            .iter()
            .zip(&assignment.labels)
            .filter(|&(_, &label)| label != assignment.normal_cluster)
            .map(|(event, _)| event)
            .collect();

        debug!(
            events = events.len(),
            clusters = assignment.cluster_count,
            normal_cluster = assignment.normal_cluster,
            anomalies = anomalies.len(),
            "anomaly detection finished"
        );
        counter!(DETECTOR_ANOMALIES_TOTAL).increment(anomalies.len() as u64);

        Ok(AnomalyReport {
            anomalies,
            assignment: Some(assignment),
            reduced_from,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use logsift_core::types::TIMESTAMP_FORMAT;

    fn event(line: usize, stamp: &str) -> LogEvent {
        let ts = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).unwrap();
        LogEvent::new(line, stamp, Some(ts), "host", "msg")
    }

    /// 업무 시간대 이벤트 다수 + 새벽 이벤트 소수
    fn office_hours_with_night_activity() -> Vec<LogEvent> {
        vec![
            event(1, "2024-03-04 09:05:00"),
            event(2, "2024-03-04 10:10:00"),
            event(3, "2024-03-04 11:15:00"),
            event(4, "2024-03-05 09:20:00"),
            event(5, "2024-03-27 03:00:00"),
            event(6, "2024-03-05 10:25:00"),
            event(7, "2024-03-05 11:30:00"),
            event(8, "2024-03-28 02:45:00"),
        ]
    }

    #[test]
    fn minority_cluster_is_anomalous() {
        let events = office_hours_with_night_activity();
        let report = AnomalyDetector::default().detect(&events).unwrap();
        let lines: Vec<usize> = report.anomalies.iter().map(|e| e.line()).collect();
        assert_eq!(lines, vec![5, 8]);

        let assignment = report.assignment.unwrap();
        assert_eq!(assignment.cluster_count, 2);
        assert_eq!(assignment.cluster_sizes[assignment.normal_cluster], 6);
        assert!(report.reduced_from.is_none());
    }

    #[test]
    fn same_seed_same_anomalies() {
        let events = office_hours_with_night_activity();
        let detector = AnomalyDetector::new(2, 300, 1234);
        let a = detector.detect(&events).unwrap();
        let b = detector.detect(&events).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identical_features_yield_no_anomalies() {
        let events = vec![
            event(1, "2024-01-01 10:00:00"),
            event(2, "2024-01-01 10:01:00"),
            event(3, "2024-01-01 10:59:59"),
        ];
        let report = AnomalyDetector::default().detect(&events).unwrap();
        assert!(report.anomalies.is_empty());
        assert_eq!(report.reduced_from, Some(2));
        let assignment = report.assignment.unwrap();
        assert_eq!(assignment.labels, vec![0, 0, 0]);
        assert_eq!(assignment.cluster_count, 1);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = AnomalyDetector::default().detect(&[]).unwrap();
        assert!(report.anomalies.is_empty());
        assert!(report.assignment.is_none());
    }

    #[test]
    fn untimed_event_is_rejected() {
        let events = vec![
            event(1, "2024-01-01 10:00:00"),
            LogEvent::new(2, "2024-13-01 10:00:00", None, "host", "msg"),
        ];
        let err = AnomalyDetector::default().detect(&events).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidInput(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn tie_in_cluster_size_picks_lowest_index() {
        let fit = KMeansFit {
            labels: vec![1, 0, 1, 0],
            centroids: vec![[1.0, 1.0], [2.0, 2.0]],
            iterations: 1,
        };
        let assignment = ClusterAssignment::from_fit(fit);
        assert_eq!(assignment.normal_cluster, 0);
    }
}
