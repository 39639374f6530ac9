//! 분석 오케스트레이션 -- 파싱/필터/상관 분석/이상 탐지/집계의 전체 흐름
//!
//! [`LogAnalyzer`]는 입력 텍스트를 한 번 파싱해 [`EventStore`]를 만든 뒤,
//! 네 단계(필터, 상관 분석, 이상 탐지, 집계)에 같은 불변 슬라이스를 넘깁니다.
//! 어느 단계도 다른 단계의 결과를 변경하지 않습니다.
//!
//! ```text
//!                     +-> SeverityFilter   -> filtered
//! text -> Parser -> Store -> EventCorrelator -> correlated
//!                     +-> AnomalyDetector  -> anomalies (타임스탬프 있는 이벤트만)
//!                     +-> aggregate        -> hourly / sources
//! ```
//!
//! # 사용 예시
//! ```ignore
//! use logsift_log_analyzer::LogAnalyzerBuilder;
//!
//! let analyzer = LogAnalyzerBuilder::new().seed(7).build()?;
//! let report = analyzer.analyze_file("server.log")?;
//! println!("{} anomalies", report.anomalies.len());
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use logsift_core::types::LogEvent;

use crate::aggregate::{self, HourlyCount, SourceCount};
use crate::anomaly::{AnomalyDetector, ClusterAssignment};
use crate::config::{AnalyzerConfig, AnalyzerConfigBuilder};
use crate::correlate::EventCorrelator;
use crate::error::AnalyzerError;
use crate::filter::SeverityFilter;
use crate::parser::FixedFieldParser;
use crate::store::{EventStore, ParseStats};

/// 상관 그룹에 속한 이벤트 (소유 버전)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrelatedRecord {
    pub group_id: u64,
    pub event: LogEvent,
}

/// 전체 분석 결과
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// 입력 파일 경로 (문자열 입력이면 None)
    pub source: Option<String>,
    /// 파싱 통계
    pub stats: ParseStats,
    /// 파싱된 이벤트 수
    pub events: usize,
    /// 유효한 타임스탬프를 가진 이벤트 수
    pub timed_events: usize,
    /// 심각도 필터 결과
    pub filtered: Vec<LogEvent>,
    /// 상관 분석 결과
    pub correlated: Vec<CorrelatedRecord>,
    /// 이상 탐지 결과
    pub anomalies: Vec<LogEvent>,
    /// 클러스터 할당 (이벤트가 없으면 None)
    pub cluster: Option<ClusterAssignment>,
    /// 클러스터 수를 줄였다면 원래 요청 값
    pub reduced_from: Option<usize>,
    /// 시간대별 이벤트 수
    pub hourly: Vec<HourlyCount>,
    /// 소스별 이벤트 수
    pub sources: Vec<SourceCount>,
}

/// 로그 분석기
pub struct LogAnalyzer {
    config: AnalyzerConfig,
    parser: FixedFieldParser,
    filter: SeverityFilter,
    correlator: EventCorrelator,
    detector: AnomalyDetector,
}

impl LogAnalyzer {
    /// 설정으로 분석기를 생성합니다.
    pub fn from_config(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;

        let parser = FixedFieldParser::new()?;
        let filter = SeverityFilter::new(config.severity_terms.clone())?;
        let correlator = EventCorrelator::new(
            config.login_marker.as_str(),
            config.failed_login_marker.as_str(),
        );
        let detector =
            AnomalyDetector::new(config.cluster_count, config.max_iterations, config.seed);

        Ok(Self {
            config,
            parser,
            filter,
            correlator,
            detector,
        })
    }

    /// 현재 설정
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// 로그 파일을 읽어 분석합니다.
    ///
    /// 파일이 없거나 읽을 수 없거나 UTF-8이 아니면
    /// [`AnalyzerError::FileNotReadable`]을 반환합니다.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisReport, AnalyzerError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let text = std::fs::read_to_string(path).map_err(|e| AnalyzerError::FileNotReadable {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        info!(path = %path_str, bytes = text.len(), "log file loaded");

        let mut report = self.analyze_str(&text)?;
        report.source = Some(path_str);
        Ok(report)
    }

    /// 로그 텍스트를 분석합니다.
    pub fn analyze_str(&self, text: &str) -> Result<AnalysisReport, AnalyzerError> {
        let store = self.parser.parse(text);
        self.analyze_store(&store)
    }

    /// 이미 파싱된 저장소를 분석합니다.
    pub fn analyze_store(&self, store: &EventStore) -> Result<AnalysisReport, AnalyzerError> {
        let stats = store.stats();
        info!(
            total_lines = stats.total_lines,
            events = store.len(),
            blank = stats.blank_lines,
            skipped = stats.skipped_lines,
            invalid_timestamps = stats.invalid_timestamps,
            "log parsed"
        );
        if store.is_empty() {
            warn!("no events parsed from input");
        }

        let filtered: Vec<LogEvent> = self.filter.filter(store).into_iter().cloned().collect();
        info!(matched = filtered.len(), "severity filter finished");

        let correlated: Vec<CorrelatedRecord> = self
            .correlator
            .correlate(store)
            .into_iter()
            .map(|c| CorrelatedRecord {
                group_id: c.group_id,
                event: c.event.clone(),
            })
            .collect();
        info!(correlated = correlated.len(), "event correlation finished");

        // 탐지기는 타임스탬프가 유효한 이벤트만 받음
        let timed = store.timed_events();
        let detection = self.detector.detect(&timed)?;
        let anomalies: Vec<LogEvent> = detection.anomalies.into_iter().cloned().collect();
        info!(
            analyzed = timed.len(),
            anomalies = anomalies.len(),
            "anomaly detection finished"
        );

        let hourly = aggregate::hourly_counts(store);
        let sources = aggregate::source_counts(store);

        Ok(AnalysisReport {
            source: None,
            stats,
            events: store.len(),
            timed_events: store.timed_len(),
            filtered,
            correlated,
            anomalies,
            cluster: detection.assignment,
            reduced_from: detection.reduced_from,
            hourly,
            sources,
        })
    }
}

/// 로그 분석기 빌더
pub struct LogAnalyzerBuilder {
    config: AnalyzerConfigBuilder,
}

impl LogAnalyzerBuilder {
    /// 기본 설정으로 시작하는 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfigBuilder::new(),
        }
    }

    /// 분석기 설정을 지정합니다.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = AnalyzerConfigBuilder::from_config(config);
        self
    }

    /// 심각도 어휘를 지정합니다.
    pub fn severity_terms(mut self, terms: Vec<String>) -> Self {
        self.config = self.config.severity_terms(terms);
        self
    }

    /// 클러스터 수를 지정합니다.
    pub fn cluster_count(mut self, count: usize) -> Self {
        self.config = self.config.cluster_count(count);
        self
    }

    /// 시드를 지정합니다.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.seed(seed);
        self
    }

    /// 분석기를 빌드합니다.
    pub fn build(self) -> Result<LogAnalyzer, AnalyzerError> {
        LogAnalyzer::from_config(self.config.build()?)
    }
}

impl Default for LogAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
