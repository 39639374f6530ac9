#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: 고정 필드 라인 파서
//! - [`store`]: 순서 보존 이벤트 저장소와 시간 인덱스
//! - [`filter`]: 심각도 어휘 필터
//! - [`correlate`]: 로그인 트리거 기반 상관 분석
//! - [`anomaly`]: 시간 특징 k-means 이상 탐지
//! - [`aggregate`]: 시간대별/소스별 집계
//! - [`analyzer`]: 전체 분석 오케스트레이션
//! - [`config`]: 분석기 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입

pub mod aggregate;
pub mod analyzer;
pub mod anomaly;
pub mod config;
pub mod correlate;
pub mod error;
pub mod filter;
pub mod parser;
pub mod store;

// --- 주요 타입 re-export ---

// 분석기
pub use analyzer::{AnalysisReport, CorrelatedRecord, LogAnalyzer, LogAnalyzerBuilder};

// 설정
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder};

// 에러
pub use error::AnalyzerError;

// 파서 / 저장소
pub use parser::FixedFieldParser;
pub use store::{EventStore, ParseStats};

// 분석 단계
pub use aggregate::{HourlyCount, MAX_DENSE_HOURS, SourceCount, hourly_counts, source_counts};
pub use anomaly::{AnomalyDetector, AnomalyReport, ClusterAssignment};
pub use correlate::{CorrelatedEvent, CorrelationGroup, EventCorrelator, TriggerKind};
pub use filter::SeverityFilter;
