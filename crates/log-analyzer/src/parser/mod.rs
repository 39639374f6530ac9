//! 로그 파싱 모듈 -- 고정 필드 라인 형식 파서
//!
//! 각 파서는 core의 [`LogParser`](logsift_core::pipeline::LogParser) trait을 구현합니다.
//! 현재 지원하는 형식은 `YYYY-MM-DD HH:MM:SS SOURCE MESSAGE` 하나입니다.
//!
//! 파싱은 최선 노력(best-effort) 방식입니다. 문법과 맞지 않는 라인은 건너뛰고
//! 나머지 파일의 수집을 계속합니다.

pub mod line;

pub use line::FixedFieldParser;
