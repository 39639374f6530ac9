#![no_main]

use libfuzzer_sys::fuzz_target;
use logsift_core::pipeline::LogParser;
use logsift_log_analyzer::FixedFieldParser;

fuzz_target!(|data: &[u8]| {
    let Ok(parser) = FixedFieldParser::new() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // 라인 단위: 크래시나 패닉 없이 Ok 또는 Err을 반환해야 한다
    let _ = LogParser::parse_line(&parser, 1, text);

    // 전체 텍스트: 모든 라인은 이벤트/빈 줄/건너뜀 중 하나로 집계된다
    let store = parser.parse(text);
    let stats = store.stats();
    assert_eq!(
        stats.total_lines,
        store.len() + stats.blank_lines + stats.skipped_lines
    );
});
