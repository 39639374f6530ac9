//! `logsift analyze` command handler

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::{Serialize, Serializer};
use tracing::info;

use logsift_core::config::LogsiftConfig;
use logsift_core::error::LogsiftError;
use logsift_core::types::LogEvent;
use logsift_log_analyzer::{
    AnalysisReport, AnalyzerConfig, AnalyzerConfigBuilder, LogAnalyzer,
};

use crate::cli::{AnalyzeArgs, View};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Width of the longest bar in the hourly histogram.
const BAR_WIDTH: usize = 40;

/// Execute the `analyze` command.
pub fn execute(
    args: AnalyzeArgs,
    config: &LogsiftConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let path = args.path.as_deref().ok_or(CliError::NoInputSelected)?;
    let output = run(path, &args, config)?;
    writer.render(&output)
}

/// Run `analyze` with the result of loading the configuration.
///
/// A missing path is checked first, so a broken configuration does not turn
/// the no-input case into a configuration error.
pub fn dispatch(
    args: AnalyzeArgs,
    config: Result<LogsiftConfig, LogsiftError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    if args.path.is_none() {
        return Err(CliError::NoInputSelected);
    }
    let config = config?;
    execute(args, &config, writer)
}

/// Analyze `path` with the configuration plus command-line overrides.
pub fn run(
    path: &Path,
    args: &AnalyzeArgs,
    config: &LogsiftConfig,
) -> Result<AnalyzeOutput, CliError> {
    let analyzer_config = analyzer_config(args, config)?;
    info!(
        path = %path.display(),
        clusters = analyzer_config.cluster_count,
        seed = analyzer_config.seed,
        "starting analysis"
    );

    let analyzer = LogAnalyzer::from_config(analyzer_config)?;
    let report = analyzer.analyze_file(path)?;

    Ok(AnalyzeOutput {
        view: args.view,
        report,
    })
}

/// Merge `--severity`, `--clusters` and `--seed` over the `[analysis]` section.
pub fn analyzer_config(
    args: &AnalyzeArgs,
    config: &LogsiftConfig,
) -> Result<AnalyzerConfig, CliError> {
    let mut builder =
        AnalyzerConfigBuilder::from_config(AnalyzerConfig::from_core(&config.analysis));
    if !args.severity.is_empty() {
        builder = builder.severity_terms(args.severity.clone());
    }
    if let Some(clusters) = args.clusters {
        builder = builder.cluster_count(clusters);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    Ok(builder.build()?)
}

/// Analysis result restricted to the selected view.
///
/// JSON output contains the whole report for `all`, otherwise only the
/// selected result set.
pub struct AnalyzeOutput {
    pub view: View,
    pub report: AnalysisReport,
}

impl Serialize for AnalyzeOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let report = &self.report;
        match self.view {
            View::All => report.serialize(serializer),
            View::Filtered => report.filtered.serialize(serializer),
            View::Correlated => report.correlated.serialize(serializer),
            View::Anomalies => report.anomalies.serialize(serializer),
            View::Hourly => report.hourly.serialize(serializer),
            View::Sources => report.sources.serialize(serializer),
        }
    }
}

impl Render for AnalyzeOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match self.view {
            View::All => {
                render_summary(&self.report, w)?;
                render_filtered(&self.report, w)?;
                render_correlated(&self.report, w)?;
                render_anomalies(&self.report, w)?;
                render_hourly(&self.report, w)?;
                render_sources(&self.report, w)
            }
            View::Filtered => render_filtered(&self.report, w),
            View::Correlated => render_correlated(&self.report, w),
            View::Anomalies => render_anomalies(&self.report, w),
            View::Hourly => render_hourly(&self.report, w),
            View::Sources => render_sources(&self.report, w),
        }
    }
}

fn heading(w: &mut dyn Write, title: &str, count: usize) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{} ({})", title.bold().cyan(), count)?;
    writeln!(w, "{}", "-".repeat(72))
}

fn event_row(w: &mut dyn Write, event: &LogEvent) -> std::io::Result<()> {
    writeln!(
        w,
        "{:>6}  {}  {:<16} {}",
        event.line(),
        event.raw_timestamp(),
        event.source(),
        event.message()
    )
}

fn render_summary(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    let stats = &report.stats;
    let source = report.source.as_deref().unwrap_or("-");
    writeln!(w, "Log Analysis: {}", source.bold())?;
    writeln!(w, "  Lines:              {}", stats.total_lines)?;
    writeln!(w, "  Events:             {}", report.events)?;
    writeln!(w, "  Blank lines:        {}", stats.blank_lines)?;
    writeln!(w, "  Skipped (malformed): {}", stats.skipped_lines)?;
    writeln!(w, "  Invalid timestamps: {}", stats.invalid_timestamps)?;
    if let Some(cluster) = &report.cluster {
        write!(
            w,
            "  Clusters:           {} (normal: {}, sizes: {:?})",
            cluster.cluster_count, cluster.normal_cluster, cluster.cluster_sizes
        )?;
        if let Some(requested) = report.reduced_from {
            write!(w, " {}", format!("reduced from {requested}").yellow())?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn render_filtered(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    heading(w, "Filtered Events", report.filtered.len())?;
    for event in &report.filtered {
        event_row(w, event)?;
    }
    Ok(())
}

fn render_correlated(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    heading(w, "Correlated Events", report.correlated.len())?;
    let mut current = None;
    for record in &report.correlated {
        if current != Some(record.group_id) {
            writeln!(w, "  {}", format!("group {}", record.group_id).dimmed())?;
            current = Some(record.group_id);
        }
        event_row(w, &record.event)?;
    }
    Ok(())
}

fn render_anomalies(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    heading(w, "Anomalous Events", report.anomalies.len())?;
    for event in &report.anomalies {
        event_row(w, event)?;
    }
    Ok(())
}

fn render_hourly(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    heading(w, "Events per Hour", report.hourly.len())?;
    let max = report.hourly.iter().map(|h| h.count).max().unwrap_or(0);
    for bucket in &report.hourly {
        let bar = if max == 0 {
            0
        } else {
            (bucket.count * BAR_WIDTH).div_ceil(max)
        };
        writeln!(
            w,
            "  {}  {:>6}  {}",
            bucket.hour.format("%Y-%m-%d %H:00"),
            bucket.count,
            "#".repeat(bar).green()
        )?;
    }
    Ok(())
}

fn render_sources(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    heading(w, "Event Sources", report.sources.len())?;
    let total: usize = report.sources.iter().map(|s| s.count).sum();
    for source in &report.sources {
        let share = if total == 0 {
            0.0
        } else {
            source.count as f64 * 100.0 / total as f64
        };
        writeln!(w, "  {:<24} {:>6}  {:>5.1}%", source.source, source.count, share)?;
    }
    Ok(())
}
