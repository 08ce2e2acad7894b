use crate::aggregator::{Aggregator, CallGraphIndex, IngestReport};
use crate::parser::{JsonSampleDecoder, SampleDecoder, ZlibJsonSampleDecoder};
use crate::source::open_source;
use crate::utils::config::Settings;
use anyhow::{Context, Result};
use log::{info, warn};

/// Read, aggregate and finalize the samples described by `settings`
///
/// Averages are normalized over every sample read, including skipped ones.
pub fn build_index(settings: &Settings) -> Result<(CallGraphIndex, IngestReport)> {
    let source = open_source(&settings.input, settings.limit)
        .with_context(|| format!("Failed to open samples at {}", settings.input.display()))?;

    let decoder: &dyn SampleDecoder = if settings.compressed {
        &ZlibJsonSampleDecoder
    } else {
        &JsonSampleDecoder
    };

    let mut aggregator = Aggregator::new();
    let report = aggregator.ingest(source, decoder);

    report
        .ensure_populated()
        .context("Nothing to aggregate, check the input path and limit")?;

    if report.skipped > 0 {
        warn!(
            "{} of {} samples were skipped; averages still use all {} requests",
            report.skipped,
            report.read,
            report.request_count()
        );
    }

    info!("Aggregating...");
    let index = aggregator
        .finalize_with(report.request_count(), settings.percentile)
        .context("Failed to finalize aggregates")?;

    Ok((index, report))
}

/// Display version information
pub fn display_version() {
    println!("Callgraph Console v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Aggregates call-graph profiling samples and explores callers/callees interactively.");
}
