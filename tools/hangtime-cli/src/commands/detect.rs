//! Detect a jump in a directory of frames.

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use hangtime_common::config::AppConfig;
use hangtime_detector::{DetectionOutcome, ImageSequenceProvider, JumpDetector, TracingObserver};
use hangtime_jump_model::height::HeightUnit;

pub async fn run(
    config: &AppConfig,
    dir: PathBuf,
    fps: f64,
    sample_rate: Option<u32>,
    unit: Option<HeightUnit>,
    json: bool,
) -> anyhow::Result<()> {
    let unit = super::resolve_unit(config, unit)?;
    let mut detection = config.detection;
    if let Some(rate) = sample_rate {
        detection.sample_rate_hz = rate;
    }
    detection.validate()?;

    let mut provider = ImageSequenceProvider::open(&dir, fps)
        .map_err(|e| anyhow::anyhow!("Failed to open frames in {}: {e}", dir.display()))?;

    let detector = JumpDetector::new(detection);
    let stop_flag = detector.stop_flag();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping detection");
            stop_flag.store(true, Ordering::SeqCst);
        }
    });

    let outcome = detector.detect(&mut provider, &TracingObserver).await;
    ctrl_c.abort();
    let outcome = outcome?;

    if json {
        let report = outcome.report().with_height(unit);
        println!("{}", report.to_json_pretty()?);
    } else {
        print_summary(&outcome, &dir, unit);
    }

    Ok(())
}

fn print_summary(outcome: &DetectionOutcome, dir: &std::path::Path, unit: HeightUnit) {
    println!("Jump detection: {}", dir.display());
    println!(
        "  Samples: {} @ {} Hz",
        outcome.series.len(),
        outcome.sample_rate_hz
    );
    if let Some(stats) = outcome.analysis.as_ref().and_then(|a| a.stats) {
        println!(
            "  Motion mean: {:.3}, std-dev: {:.3}",
            stats.mean, stats.std_dev
        );
    }
    if let Some(analysis) = &outcome.analysis {
        println!("  Peaks above threshold: {}", analysis.peaks.len());
    }
    println!();

    super::height::print_event(&outcome.event, unit);
    println!("  Source: {}", outcome.source);
    if let Some(error) = &outcome.error {
        println!("  [WARN] Sampling error: {error}");
    }
    if outcome.is_fallback() {
        println!("  [WARN] No jump detected; the times above are default estimates.");
    }
}
