//! Jump height from manually marked times.

use hangtime_common::config::AppConfig;
use hangtime_jump_model::event::{EventSource, JumpEvent};
use hangtime_jump_model::height::HeightUnit;
use hangtime_motion_core::JumpMeasurement;

pub fn run(
    config: &AppConfig,
    takeoff: f64,
    landing: f64,
    unit: Option<HeightUnit>,
) -> anyhow::Result<()> {
    let unit = super::resolve_unit(config, unit)?;
    let event = JumpEvent::new(takeoff, landing);

    print_event(&event, unit);
    println!("  Source: {}", EventSource::Manual);
    Ok(())
}

/// Print takeoff, landing, hang time, height and category.
pub fn print_event(event: &JumpEvent, unit: HeightUnit) {
    let fmt_time = |t: Option<f64>| t.map_or_else(|| "-".to_string(), |t| format!("{t:.3}s"));
    println!("  Takeoff: {}", fmt_time(event.takeoff_secs));
    println!("  Landing: {}", fmt_time(event.landing_secs));

    let Some(measurement) = JumpMeasurement::from_event(event, unit) else {
        println!("  Height: -");
        return;
    };

    println!("  Hang time: {:.3}s", measurement.hang_time_secs());
    println!("  Height: {}", measurement.height());
    println!("  Category: {}", measurement.category());

    if !event.is_causal() {
        tracing::warn!(
            takeoff = ?event.takeoff_secs,
            landing = ?event.landing_secs,
            "Landing is not after takeoff"
        );
        println!("  [WARN] Landing is not after takeoff; the height is not meaningful.");
    }
}
