//! pillcalc - command line front end
//!
//! Prints the derived camera figures for a setup and can write the motion blur surface as JSON
//! for plotting.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;

use pillcalc::config::CalculatorConfig;
use pillcalc::evaluate::evaluate;
use pillcalc::geometry::VelocityChoice;
use pillcalc::sweep::SweepSurface;

fn usage(prog: &str) {
    eprintln!("Usage: {} <average|maximum|CONFIG_JSON> [SWEEP_OUT_JSON]", prog);
    eprintln!("Example: {} maximum", prog);
    eprintln!("Example: {} rig.json surface.json", prog);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut args = env::args();
    let prog = args.next().unwrap_or_else(|| "pillcalc".to_owned());

    let Some(source) = args.next() else {
        usage(&prog);
        std::process::exit(2);
    };

    // a bare velocity name runs the default setup, anything else is a config file
    let config = match source.parse::<VelocityChoice>() {
        Ok(velocity) => CalculatorConfig::with_defaults(velocity),
        Err(_) => CalculatorConfig::load(Path::new(&source))
            .with_context(|| format!("loading configuration {}", source))?,
    };
    let sweep_out: Option<PathBuf> = args.next().map(PathBuf::from);

    log::info!(
        "Setup: {}mm working distance, {}mm pills, {}x{} degrees, {}, {}us at {}fps",
        config.setup.working_distance_mm(), config.setup.pill_diameter_mm(),
        config.setup.horizontal_afov_deg(), config.setup.vertical_afov_deg(),
        config.setup.resolution(), config.setup.exposure_time_us(), config.setup.capture_rate_fps()
    );

    let evaluation = evaluate(&config.setup, config.velocity).context("evaluating setup")?;
    println!("{}", evaluation);

    if let Some(path) = sweep_out {
        let surface = SweepSurface::for_evaluation(&config.sweep, &evaluation).context("generating blur surface")?;
        surface.write_json(&path).with_context(|| format!("writing blur surface to {}", path.display()))?;

        let (rows, cols) = surface.shape();
        let nearest = surface.nearest_sample(*config.setup.exposure_time_us(), evaluation.resolution.spatial_resolution_mm_per_px);
        log::info!(
            "Wrote {}x{} blur surface to {}, nearest sample to this setup is {:.2}px at {:.1}us, {:.3}mm/px",
            rows, cols, path.display(), nearest.motion_blur_px, nearest.exposure_us, nearest.spatial_resolution_mm_per_px
        );
    }

    Ok(())
}
