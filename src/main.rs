use clap::Parser;
use procam_calib_rs::calibration::convert;
use procam_calib_rs::logger;

use tracing::info;

/// Converts a projector-camera calibration (OpenCV YAML) into the renderer's
/// calibration_result JSON.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Calibration result written by the calibration tool (.yml)
    path_to_yml: String,

    /// Destination JSON document, created or overwritten
    path_to_json: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    info!("Converting {} -> {}", args.path_to_yml, args.path_to_json);

    convert(&args.path_to_yml, &args.path_to_json)?;

    info!("Conversion successful!");
    Ok(())
}
