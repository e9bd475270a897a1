use quick_gestures::replay::{load_trace, replay};
use quick_gestures::settings::GestureSettings;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(settings_path), Some(trace_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: quick_gestures <settings.json> <trace.json> [log-file]");
    };
    let log_file = args.next().map(PathBuf::from);

    let settings = GestureSettings::load(&settings_path)?;
    quick_gestures::logging::init(settings.debug_logging, log_file);

    let trace = load_trace(&trace_path)?;
    let results = replay(Arc::new(settings), &trace);
    tracing::info!(gestures = results.len(), "replay finished");
    for result in results {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}
