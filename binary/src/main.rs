use std::{env, error::Error, path::PathBuf, time::Instant};

use alpha_frequencies::{
    discover_workflow_net, import_event_log_json_from_path, AlphaFrequenciesConfig,
};

fn usage(args: &[String]) -> String {
    format!(
        "Usage: {} <path_to_event_log.json> [absolute_threshold] [relative_threshold]",
        args.first().map_or("binary", String::as_str)
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("{}", usage(&args));
        std::process::exit(1);
    }

    let input_path = PathBuf::from(&args[1]);
    let mut config = AlphaFrequenciesConfig::default();
    if let Some(abs) = args.get(2) {
        config.absolute_threshold = abs.parse()?;
    }
    if let Some(rel) = args.get(3) {
        config.relative_threshold = rel.parse()?;
    }

    let now = Instant::now();
    let log = import_event_log_json_from_path(&input_path)?;
    log::info!(
        "Imported event log with {} cases in {:#?}",
        log.len(),
        now.elapsed()
    );

    let res = discover_workflow_net(&log, config)?;
    log::info!(
        "Discovered workflow net with {} places and {} arcs",
        res.net.places.len(),
        res.net.arcs.len()
    );
    println!("{}", serde_json::to_string_pretty(&res)?);
    Ok(())
}
