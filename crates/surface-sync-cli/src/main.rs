use std::path::PathBuf;
use std::{env, process};

use anyhow::Result;
use surface_sync_config::Config;

mod replay;
mod scenario;

use scenario::Scenario;

fn usage() -> ! {
    eprintln!("Usage: surface-sync-replay [--config <config.toml>] <scenario.toml>");
    process::exit(2);
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(&path)?.unwrap_or_default(),
        None => Config::load_or_default()?,
    };
    Ok(config)
}

fn main() -> Result<()> {
    let mut config_path = None;
    let mut scenario_path = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => usage(),
            },
            "-h" | "--help" => usage(),
            _ if scenario_path.is_none() => scenario_path = Some(PathBuf::from(&arg)),
            _ => usage(),
        }
    }
    let Some(scenario_path) = scenario_path else {
        usage();
    };

    let config = load_config(config_path)?;
    let level = config.log_level.parse().unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    log::info!("Replaying {}", scenario_path.display());
    let scenario = Scenario::load(&scenario_path)?;
    let result = replay::replay(&scenario, config.engine)?;

    let reconciled = result
        .outcomes
        .iter()
        .filter(|outcome| outcome.report().is_some())
        .count();
    println!(
        "{} batch(es), {} reconciled, surface generation {}",
        result.outcomes.len(),
        reconciled,
        result.generation
    );
    for (index, block) in result.document.blocks().iter().enumerate() {
        println!("{index:>3} <{}> {:?}", block.tag, block.text());
    }
    Ok(())
}
