use breakwatch_alerts::LogSink;
use breakwatch_ports::SeriesSource;
use breakwatch_runner::{
    BreakoutInjection, JsonSnapshotSource, Monitor, RunnerConfig, SyntheticSource,
};
use std::sync::Arc;

fn print_help() {
    eprintln!(
        r#"Breakwatch - statistical breakout monitor

USAGE:
    breakwatch [OPTIONS]

OPTIONS:
    --config <PATH>      Load configuration from JSON file
    --snapshot <PATH>    Read series from a JSON snapshot each cycle
    --synthetic          Use generated series (default when no snapshot is set)
    --passes <N>         Stop after N passes
    --help               Print this help message

ENVIRONMENT VARIABLES:
    BREAKWATCH_SIGMA_THRESHOLD   Band width in sigmas, 1.0 - 5.0 (default: 2.0)
    BREAKWATCH_MIN_POINTS        Minimum points per fit (default: 48)
    BREAKWATCH_ENABLED           Enable analysis (default: true)
    BREAKWATCH_INTERVAL_SECS     Seconds between passes (default: 60)
    RUST_LOG                     Log level filter

EXAMPLES:
    # Synthetic demo with an injected breakout, 5 quick passes
    BREAKWATCH_INTERVAL_SECS=1 breakwatch --synthetic --passes 5

    # Watch a snapshot rewritten by a collector
    breakwatch --snapshot /var/lib/breakwatch/series.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut snapshot_path: Option<String> = None;
    let mut synthetic = false;
    let mut passes: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--snapshot" | "-s" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --snapshot requires a path argument");
                    std::process::exit(1);
                }
                snapshot_path = Some(args[i].clone());
            }
            "--synthetic" => synthetic = true,
            "--passes" | "-n" => {
                i += 1;
                let Some(n) = args.get(i).and_then(|a| a.parse().ok()) else {
                    eprintln!("Error: --passes requires a number");
                    std::process::exit(1);
                };
                passes = Some(n);
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            RunnerConfig::from_file(&path)?
        }
        None => RunnerConfig::default(),
    };
    config.apply_env()?;
    if passes.is_some() {
        config.max_passes = passes;
    }
    if snapshot_path.is_some() {
        config.snapshot_path = snapshot_path;
    }

    let source: Box<dyn SeriesSource> = match (&config.snapshot_path, synthetic) {
        (Some(path), false) => Box::new(JsonSnapshotSource::new(path)),
        _ => {
            let mut synthetic = config.synthetic.clone();
            if synthetic.breakout.is_none() {
                // Shift on the third pass so the demo shows a crossing
                synthetic.breakout = Some(BreakoutInjection {
                    at_point: synthetic.history + 2,
                    magnitude: 6.0,
                });
            }
            Box::new(SyntheticSource::new(synthetic))
        }
    };

    log::info!("Starting Breakwatch monitor");
    log::info!("Source: {}", source.name());
    log::info!(
        "Sigma threshold: {}, min points: {}, window: {}, interval: {}s",
        config.analyzer.sigma_threshold,
        config.analyzer.min_data_points,
        config.window,
        config.interval().as_secs()
    );
    if !config.analyzer.enabled {
        log::warn!("Analysis disabled, passes will produce no events");
    }

    let mut monitor = Monitor::new(&config, source).with_sink(Arc::new(LogSink::new()));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let summary = monitor.run_until(shutdown).await;

    log::info!(
        "Done: {} passes, {} breakouts, {} sink errors",
        summary.passes,
        summary.events,
        summary.sink_errors
    );
    Ok(())
}
