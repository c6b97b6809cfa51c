use clap::Parser;
use scene_scripter::cli::commands::{cmd_format, cmd_generate, cmd_interactive, cmd_regenerate};
use scene_scripter::cli::config::{Cli, Commands, load_config, resolve_backend, resolve_trace_path};
use scene_scripter::trace::logger::TraceLogger;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > defaults
    let backend = resolve_backend(&cli, &config);
    let tracer = match resolve_trace_path(&cli, &config) {
        Some(path) => TraceLogger::new(&path),
        None => TraceLogger::disabled(),
    };

    let result = match &cli.command {
        Commands::Generate { mood, save, output } => {
            cmd_generate(mood, save.as_deref(), output, &config, &backend, &tracer)
        }
        Commands::Regenerate {
            mood,
            previous,
            save,
            output,
        } => cmd_regenerate(
            mood,
            previous.as_deref(),
            save.as_deref(),
            output,
            &config,
            &backend,
            &tracer,
        ),
        Commands::Format { script, output } => cmd_format(script, output, &config),
        Commands::Interactive => cmd_interactive(&backend, &tracer),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise -v raises the default level.
fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("scene_scripter={}", level)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}
