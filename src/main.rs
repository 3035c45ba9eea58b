//! mindcheck - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mindcheck::cli::{answers_file, parse_assignments, Args, Commands, Verbosity};
use mindcheck::client::PredictionClient;
use mindcheck::config::{Config, Mode};
use mindcheck::doctor::Doctor;
use mindcheck::form::FormState;
use mindcheck::repl::{DisplayManager, ReplSession};
use mindcheck::session::FormSession;
use mindcheck::telemetry::{TelemetryCollector, TelemetryDisplay};
use mindcheck::{predictor, server, view};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(message) = args.validate() {
        eprintln!("{} {}", "Error:".red().bold(), message);
        std::process::exit(2);
    }

    init_tracing(args.verbosity())?;

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env();
    args.apply_to(&mut config);
    if !config.display.color {
        colored::control::set_override(false);
    }

    match &args.command {
        None | Some(Commands::Start) => {
            config.validate()?;
            run_questionnaire(&args, &config).await?;
        }
        Some(Commands::Submit { answers, set, json }) => {
            config.validate()?;
            run_submit(&args, &config, answers.as_deref(), set, *json).await?;
        }
        Some(Commands::Options) => {
            config.validate()?;
            list_options(&config).await?;
        }
        Some(Commands::Serve { host, port }) => {
            run_server(&config, host.clone(), *port).await?;
        }
        Some(Commands::Doctor) => {
            run_doctor(config).await;
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
    }

    Ok(())
}

fn init_tracing(verbosity: Verbosity) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(verbosity.log_filter().parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

async fn run_questionnaire(args: &Args, config: &Config) -> Result<()> {
    let telemetry = TelemetryCollector::new();
    let predictor = predictor::from_config(config, telemetry.clone())?;
    let mut session = FormSession::new(predictor).with_telemetry(telemetry.clone());
    let display = DisplayManager::new().with_progress(args.verbosity().show_progress());

    if config.assessment.mode == Mode::Remote {
        load_academic_options(config, session.form_mut(), &display).await;
    }

    let mut repl_session = ReplSession::new(session)?.with_display(display);

    repl_session.show_welcome(VERSION);
    repl_session.run().await?;

    TelemetryDisplay::new(telemetry, args.verbosity()).display_summary();
    Ok(())
}

/// Replace the built-in academic options with the service's list, if usable
async fn load_academic_options(config: &Config, form: &mut FormState, display: &DisplayManager) {
    let client = match PredictionClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "could not build client for academic options");
            return;
        }
    };

    match client.academic_options().await {
        Ok(options) => {
            let dropped = form.set_academic_options(options);
            if !dropped.is_empty() {
                display.show_warning(&format!(
                    "Ignoring unknown academic options: {}",
                    dropped.join(", ")
                ));
            }
        }
        Err(e) => {
            tracing::info!(error = %e, "using built-in academic options");
        }
    }
}

async fn run_submit(
    args: &Args,
    config: &Config,
    answers: Option<&std::path::Path>,
    set: &[String],
    json: bool,
) -> Result<()> {
    let telemetry = TelemetryCollector::new();
    let predictor = predictor::from_config(config, telemetry.clone())?;
    let mut session = FormSession::new(predictor).with_telemetry(telemetry.clone());

    if let Some(path) = answers {
        answers_file::load_into(path, session.form_mut())?;
    }
    let overrides = parse_assignments(set).map_err(anyhow::Error::msg)?;
    answers_file::apply(session.form_mut(), overrides)?;

    let result = session.submit().await;
    TelemetryDisplay::new(telemetry, args.verbosity()).display_summary();

    match (result, session.submitted_answers()) {
        (Ok(assessment), Some(answers)) => {
            let stdout = std::io::stdout();
            view::write_report(&mut stdout.lock(), &assessment, answers, json)?;
            Ok(())
        }
        (Ok(_), None) => anyhow::bail!("Submitted answers were not kept"),
        (Err(e), _) => {
            eprintln!("{} {}", "Error:".red().bold(), e.user_message());
            std::process::exit(1);
        }
    }
}

async fn list_options(config: &Config) -> Result<()> {
    let client = PredictionClient::from_config(config)?;
    match client.academic_options().await {
        Ok(options) => {
            println!("Academic performance options ({}):", client.primary_url());
            for option in options {
                println!("  - {}", option);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e.user_message());
            std::process::exit(1);
        }
    }
}

async fn run_server(config: &Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    println!("{} http://{}", "Scoring service listening on".green(), addr);
    server::serve(addr).await?;
    Ok(())
}

async fn run_doctor(config: Config) {
    let checks = Doctor::new(config).run_diagnostics().await;
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::failure_count(&checks) == 0 { 0 } else { 1 });
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    println!("\n{}", "mindcheck Configuration".bold().cyan());
    println!("{}\n", "=".repeat(50).cyan());
    println!("File: {}\n", path.display());

    println!("API:");
    println!("  Base URL:          {}", config.api.base_url);
    for url in &config.api.backup_urls {
        println!("  Backup URL:        {}", url);
    }
    println!("  Timeout:           {}s", config.api.timeout_secs);
    println!("  Encoding:          {}", config.api.encoding.as_str());
    println!(
        "  Plain-http retry:  {}",
        if config.downgrade_enabled() { "enabled" } else { "disabled" }
    );
    println!();

    println!("Assessment:");
    println!("  Mode:              {}", config.assessment.mode.as_str());
    println!();

    println!("Server:");
    println!("  Listen:            {}:{}", config.server.host, config.server.port);
    println!();

    println!("Display:");
    println!("  Color:             {}", if config.display.color { "enabled" } else { "disabled" });
    println!("  Verbosity:         {}", args.verbosity().as_str());
    println!();

    Ok(())
}
