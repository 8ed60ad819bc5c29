//! Debug console for the containment and transfer campaign.
mod command;
mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use campaign_content::ContentFactory;
use campaign_core::CampaignError;
use directories::ProjectDirs;
use runtime::{
    ContainmentReply, Event, FileSaveRepository, Runtime, RuntimeConfig, RuntimeHandle,
    SaveRepository, Topic, TransferReply,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use command::{ConsoleCommand, HELP};
use config::CliConfig;

const SECONDS_PER_HOUR: u64 = 3600;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(config.session_id.as_deref())?;
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir.clone()),
        None => ContentFactory::bundled(),
    };
    let oracles = factory
        .load_oracles()
        .with_context(|| format!("loading content from {}", factory.data_dir().display()))?;

    let save_dir = config
        .save_dir
        .clone()
        .or_else(FileSaveRepository::default_dir)
        .unwrap_or_else(|| PathBuf::from("saves"));
    let repository: Arc<dyn SaveRepository> =
        Arc::new(FileSaveRepository::new(&save_dir, config.save_format)?);

    let mut runtime_config = RuntimeConfig {
        // the console advances time explicitly
        time_scale: 0,
        ..RuntimeConfig::default()
    };
    if let Some(size) = config.event_buffer {
        runtime_config.event_buffer_size = size;
    }

    let runtime = Runtime::builder()
        .config(runtime_config)
        .oracles(oracles)
        .repository(repository)
        .build()
        .await?;
    let handle = runtime.handle();
    spawn_message_printer(&handle);

    println!("Geoscape campaign console. Saves go to {}.", save_dir.display());
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if let Err(err) = execute(&handle, command).await {
            report_failure(line.trim(), &err);
        }
    }

    drop(handle);
    runtime.shutdown().await?;
    Ok(())
}

async fn execute(handle: &RuntimeHandle, command: ConsoleCommand) -> runtime::Result<()> {
    match command {
        ConsoleCommand::Containment(command) => match handle.containment(command).await? {
            ContainmentReply::Added => println!("added"),
            ContainmentReply::Killed(count) => println!("{count} killed"),
            ContainmentReply::Collected => println!("loaded onto aircraft"),
            ContainmentReply::Settled(report) => println!("unloaded: {report:?}"),
            ContainmentReply::Consumed(species) => println!("consumed: {}", species.join(", ")),
        },
        ConsoleCommand::Summary(base) => println!("{}", handle.base_summary(base).await?),
        ConsoleCommand::Transfers(index) => {
            let listings = handle.list_transfers().await?;
            match index {
                Some(n) => match n.checked_sub(1).and_then(|i| listings.get(i)) {
                    Some(listing) => println!("{listing}"),
                    None => println!("no transfer #{n} ({} in flight)", listings.len()),
                },
                None if listings.is_empty() => println!("no transfers in flight"),
                None => listings.iter().for_each(|listing| println!("{listing}")),
            }
        }
        ConsoleCommand::Ship {
            source,
            destination,
            request,
        } => print_transfer(handle.start_transfer(source, destination, request).await?),
        ConsoleCommand::Recover {
            aircraft,
            destination,
        } => print_transfer(handle.transfer_from_mission(aircraft, destination).await?),
        ConsoleCommand::Advance(hours) => {
            let report = handle
                .advance(hours.saturating_mul(SECONDS_PER_HOUR))
                .await?;
            if report.advanced {
                println!("now {}", report.date);
            } else {
                println!("time is stopped, 'resume' first");
            }
        }
        ConsoleCommand::Resume => {
            handle.resume_time().await?;
            println!("time resumed");
        }
        ConsoleCommand::Research(tech) => {
            if handle.mark_researched(tech.as_str()).await? {
                println!("{tech} researched");
            }
        }
        ConsoleCommand::Save(slot) => {
            handle.save(slot.as_str()).await?;
            println!("saved to '{slot}'");
        }
        ConsoleCommand::Load(slot) => {
            let report = handle.load(slot.as_str()).await?;
            for warning in &report.warnings {
                println!("  warning: {warning}");
            }
            println!("loaded '{slot}'");
        }
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => {}
    }
    Ok(())
}

/// Rule rejections carry their severity; anything else is a runtime failure.
fn report_failure(line: &str, err: &runtime::RuntimeError) {
    match err.campaign_error() {
        Some(rejection) => {
            let severity = rejection.severity().as_str();
            tracing::warn!(
                code = rejection.error_code(),
                severity,
                "Command '{}' rejected: {}",
                line,
                err
            );
            println!("{severity} error: {err}");
        }
        None => {
            tracing::error!("Command '{}' failed: {}", line, err);
            println!("error: {err}");
        }
    }
}

fn print_transfer(reply: TransferReply) {
    match reply {
        TransferReply::Started(id) => println!("{id} started"),
        TransferReply::Empty => println!("nothing to ship"),
    }
}

/// Echoes player-facing campaign messages as they are published.
fn spawn_message_printer(handle: &RuntimeHandle) {
    let mut receivers = handle.subscribe_multiple(&Topic::ALL);
    for (_, mut rx) in receivers.drain() {
        tokio::spawn(async move {
            while let Ok(event) = rx.recv().await {
                match &event {
                    Event::Campaign(campaign) => {
                        if let Some(text) = campaign.text() {
                            println!(">> {text}");
                        }
                    }
                    Event::Clock(_) => tracing::debug!("{:?}", event),
                }
            }
        });
    }
}

/// Setup logging to a session log file. Stdout is reserved for the console.
fn setup_logging(session_id: Option<&str>) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let session_id = session_id.map(str::to_owned).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_log_dir = log_directory().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "campaign.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/campaign.log", session_log_dir.display());

    Ok(guard)
}

/// Platform-specific log directory
fn log_directory() -> PathBuf {
    ProjectDirs::from("org", "geoscape", "campaign")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("geoscape-campaign").join("logs"))
}
