mod cli;

use vodforge::config::{self, Config, InputConfig, OutputDestination};
use vodforge::poller::{RemoteTask, StatusSource, TaskTarget};
use vodforge::recipes::{self, Recipe, Session};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, TaskKind};
use std::path::Path;
use vodforge_api::{EncodingId, ManifestId};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vodforge=trace,vodforge_api=debug".to_string()
        } else {
            "vodforge=info,vodforge_api=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { recipe } => block_on(run_recipe(recipe, cli.config.as_deref())),
        Commands::Status { kind, id, json } => {
            block_on(print_status(kind, id, json, cli.config.as_deref()))
        }
        Commands::Wait { kind, id } => block_on(wait(kind, id, cli.config.as_deref())),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vodforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// All remote work is sequential, so a current-thread runtime is enough.
fn block_on<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    rt.block_on(future)
}

fn target(kind: TaskKind, id: String) -> TaskTarget {
    match kind {
        TaskKind::Encoding => TaskTarget::Encoding(EncodingId::from(id)),
        TaskKind::Dash => TaskTarget::DashManifest(ManifestId::from(id)),
        TaskKind::Hls => TaskTarget::HlsManifest(ManifestId::from(id)),
    }
}

async fn run_recipe(recipe: Recipe, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let session = Session::from_config(&config)?;

    let summary = recipes::run(&session, recipe, &config).await?;

    println!("Encoding:      {}", summary.encoding_id);
    println!("DASH manifest: {}", summary.dash_manifest_id);
    println!("HLS manifest:  {}", summary.hls_manifest_id);
    Ok(())
}

async fn print_status(
    kind: TaskKind,
    id: String,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let session = Session::from_config(&config)?;
    let task = RemoteTask::new(&session.client, target(kind, id));

    let status = task
        .fetch_status()
        .await
        .with_context(|| format!("Failed to fetch status of {}", task.label()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}: {}", task.label(), status.status);
    if let Some(progress) = status.progress {
        println!("  Progress: {}%", progress);
    }
    for message in status.error_messages() {
        println!("  Error: {}", message);
    }
    Ok(())
}

async fn wait(kind: TaskKind, id: String, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let session = Session::from_config(&config)?;

    let task = session.wait_for(target(kind, id)).await?;
    println!("{}", task.status);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, checking default locations");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    print_summary(&config);
    Ok(())
}

fn print_summary(config: &Config) {
    println!("  API: {}", config.api.base_url);
    println!("  Poll interval: {}s", config.polling.interval_secs);
    println!(
        "  Encoding: {} ({}, {})",
        config.encoding.title, config.encoding.cloud_region, config.encoding.encoder_version
    );

    match &config.input {
        Some(InputConfig::S3 { bucket_name, .. }) => println!("  Input: s3 ({})", bucket_name),
        Some(InputConfig::Https { host, .. }) => println!("  Input: https ({})", host),
        None => println!("  Input: not configured"),
    }

    match &config.output {
        Some(output) => {
            let kind = match &output.destination {
                OutputDestination::AkamaiNetstorage { .. } => "akamai-netstorage",
                OutputDestination::GenericS3 { .. } => "generic-s3",
                OutputDestination::S3 { .. } => "s3",
            };
            println!(
                "  Output: {} ({})",
                kind,
                output.base_path(&config.encoding.title)
            );
        }
        None => println!("  Output: not configured"),
    }

    println!(
        "  h264-cenc: {} video / {} audio renditions, DRM {}",
        config.h264_cenc.video.len(),
        config.h264_cenc.audio.len(),
        if config.h264_cenc.drm.is_some() { "configured" } else { "not configured" }
    );
    println!(
        "  dolby-vision-atmos: {} video / {} audio renditions",
        config.dolby_vision_atmos.video.len(),
        config.dolby_vision_atmos.audio.len()
    );
}
