mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use hlspack::config;
use hlspack_av::{package, probe_source, ToolRegistry, TranscodeJob};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hlspack=trace,hlspack_av=trace".to_string()
        } else {
            "hlspack=info,hlspack_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Package { input, output_dir } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(package_file(&input, &output_dir, cli.config.as_deref()))
        }
        Commands::Probe { file, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(probe_file(&file, json, cli.config.as_deref()))
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("hlspack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn package_file(input: &Path, output_dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let tools = ToolRegistry::discover(&config.tools);

    let job = TranscodeJob::new(input, output_dir, config.packaging.ladder())?
        .with_audio_bitrate_kbps(config.packaging.audio_bitrate_kbps)
        .with_segment_duration_secs(config.packaging.segment_duration_secs)
        .with_video_preset(config.packaging.video_preset.clone());

    tracing::info!(
        "packaging {:?} ({} renditions)",
        input,
        job.ladder.len()
    );

    let master = package(&tools, &job, None).await?;

    println!("Master playlist: {}", master.display());
    Ok(())
}

async fn probe_file(file: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let tools = ToolRegistry::discover(&config.tools);
    let info = probe_source(&tools, file).await?;

    if json {
        let json_str = serde_json::to_string_pretty(&info)?;
        println!("{}", json_str);
    } else {
        println!("File: {}", file.display());
        println!("Container: {}", info.container);
        if let Some(duration) = info.duration_secs {
            let secs = duration as u64;
            let mins = secs / 60;
            let hours = mins / 60;
            println!("Duration: {:02}:{:02}:{:02}", hours, mins % 60, secs % 60);
        }
        match &info.video {
            Some(video) => println!("Video: {} {}x{}", video.codec, video.width, video.height),
            None => println!("Video: none"),
        }
        println!("Audio: {}", if info.has_audio { "present" } else { "none" });
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = ToolRegistry::discover(&config.tools);
    let mut all_ok = true;

    for tool in tools.check_all() {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable packaging.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!(
                "  Segment duration: {}s",
                config.packaging.segment_duration_secs
            );
            println!("  Audio bitrate: {}k", config.packaging.audio_bitrate_kbps);
            println!("  Renditions: {}", config.packaging.renditions.len());
            for rendition in &config.packaging.renditions {
                println!(
                    "    {} {}x{} @ {}k",
                    rendition.label,
                    rendition.width,
                    rendition.height,
                    rendition.video_bitrate_kbps
                );
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!(
                "  Segment duration: {}s",
                config.packaging.segment_duration_secs
            );
            println!("  Audio bitrate: {}k", config.packaging.audio_bitrate_kbps);
            println!("  Renditions: {}", config.packaging.renditions.len());
        }
    }

    Ok(())
}
