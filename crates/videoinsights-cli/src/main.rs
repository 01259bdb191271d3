use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use videoinsights_core::{
    AnalysisRequest, AppConfig, GatewayErrorPolicy, MediaRef, Outcome, VideoAnalyzer,
    check_inline_size, format_insight_readable, save_insight,
};

#[derive(Parser)]
#[command(name = "videoinsights")]
#[command(about = "Ask Gemini for a title, summary, tags and chapters of a video")]
#[command(group(ArgGroup::new("source").required(true).args(["url", "image", "video"])))]
struct Cli {
    /// YouTube URL (youtube.com/watch?v=... or youtu.be/...)
    url: Option<String>,

    /// Analyze a still frame (JPEG) taken from the video
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Send a local MP4 file inline
    #[arg(long, value_name = "PATH")]
    video: Option<PathBuf>,

    /// Answer language (e.g., "en", "he"). Defaults to the config value, then "auto".
    #[arg(short, long)]
    lang: Option<String>,

    /// Config file. Defaults to <config dir>/videoinsights/config.toml
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON instead of markdown
    #[arg(long)]
    json: bool,

    /// Also save the result as JSON
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Fail instead of showing sample results when the AI service errors
    #[arg(long)]
    strict: bool,
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "videoinsights=warn,videoinsights_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}

/// Read a local media file after checking its size against the inline limit
async fn read_inline(path: &Path, kind: &'static str) -> Result<Vec<u8>> {
    let len = fs::metadata(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?
        .len();
    check_inline_size(kind, len)?;
    fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

/// Turn the CLI source arguments into an in-memory media reference
async fn load_media(cli: &Cli) -> Result<MediaRef> {
    if let Some(url) = &cli.url {
        return Ok(MediaRef::from_url(url)?);
    }
    if let Some(path) = &cli.image {
        let bytes = read_inline(path, MediaRef::INLINE_IMAGE).await?;
        return Ok(MediaRef::InlineImage { bytes });
    }
    if let Some(path) = &cli.video {
        let bytes = read_inline(path, MediaRef::INLINE_VIDEO).await?;
        return Ok(MediaRef::InlineVideo { bytes });
    }
    anyhow::bail!("no video source given")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match AppConfig::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    if cli.strict {
        config.on_gateway_error = GatewayErrorPolicy::Propagate;
    }
    debug!(endpoint = %config.endpoint, policy = ?config.on_gateway_error, "Loaded config");

    // Validate the source before any network work
    let media = match load_media(&cli).await {
        Ok(media) => media,
        Err(e) => fail(e),
    };

    let language = cli.lang.clone().unwrap_or_else(|| config.language.clone());
    let analyzer = match VideoAnalyzer::from_config(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => fail(e),
    };
    let request = AnalysisRequest::new(media, language.clone(), config.api_key.clone());

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("videoinsights").cyan().bold(),
            style("Video Analyzer").dim()
        );
    }

    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Analyzing {} video with Gemini...", language))?;
    let analysis = match analyzer.analyze(request).await {
        Ok(analysis) => analysis,
        Err(e) => {
            spinner.finish_and_clear();
            fail(e)
        }
    };

    match &analysis.outcome {
        Outcome::Complete => spinner.finish_with_message(format!(
            "{} Analysis complete {}",
            style("✓").green().bold(),
            style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
        )),
        Outcome::Degraded(reason) => spinner.finish_with_message(format!(
            "{} {}",
            style("!").yellow().bold(),
            style(reason.notice()).yellow()
        )),
    }

    if let Some(path) = &cli.output {
        save_insight(&analysis.insight, path).await?;
        if !cli.json {
            println!(
                "\n{} {}",
                style("Saved:").dim(),
                style(path.display()).cyan()
            );
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis.insight)?);
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());

    // Human-readable output
    let readable = format_insight_readable(&analysis.insight);
    println!("{}", readable);

    Ok(())
}
