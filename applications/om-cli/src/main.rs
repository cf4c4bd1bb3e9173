/// Om Player - headless terminal driver
use clap::{Parser, Subcommand};
use om_cli::{CliConfig, FileIndexStore, TerminalSink};
use om_metadata_client::MetadataClient;
use om_playback::{
    project, FileMetadataSource, Intent, MediaEvent, PlaybackController, PlaybackState,
    PlayerEvent, PlayerView,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "om-cli")]
#[command(about = "Om Player headless driver", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "OM_CONFIG")]
    config: Option<PathBuf>,

    /// Fetch metadata from this server instead of the local root
    #[arg(long)]
    base_url: Option<String>,

    /// Directory containing the metadata document
    #[arg(long)]
    root: Option<PathBuf>,

    /// File holding the persisted current index
    #[arg(long)]
    index_path: Option<PathBuf>,

    /// Print the projection as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the playlist and the current track
    List,
    /// Start the current track
    Play,
    /// Move to the next track and play it
    Next,
    /// Move to the previous track and play it
    Previous,
    /// Play the track at INDEX (wraps around, negatives count from the end)
    Select {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Shuffle the playlist and play from the top
    Shuffle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "om_cli=info,om_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = Some(base_url);
    }
    if let Some(root) = cli.root {
        config.root = root;
    }
    if let Some(index_path) = cli.index_path {
        config.index_path = index_path;
    }
    config.validate()?;

    let mut player = PlaybackController::new(
        config.player.clone(),
        Box::new(TerminalSink::new()),
        Box::new(FileIndexStore::new(&config.index_path)),
    );

    match &config.base_url {
        Some(base_url) => {
            let client = MetadataClient::new(base_url, &config.player.metadata_url)?;
            tracing::info!("Loading metadata from {}", client.url());
            player.load_from(&client).await;
        }
        None => {
            let source = FileMetadataSource::new(config.metadata_path());
            tracing::info!("Loading metadata from {}", source.path().display());
            player.load_from(&source).await;
        }
    }

    let intent = match cli.command {
        Commands::List => None,
        Commands::Play => Some(Intent::TogglePlay),
        Commands::Next => Some(Intent::Next),
        Commands::Previous => Some(Intent::Previous),
        Commands::Select { index } => Some(Intent::Select(index)),
        Commands::Shuffle => Some(Intent::Shuffle),
    };
    if let Some(intent) = intent {
        player.dispatch(intent);
    }

    // The terminal sink starts immediately
    if player.state() == PlaybackState::Starting {
        player.handle_media_event(MediaEvent::PlayStarted);
    }

    for event in player.drain_events() {
        if let PlayerEvent::Error { message } = event {
            tracing::warn!("{}", message);
        }
    }

    let view = project(&player);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }

    Ok(())
}

fn print_view(view: &PlayerView) {
    if let Some(message) = view.message {
        println!("{}", message);
        return;
    }
    if view.rows.is_empty() {
        return;
    }

    println!("[{}] {}", view.play_label, view.title);
    if !view.artist.is_empty() {
        println!("    {}", view.artist);
    }
    if let Some(cover) = &view.cover {
        println!("    cover: {}", cover);
    }
    println!("    {} / {}  ({})", view.elapsed, view.total, view.repeat_label);
    println!();

    for (index, row) in view.rows.iter().enumerate() {
        let marker = if row.active { ">" } else { " " };
        println!("{} {:>3}. {}", marker, index, row.label);
    }
}
