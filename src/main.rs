use std::{sync::Arc, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use moodtune::{
    api::AppState,
    completion::OpenAiClient,
    config::{self, Config},
    error, generator::PlaylistGenerator, info, server, success, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the gateway
    Serve(ServeOptions),

    /// Generate a playlist for a mood from the terminal
    Generate(GenerateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// How you are feeling
    text: String,

    /// Open the Spotify login page to save the playlist (needs a running gateway)
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    match cli.command {
        Command::Serve(opt) => {
            if let Err(e) = server::start_api_server(config, opt.addr).await {
                error!("Server stopped: {}", e);
            }
        }
        Command::Generate(opt) => generate_playlist(&config, &opt).await,
        Command::Completions(_) => unreachable!("handled before loading the environment"),
    }
}

async fn generate_playlist(config: &Config, opt: &GenerateOptions) {
    let completion = Arc::new(OpenAiClient::new(reqwest::Client::new(), config));
    let generator = PlaylistGenerator::new(completion);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Asking for songs...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let generated = generator.generate(&opt.text).await;
    pb.finish_and_clear();

    println!("{}", Table::new(&generated.songs));
    success!("Mood color: {}", generated.mood_color);

    if !opt.open {
        return;
    }

    let state = AppState::new(config);
    let login_url = match state
        .oauth
        .start()
        .build_login_redirect(&opt.text, &generated.songs)
    {
        Ok(url) => url,
        Err(e) => error!("Cannot build login url: {}", e),
    };

    info!("Opening Spotify login, the gateway at {} completes it", config.server_addr);
    if webbrowser::open(login_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }
}
