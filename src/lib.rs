//! moodtune gateway library
//!
//! Turns a free-text mood description into a curated song list and a mood
//! color, and optionally materializes the list as a private Spotify playlist
//! through an OAuth authorization-code handshake.
//!
//! # Modules
//!
//! - `api` - HTTP handlers exposed by the gateway
//! - `completion` - Chat-completion client used for song and color generation
//! - `config` - Configuration loaded once from the environment
//! - `error` - Error taxonomy shared by all modules
//! - `extract` - Best-effort extraction of structured data from model output
//! - `generator` - Playlist generation with fallback content
//! - `oauth` - OAuth handshake and the state codec
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Spotify Web API client and playlist materialization
//! - `types` - Data structures and type definitions
//! - `utils` - Small string helpers
//!
//! # Example
//!
//! ```
//! use moodtune::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> moodtune::Res<()> {
//!     config::load_env()
//!         .await
//!         .map_err(|e| moodtune::Error::InvalidConfig(".env", e))?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config, None).await
//! }
//! ```

pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod oauth;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// # Example
///
/// ```
/// use moodtune::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Created playlist {}", url);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable startup failures. Request handlers must never
/// call it.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every failure that is absorbed instead of surfaced: fallback
/// substitutions, skipped tracks, unobserved add-tracks failures.
///
/// # Example
///
/// ```
/// warning!("Song list parsing failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
