//! Build script for the moodtune gateway.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so the gateway finds a ready-to-edit example next to the `.env`
//! file it loads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` to `<data_local_dir>/moodtune/.env.example`.
///
/// # Destination
///
/// - Linux: `~/.local/share/moodtune/.env.example`
/// - macOS: `~/Library/Application Support/moodtune/.env.example`
/// - Windows: `%LOCALAPPDATA%/moodtune/.env.example`
///
/// A missing template or an unwritable data directory only produces a cargo
/// warning; neither fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("moodtune");

    let copied = fs::create_dir_all(&out_dir).and_then(|_| {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)
    });

    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
