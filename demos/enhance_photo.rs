//! Enhance a single photo and export the watermarked artifact.
//!
//! Usage:
//! ```sh
//! cargo run --example enhance_photo -- input.jpg https://example.com/enhance
//! ```

use std::env;
use std::path::Path;
use std::process;
use std::time::Duration;

use insta_transform::{share, EnhanceClient, FilterPreset, Session, DEFAULT_TIMEOUT_SECS};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <endpoint>", args[0]);
        process::exit(1);
    }

    let mut session = Session::new();
    session
        .ingest_path(Path::new(&args[1]))
        .expect("failed to read input image");

    let client = EnhanceClient::new(&args[2], Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .expect("failed to build enhancement client");

    match client.enhance(session.source().unwrap()) {
        Ok(enhanced) => session.apply_enhanced(enhanced),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }

    session.set_preset(FilterPreset::Vintage);

    match share::download(&session, Path::new(".")) {
        Ok(Some(path)) => println!("Done: {}", path.display()),
        Ok(None) => println!("Skipped: nothing to download"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
