use std::path::Path;
use std::process;
use std::time::Duration;

use clap::Parser;

use insta_transform::{
    compositor, share, EnhanceClient, FilterPreset, Platform, Session, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser)]
#[command(
    name = "insta-transform",
    about = "Enhance a photo, apply a preset filter, and export a watermarked PNG",
    version,
    after_help = "Simple usage: insta-transform photo.jpg  (export the photo as-is)\n\n\
                  With --enhance, the photo is first sent to the enhancement endpoint;\n\
                  filters and the watermark only apply to enhanced exports."
)]
struct Cli {
    /// Input image file
    input: String,

    /// Directory for the downloaded artifact (default: current directory)
    #[arg(short, long, default_value = ".")]
    out_dir: String,

    /// Enhancement service endpoint; omit to skip enhancement
    #[arg(long)]
    enhance: Option<String>,

    /// Enhancement request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Preset filter: none, vintage, crisp, urban
    #[arg(short, long, default_value = "none")]
    filter: String,

    /// Disable the "InstaTransform" watermark on the export
    #[arg(long)]
    no_watermark: bool,

    /// Before/after boundary for the preview frame (0-100)
    #[arg(long, default_value_t = 50)]
    reveal: i64,

    /// Write the before/after comparison frame to this path
    #[arg(long)]
    preview: Option<String>,

    /// Print a share URL for a platform: twitter, facebook, instagram
    #[arg(long)]
    share: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let preset: FilterPreset = match cli.filter.parse() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if !(0..=100).contains(&cli.reveal) {
        eprintln!("Error: Reveal position must be between 0 and 100");
        process::exit(1);
    }

    let input_path = Path::new(&cli.input);
    let mut session = Session::new();
    if let Err(e) = session.ingest_path(input_path) {
        eprintln!("Error: Failed to read {}: {e}", cli.input);
        process::exit(1);
    }

    if let Some(endpoint) = &cli.enhance {
        run_enhancement(&mut session, endpoint, cli.timeout);
    }

    session.set_preset(preset);
    session.set_watermark(!cli.no_watermark);
    session.set_reveal(cli.reveal);

    if let Some(preview_path) = &cli.preview {
        write_preview(&session, Path::new(preview_path));
    }

    match share::download(&session, Path::new(&cli.out_dir)) {
        Ok(Some(path)) => eprintln!("[OK] Exported {}", path.display()),
        Ok(None) => eprintln!("[SKIP] No enhanced image; nothing to download"),
        Err(e) => {
            eprintln!("[FAIL] Export: {e}");
            process::exit(1);
        }
    }

    if let Some(platform) = &cli.share {
        print_share_url(platform);
    }
}

fn run_enhancement(session: &mut Session, endpoint: &str, timeout: u64) {
    let client = match EnhanceClient::new(endpoint, Duration::from_secs(timeout)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Fatal: Failed to initialize enhancement client: {e}");
            process::exit(1);
        }
    };

    let source = session
        .source()
        .expect("session was ingested before enhancement");

    match client.enhance(source) {
        Ok(enhanced) => {
            session.apply_enhanced(enhanced);
            eprintln!("[OK] Photo enhanced");
        }
        Err(e) => {
            // Not fatal: the pipeline continues with whatever the session holds.
            eprintln!("[FAIL] {e}");
        }
    }
}

fn write_preview(session: &Session, path: &Path) {
    match compositor::preview(session) {
        Ok(frame) => {
            if let Err(e) = frame.save(path) {
                eprintln!("[FAIL] Preview: {e}");
            } else {
                eprintln!("[OK] Preview written to {}", path.display());
            }
        }
        Err(e) => eprintln!("[FAIL] Preview: {e}"),
    }
}

fn print_share_url(platform: &str) {
    let platform: Platform = match platform.parse() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    match share::share_url(platform) {
        Some(url) => println!("{url}"),
        None => eprintln!("[SKIP] {platform} has no share intent"),
    }
}
