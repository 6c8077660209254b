use clap::Parser;
use ipainfo::{extract_ipa_info_with_options, ExtractOptions, IpaError, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ipainfo")]
#[command(about = "Extract bundle metadata and the app icon from an .ipa")]
#[command(version)]
struct Cli {
    /// The .ipa to inspect
    ipa: PathBuf,

    /// Directory that receives the assets/ folder
    dest: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Glob selecting Info.plist entries (case-insensitive)
    #[arg(long)]
    manifest_pattern: Option<String>,

    /// Glob selecting icon entries (case-insensitive)
    #[arg(long)]
    icon_pattern: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("[!] {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if !cli.ipa.is_file() {
        return Err(IpaError::InvalidInput(format!(
            "{} is not a file",
            cli.ipa.display()
        )));
    }

    let mut options = ExtractOptions::default();
    if let Some(pattern) = cli.manifest_pattern {
        options.manifest_pattern = pattern;
    }
    if let Some(pattern) = cli.icon_pattern {
        options.icon_pattern = pattern;
    }

    let info = extract_ipa_info_with_options(&cli.ipa, &cli.dest, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let metadata = &info.metadata;
    println!("[*] bundle id:      {}", metadata.bundle_identifier);
    println!("[*] name:           {}", metadata.bundle_name);
    println!("[*] display name:   {}", metadata.display_name);
    println!("[*] version:        {}", metadata.short_version);
    println!("[*] build:          {}", metadata.bundle_version);

    if info.assets.is_empty() {
        println!("[?] no assets extracted");
    }
    for asset in &info.assets {
        println!("[*] {}: \x1b[96m{}\x1b[0m", asset.kind, asset.path.display());
    }

    Ok(())
}
