use std::fs;
use std::path::PathBuf;

use clap::Parser;
use climate_service::api::generate_openapi_spec;

/// Write the climate service OpenAPI document to disk
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Destination file for the generated JSON
    #[arg(short, long, default_value = "openapi.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let spec = generate_openapi_spec();
    let json = serde_json::to_string_pretty(&spec)?;

    fs::write(&args.output, json)?;
    println!("✅ Generated {}", args.output.display());
    Ok(())
}
