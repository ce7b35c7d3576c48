use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use ddlgen::run_pipeline;

/// Generate TypeScript record types, zod validators, repository
/// bindings and schema docs from a PostgreSQL DDL dump.
#[derive(Parser)]
#[command(name = "ddlgen", version, about)]
struct Args {
    /// Path to a schema-only DDL dump
    input: PathBuf,

    /// Directory for generated artifacts
    #[arg(short, long, default_value = "generated")]
    out_dir: PathBuf,

    /// Also write the assembled schema model as JSON
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let ddl = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let output = match run_pipeline(&ddl) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            process::exit(1);
        }
    };

    for warning in &output.warnings {
        eprintln!("warning: {}", warning);
    }

    let written = match output.artifacts.write_to(&args.out_dir) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to write {}: {}", args.out_dir.display(), e);
            process::exit(1);
        }
    };
    for path in &written {
        println!("wrote {}", path.display());
    }

    if let Some(path) = &args.model {
        let json = match serde_json::to_string_pretty(&output.model) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Failed to serialize model: {}", e);
                process::exit(1);
            }
        };
        if let Err(e) = fs::write(path, json) {
            eprintln!("Failed to write {}: {}", path.display(), e);
            process::exit(1);
        }
        println!("wrote {}", path.display());
    }
}
