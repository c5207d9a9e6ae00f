//! GeoJSON splitter (geosplit) - Main binary entry point

use geosplit::cli::args::{CliArgs, parse_args};
use geosplit::cli::output::{format_progress, format_report, format_totals};
use geosplit::{ProgressSnapshot, ScanEnd, SplitOptions};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug geosplit MG_setores_CD2022.json
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    process::exit(handle_split(&cli_args));
}

fn handle_split(args: &CliArgs) -> i32 {
    let mut opts = SplitOptions {
        target_code: args.target_code.clone(),
        chunk_size: args.chunk_size,
        ..SplitOptions::default()
    };

    if let Some(secs) = args.progress_interval_secs {
        opts.progress_interval = Duration::from_secs(secs);
    }

    if !args.quiet {
        opts.progress_notifier = Some(Arc::new(|snapshot: &ProgressSnapshot| {
            eprintln!("{}", format_progress(snapshot));
        }));

        eprintln!("Splitting: {}", args.input);
        if let Some(code) = &args.target_code {
            eprintln!("Only municipality code {code}");
        }
    }

    let manifest = args.manifest.as_deref().map(Path::new);
    let summary = match geosplit::split_file(&args.input, &args.out_dir, manifest, &opts) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return match e {
                geosplit::Error::InvalidInput(_) => 2,
                _ => 4,
            };
        }
    };

    if !args.quiet {
        eprintln!("{}", format_totals(&summary));
        match summary.scan_end {
            ScanEnd::Complete => {}
            ScanEnd::NoFeaturesKey => eprintln!("Warning: no \"features\" array found"),
            ScanEnd::MissingArray => {
                eprintln!("Warning: \"features\" key is not followed by an array");
            }
            ScanEnd::UnterminatedArray | ScanEnd::UnterminatedFeature { .. } => {
                eprintln!("Warning: input ended before the features array was closed");
            }
        }
    }

    println!("{}", format_report(&summary, &args.out_dir));
    0
}

fn print_help() {
    println!("GeoJSON splitter (geosplit) - Fan a FeatureCollection out per municipality");
    println!();
    println!("USAGE:");
    println!("    geosplit <INPUT> [OPTIONS]");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!();
    println!("OPTIONS:");
    println!("    --out-dir <DIR>           Directory for per-municipality files (default: setores)");
    println!("    --manifest <FILE>         Manifest path (default: <DIR>/index.json)");
    println!("    --cd-mun <CODE>           Only write features of this municipality code");
    println!("    --chunk-size <BYTES>      Read size per chunk (default: 65536)");
    println!("    --progress-interval <S>   Emit progress updates every S seconds (default: 2)");
    println!("    --quiet                   Suppress non-error output");
    println!();
    println!("EXAMPLES:");
    println!("    geosplit MG_setores_CD2022.json --out-dir cities/setores-mg");
    println!("    geosplit MG_setores_CD2022.json --cd-mun 3106200 --quiet");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("geosplit {VERSION}");
    println!("Commit: {GIT_HASH}");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
