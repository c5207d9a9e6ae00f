//! CLI argument parsing

use crate::DEFAULT_CHUNK_SIZE;

/// Output directory used when `--out-dir` is not given.
pub const DEFAULT_OUT_DIR: &str = "setores";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub input: String,
    pub out_dir: String,
    pub manifest: Option<String>,
    pub target_code: Option<String>,
    pub chunk_size: usize,
    pub progress_interval_secs: Option<u64>,
    pub quiet: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            input: String::new(),
            out_dir: DEFAULT_OUT_DIR.to_string(),
            manifest: None,
            target_code: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval_secs: None,
            quiet: false,
        }
    }
}

/// Parse command line arguments (`args[0]` is the program name)
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli_args = CliArgs::default();
    let rest = args.get(1..).unwrap_or_default();
    let mut i = 0;

    while i < rest.len() {
        match rest[i].as_str() {
            "--out-dir" => {
                cli_args.out_dir = take_value(rest, &mut i, "--out-dir requires a directory")?;
            }
            "--manifest" => {
                cli_args.manifest =
                    Some(take_value(rest, &mut i, "--manifest requires a file path")?);
            }
            "--cd-mun" => {
                let code = take_value(rest, &mut i, "--cd-mun requires a value")?;
                if code.is_empty() {
                    return Err("--cd-mun must not be empty".to_string());
                }
                cli_args.target_code = Some(code);
            }
            "--chunk-size" => {
                let raw = take_value(rest, &mut i, "--chunk-size requires a value")?;
                let size: usize = raw
                    .parse()
                    .map_err(|_| "--chunk-size must be a positive integer".to_string())?;
                if size == 0 {
                    return Err("--chunk-size must be greater than zero".to_string());
                }
                cli_args.chunk_size = size;
            }
            "--progress-interval" => {
                let raw = take_value(rest, &mut i, "--progress-interval requires a value")?;
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| "--progress-interval must be a positive integer".to_string())?;
                if secs == 0 {
                    return Err("--progress-interval must be greater than zero".to_string());
                }
                cli_args.progress_interval_secs = Some(secs);
            }
            "--quiet" => {
                cli_args.quiet = true;
            }
            arg if !arg.starts_with("--") => {
                if cli_args.input.is_empty() {
                    cli_args.input = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
            other => return Err(format!("Unknown option: {other}")),
        }
        i += 1;
    }

    if cli_args.input.is_empty() {
        return Err("Missing required argument: INPUT".to_string());
    }

    Ok(cli_args)
}

fn take_value(args: &[String], i: &mut usize, missing: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i).cloned().ok_or_else(|| missing.to_string())
}
