//! Casewise CLI - converts the case of text files or standard input.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use casewise::{AutoCapitalize, CaseOperation, Config, EditingContext, PlainField, convert};
use clap::Parser;
use rayon::prelude::*;
use similar::TextDiff;

/// Converts the case of text: uppercase, lowercase, title case, sentence
/// case, or toggle case.
#[derive(Parser, Debug)]
#[command(name = "casewise")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s) to convert. Without files, the config's include
    /// patterns are used, then stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Case operation to apply.
    #[arg(short, long, value_enum)]
    operation: Option<CaseOperation>,

    /// Replay the input as keystrokes with sentence-start capitalization.
    #[arg(long, conflicts_with = "operation")]
    type_replay: bool,

    /// Write converted output back to the input file(s).
    #[arg(short, long, conflicts_with_all = ["check", "diff", "stdin"])]
    write: bool,

    /// Check if files would change (exit 1 if so).
    #[arg(short, long)]
    check: bool,

    /// Print a unified diff instead of the converted output.
    #[arg(short, long)]
    diff: bool,

    /// Read input from stdin.
    #[arg(long)]
    stdin: bool,

    /// Path to a configuration file.
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Do not look for a configuration file.
    #[arg(long)]
    no_config: bool,

    /// Log debug messages.
    #[arg(short, long)]
    verbose: bool,
}

/// What to do with each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Convert(CaseOperation),
    TypeReplay,
}

impl Mode {
    fn resolve(args: &Args, config: &Config) -> Option<Self> {
        if let Some(op) = args.operation {
            Some(Mode::Convert(op))
        } else if args.type_replay {
            Some(Mode::TypeReplay)
        } else if let Some(op) = config.operation {
            Some(Mode::Convert(op))
        } else if config.auto_capitalize {
            Some(Mode::TypeReplay)
        } else {
            None
        }
    }

    fn apply(self, input: &str) -> String {
        match self {
            Mode::Convert(op) => convert(input, op),
            Mode::TypeReplay => {
                let context = EditingContext::new(AutoCapitalize::Enabled);
                let mut field = PlainField::with_caret_at_end("");
                context.type_text(&mut field, input);
                field.value().to_string()
            }
        }
    }
}

fn load_config(args: &Args) -> Result<(Config, PathBuf), casewise::ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(path) = &args.config {
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| cwd.clone(), Path::to_path_buf);
        return Ok((Config::from_file(path)?, base));
    }
    if args.no_config {
        return Ok((Config::default(), cwd));
    }
    match Config::discover(&cwd)? {
        Some((path, config)) => {
            log::debug!("using configuration {}", path.display());
            let base = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
            Ok((config, base))
        }
        None => Ok((Config::default(), cwd)),
    }
}

fn print_diff(name: &str, input: &str, output: &str) {
    let diff = TextDiff::from_lines(input, output);
    print!("{}", diff.unified_diff().header(name, name));
}

/// Reads and converts `files` in parallel.  Results are in the order of
/// `files`.
fn convert_files(files: &[PathBuf], mode: Mode) -> Vec<io::Result<(String, String)>> {
    files
        .par_iter()
        .map(|file| {
            let input = fs::read_to_string(file)?;
            let output = mode.apply(&input);
            Ok::<_, io::Error>((input, output))
        })
        .collect()
}

/// Converts `files` and reports each one as `args` asks.  Returns `Ok(false)`
/// if `--check` found a file that would change.
fn process_files(args: &Args, mode: Mode, files: &[PathBuf]) -> Result<bool, String> {
    let mut all_unchanged = true;
    for (file, result) in files.iter().zip(convert_files(files, mode)) {
        let (input, output) =
            result.map_err(|e| format!("Error reading {}: {}", file.display(), e))?;

        if args.check {
            if input != output {
                eprintln!("{}: would change", file.display());
                all_unchanged = false;
            }
        } else if args.diff {
            print_diff(&file.display().to_string(), &input, &output);
        } else if args.write {
            if input != output {
                fs::write(file, &output)
                    .map_err(|e| format!("Error writing {}: {}", file.display(), e))?;
                log::debug!("rewrote {}", file.display());
            }
        } else {
            print!("{}", output);
        }
    }
    Ok(all_unchanged)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (config, base_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(mode) = Mode::resolve(&args, &config) else {
        eprintln!("No operation given; use --operation, --type-replay, or a config file.");
        return ExitCode::FAILURE;
    };
    log::debug!("mode: {:?}", mode);

    let files = if args.stdin || !args.files.is_empty() {
        args.files.clone()
    } else {
        match config.collect_files(&base_dir) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error collecting files: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    if files.is_empty() && !args.stdin && !config.include.is_empty() {
        eprintln!("No files matched the configured include patterns.");
        return ExitCode::FAILURE;
    }

    if args.stdin || files.is_empty() {
        let mut input = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut input) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::FAILURE;
        }
        let output = mode.apply(&input);
        if args.check {
            return if input == output {
                ExitCode::SUCCESS
            } else {
                eprintln!("<stdin>: would change");
                ExitCode::FAILURE
            };
        }
        if args.diff {
            print_diff("<stdin>", &input, &output);
        } else {
            print!("{}", output);
        }
        return ExitCode::SUCCESS;
    }

    match process_files(&args, mode, &files) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
