use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use colored::Colorize;
use env_logger::Env;
use find_replace::{config, search, Config, ManifestScan, Reporter};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "find-replace")]
#[command(
    about = "Replace the go.mod module path in every .go file of a project",
    long_about = None
)]
#[command(version)]
#[command(after_help = "Be sure to read the README.md file for more information")]
struct Cli {
    /// The term to replace the module path with
    #[arg(long = "rs", value_name = "TERM")]
    replacement: Option<String>,

    /// Perform a dry run without modifying files
    #[arg(
        short = 'n',
        long = "dry-run",
        visible_alias = "dryrun",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    dry_run: bool,

    /// Project root containing go.mod (defaults to the current directory)
    #[arg(short = 'C', long = "root", value_name = "DIR")]
    root: Option<PathBuf>,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Search every go.mod line for the module declaration, not just the first
    #[arg(long)]
    scan_all: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Long flags that may also be spelled with a single dash (`-rs=x`, `-dry-run`).
const SINGLE_DASH_LONG_FLAGS: &[&str] = &[
    "rs", "dry-run", "dryrun", "help", "version", "root", "diff", "scan-all", "verbose",
];

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(env::args_os()));

    // RUST_LOG overrides the -v level
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    // Fail on a missing -rs before touching the filesystem
    let replacement = cli.replacement.unwrap_or_default();
    config::check_replacement(&replacement)?;

    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("failed to determine current directory")?,
    };
    log::info!("project root: {}", root.display());

    let scan = if cli.scan_all {
        ManifestScan::AllLines
    } else {
        ManifestScan::FirstLine
    };

    let config = Config::from_manifest(root, replacement, scan)?
        .with_dry_run(cli.dry_run)
        .with_diff(cli.diff);

    search(&config, &mut Reporter::stdout())?;
    Ok(())
}

/// Rewrite Go-style single-dash long flags to the double-dash form clap expects.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args = args.into_iter();
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut positional_only = false;

    for arg in args {
        if positional_only {
            normalized.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("--") => {
                positional_only = true;
                normalized.push(arg);
            }
            Some(flag) if is_single_dash_long_flag(flag) => {
                normalized.push(OsString::from(format!("-{flag}")));
            }
            _ => normalized.push(arg),
        }
    }

    normalized
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    SINGLE_DASH_LONG_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let args = std::iter::once("find-replace")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(normalize_args(args)).unwrap()
    }

    #[test]
    fn test_normalize_go_style_flags() {
        let args = ["find-replace", "-rs=example.com/bar", "-dry-run", "-n", "-vv"]
            .into_iter()
            .map(OsString::from);
        assert_eq!(
            normalize_args(args),
            vec![
                OsString::from("find-replace"),
                OsString::from("--rs=example.com/bar"),
                OsString::from("--dry-run"),
                OsString::from("-n"),
                OsString::from("-vv"),
            ]
        );
    }

    #[test]
    fn test_normalize_stops_after_double_dash() {
        let args = ["find-replace", "--", "-help"].into_iter().map(OsString::from);
        assert_eq!(
            normalize_args(args),
            vec![
                OsString::from("find-replace"),
                OsString::from("--"),
                OsString::from("-help"),
            ]
        );
    }

    #[test]
    fn test_parse_replacement_forms() {
        assert_eq!(
            parse(&["-rs=example.com/bar"]).replacement.as_deref(),
            Some("example.com/bar")
        );
        assert_eq!(
            parse(&["-rs", "example.com/bar"]).replacement.as_deref(),
            Some("example.com/bar")
        );
        assert_eq!(
            parse(&["--rs", "example.com/bar"]).replacement.as_deref(),
            Some("example.com/bar")
        );
        assert_eq!(parse(&[]).replacement, None);
    }

    #[test]
    fn test_parse_dry_run_aliases() {
        assert!(!parse(&["-rs=x"]).dry_run);
        assert!(parse(&["-rs=x", "-dry-run"]).dry_run);
        assert!(parse(&["-rs=x", "-dryrun"]).dry_run);
        assert!(parse(&["-rs=x", "--dryrun"]).dry_run);
        assert!(parse(&["-rs=x", "-n"]).dry_run);
        assert!(parse(&["-rs=x", "-dry-run=true"]).dry_run);
        assert!(!parse(&["-rs=x", "-dry-run=false"]).dry_run);
    }

    #[test]
    fn test_parse_dry_run_boolish_values() {
        assert!(parse(&["-rs=x", "-dryrun=1"]).dry_run);
        assert!(parse(&["-rs=x", "-dry-run=t"]).dry_run);
        assert!(parse(&["-rs=x", "-dry-run=TRUE"]).dry_run);
        assert!(!parse(&["-rs=x", "-dry-run=0"]).dry_run);
        assert!(!parse(&["-rs=x", "-dry-run=F"]).dry_run);
    }

    #[test]
    fn test_parse_supplementary_flags() {
        let cli = parse(&["-rs=x", "--root", "/tmp/app", "-d", "--scan-all", "-vvv"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/app")));
        assert!(cli.diff);
        assert!(cli.scan_all);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_help_is_a_display_request() {
        let args = ["find-replace", "-help"].into_iter().map(OsString::from);
        let err = Cli::try_parse_from(normalize_args(args)).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("README.md"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
