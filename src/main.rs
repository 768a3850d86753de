//! CLI entry point for incident-drill
//!
//! Plays a drill in the terminal or validates a catalog file.

use incident_drill::catalog;
use incident_drill::lint::{LintLevel, LintResult, config::LintConfig};
use incident_drill::rules::RulesConfig;
use incident_drill::runtime::debug::{self, DebugConfig};
use std::path::PathBuf;
use std::process;

/// Parsed `play` arguments
#[derive(Debug, Default)]
struct PlayArgs {
    catalog: Option<PathBuf>,
    rules: Option<PathBuf>,
    debug: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => match parse_play_args(&args[2..]) {
            Ok(play_args) => run_play(play_args),
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!();
                print_usage();
                process::exit(1);
            }
        },
        "check" => {
            if args.len() < 3 {
                eprintln!("Error: Missing catalog file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            run_check(PathBuf::from(&args[2]));
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_play_args(args: &[String]) -> Result<PlayArgs, String> {
    let mut parsed = PlayArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" => parsed.debug = true,
            "--rules" => {
                let path = iter.next().ok_or("--rules needs a file path")?;
                parsed.rules = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path if parsed.catalog.is_none() => parsed.catalog = Some(PathBuf::from(path)),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }
    Ok(parsed)
}

fn print_usage() {
    println!("incident-drill - Incident response training RPG");
    println!();
    println!("USAGE:");
    println!("    cargo run -- play [catalog.json] [--rules rules.json] [--debug]");
    println!("    cargo run -- check <catalog.json>");
    println!();
    println!("COMMANDS:");
    println!("    play [file]       Play a drill (built-in scenario when no file is given)");
    println!("    check <file>      Validate a catalog file and print lint results");
    println!("    --help, -h        Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --rules <file>    Override rule constants from a JSON file");
    println!("    --debug           Show state details and log to stderr");
    println!();
    println!("ENVIRONMENT:");
    println!("    INCIDENT_DRILL_DEBUG    Enable debug logging without --debug");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run -- play");
    println!("    cargo run -- play scenarios/kingdom_of_service.json --debug");
}

fn run_play(args: PlayArgs) {
    let config = if args.debug {
        DebugConfig::verbose()
    } else {
        DebugConfig::default()
    };
    if let Err(err) = debug::install(config) {
        eprintln!("Warning: logging unavailable: {}", err);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: Failed to start async runtime");
            eprintln!("Reason: {}", err);
            process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        let rules = match &args.rules {
            Some(path) => RulesConfig::from_file(path)?,
            None => RulesConfig::default(),
        };
        let catalog = match &args.catalog {
            Some(path) => {
                let (catalog, report) =
                    catalog::load_file(path, &rules, &LintConfig::default()).await?;
                print_lint(&report);
                catalog
            }
            None => catalog::builtin_with_rules(&rules)?,
        };
        anyhow::Ok((catalog, rules))
    });

    let (catalog, rules) = match result {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Error: Failed to load drill");
            eprintln!("Reason: {:#}", err);
            process::exit(1);
        }
    };

    let _guard = runtime.enter();
    if let Err(err) = incident_drill::cli::play::run_play(catalog, rules, args.debug) {
        eprintln!("Error: Player mode failed");
        eprintln!("Reason: {}", err);
        process::exit(1);
    }
}

fn run_check(path: PathBuf) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: Failed to start async runtime");
            eprintln!("Reason: {}", err);
            process::exit(1);
        }
    };

    let loaded = runtime.block_on(catalog::load_file(
        &path,
        &RulesConfig::default(),
        &LintConfig::default(),
    ));

    match loaded {
        Ok((catalog, report)) => {
            println!("{}: OK", path.display());
            println!("  title:       {}", catalog.title);
            println!("  stages:      {}", catalog.stage_count());
            match catalog.fingerprint() {
                Ok(digest) => println!("  fingerprint: {}", digest),
                Err(err) => println!("  fingerprint: unavailable ({})", err),
            }
            print_lint(&report);
        }
        Err(err) => {
            eprintln!("{}: FAILED", path.display());
            match err.downcast_ref::<catalog::CatalogError>() {
                Some(catalog::CatalogError::Invalid(report)) => print_lint(report),
                _ => eprintln!("Reason: {:#}", err),
            }
            process::exit(1);
        }
    }
}

fn print_lint(report: &LintResult) {
    for issue in &report.issues {
        let level = match issue.level {
            LintLevel::Error => "error",
            LintLevel::Warning => "warning",
            LintLevel::Info => "info",
        };
        println!(
            "  {}[{}] {}: {}",
            level, issue.category, issue.location, issue.message
        );
    }
    if !report.issues.is_empty() {
        println!(
            "  {} error(s), {} warning(s), {} info",
            report.error_count, report.warning_count, report.info_count
        );
    }
}
