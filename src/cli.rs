// src/cli.rs
use anyhow::Result;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use crate::commands::{self, run::SuiteArgs};
use crate::core::config::DEFAULT_CONFIG_FILE;

/// Arguments shared by every subcommand that resolves a suite.
fn suite_args() -> Vec<Arg> {
    vec![
        Arg::new("name")
            .help("Name of the suite. Defaults to `name` in the config file, then the config file stem.")
            .value_name("NAME")
            .action(ArgAction::Set),
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Path to the suite configuration file.")
            .value_name("CONFIG")
            .default_value(DEFAULT_CONFIG_FILE)
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Set),
        Arg::new("tests")
            .short('t')
            .long("tests")
            .help("Test file or directory to run. May be given more than once.")
            .value_name("PATH")
            .value_parser(clap::value_parser!(PathBuf))
            .action(ArgAction::Append),
        Arg::new("pattern")
            .long("pattern")
            .help("Suffix a file must end with to be picked up as a test file.")
            .value_name("SUFFIX")
            .action(ArgAction::Set),
        Arg::new("random")
            .long("random")
            .help("Run the test files in random order, seeded from the current time.")
            .action(ArgAction::SetTrue),
        Arg::new("seed")
            .long("seed")
            .help("Run the test files in random order using this seed.")
            .value_name("SEED")
            .value_parser(clap::value_parser!(u64))
            .action(ArgAction::Set),
    ]
}

fn build_cli() -> Command {
    Command::new("suite-runner")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Discovers test files, runs them in a reproducible order and keeps timestamped run logs.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run the suite and write its run log and summary.")
                .args(suite_args())
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Write the summary into the run log instead of a separate summary file.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("stdout-only")
                        .long("stdout-only")
                        .help("Do not create any log files; print everything to the console.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Only write the run log, do not echo it to the console.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of test files to run at once. 0 uses one per CPU.")
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("log-root")
                        .long("log-root")
                        .help("Directory the timestamped log directories are created in.")
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Print the test files in execution order without running them.")
                .args(suite_args()),
        )
}

fn parse_suite_args(matches: &ArgMatches) -> SuiteArgs {
    let flag = |id: &str| {
        matches
            .try_get_one::<bool>(id)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    };

    SuiteArgs {
        name: matches.get_one::<String>("name").cloned(),
        config: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        config_is_default: matches.value_source("config") == Some(ValueSource::DefaultValue),
        tests: matches
            .get_many::<PathBuf>("tests")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default(),
        pattern: matches.get_one::<String>("pattern").cloned(),
        random: flag("random"),
        seed: matches.get_one::<u64>("seed").copied(),
        stdout: flag("stdout"),
        stdout_only: flag("stdout-only"),
        quiet: flag("quiet"),
        jobs: matches.try_get_one::<usize>("jobs").ok().flatten().copied(),
        log_root: matches
            .try_get_one::<PathBuf>("log-root")
            .ok()
            .flatten()
            .cloned(),
    }
}

pub async fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            commands::run::execute(parse_suite_args(run_matches)).await?;
        }
        Some(("list", list_matches)) => {
            commands::list::execute(parse_suite_args(list_matches))?;
        }
        _ => {
            // `subcommand_required` makes clap print help and exit before this.
        }
    }
    Ok(())
}
