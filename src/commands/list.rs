// src/commands/list.rs

use anyhow::Result;
use colored::*;

use crate::commands::run::SuiteArgs;
use crate::core::suite::TestSuite;

/// Prints the resolved execution order of a suite without running anything.
pub fn execute(args: SuiteArgs) -> Result<()> {
    let (name, file) = args.resolve()?;
    let suite = TestSuite::new(&name, file.suite, file.host)?;

    println!(
        "{}",
        format!(
            "{} test files in the {} suite:",
            suite.test_files().len(),
            suite.name()
        )
        .bold()
    );
    if let Some(seed) = suite.random_seed() {
        println!("{}", format!("Using random seed {seed}").cyan());
    }
    for file in suite.test_files() {
        println!("  {}", file.display());
    }
    Ok(())
}
