pub mod budget;
pub mod calculators;
pub mod config;
pub mod loan;
pub mod quiz;
pub mod system;

use crate::cli::error::CommandError;
use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(budget::definitions())
        .chain(loan::definitions())
        .chain(calculators::definitions())
        .chain(quiz::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}

/// Splits `--yes`/`-y` out of the positional arguments.
pub(crate) fn take_yes_flag<'a>(args: &[&'a str]) -> (bool, Vec<&'a str>) {
    let mut yes = false;
    let mut rest = Vec::with_capacity(args.len());
    for arg in args {
        if matches!(*arg, "--yes" | "-y") {
            yes = true;
        } else {
            rest.push(*arg);
        }
    }
    (yes, rest)
}

pub(crate) fn require_args(args: &[&str], count: usize, usage: &str) -> Result<(), CommandError> {
    if args.len() < count {
        return Err(CommandError::usage(usage));
    }
    Ok(())
}
