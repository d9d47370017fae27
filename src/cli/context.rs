//! Shell state: loaded ledgers, preferences, the active quiz, and the helpers
//! commands share for dispatch, formatting and error reporting.

use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use finlit_config::{Config, ConfigManager};
use finlit_core::{
    BudgetLedger, CurrencyFormatter, DateFormatter, DeleteChoice, DeletePrompt, LocaleFormatter,
    LoanLedger, Persistence, QuizSession, SystemClock,
};
use finlit_storage_json::JsonFileStore;
use strsim::levenshtein;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cli::commands;
use crate::cli::error::{CliError, CommandError};
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};

/// Overrides the base directory holding `config/` and `data/`.
pub const HOME_ENV: &str = "FINLIT_HOME";
/// Any value switches the shell to reading commands from stdin.
pub const SCRIPT_ENV: &str = "FINLIT_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub formatter: LocaleFormatter,
    pub data_dir: PathBuf,
    pub budget: BudgetLedger,
    pub loans: LoanLedger,
    pub quiz: Option<QuizSession>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = env::var_os(HOME_ENV).map(PathBuf::from);
        let config_base = home.clone().unwrap_or_else(default_config_base);
        let config_manager = ConfigManager::with_base_dir(config_base)?;
        let config = config_manager.load()?;
        let data_dir = resolve_data_dir(&config, home.as_deref());
        Self::with_parts(mode, config_manager, config, data_dir)
    }

    /// Builds a shell over explicit config and data locations.
    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        data_dir: PathBuf,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let store = JsonFileStore::new(data_dir.clone())?;
        let persistence = Persistence::new(Arc::new(store));
        let budget = BudgetLedger::load(persistence.clone(), Arc::new(SystemClock));
        let loans = LoanLedger::load(persistence);
        info!(data_dir = %data_dir.display(), "shell ready");

        let context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            formatter: LocaleFormatter::new(&config.locale),
            config,
            data_dir,
            budget,
            loans,
            quiz: None,
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        Ok(context)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        "finlit> ".to_string()
    }

    pub fn money(&self, amount: f64) -> String {
        self.formatter.format_amount(amount, &self.config.currency)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        self.formatter.format_date(date)
    }

    /// Re-derives formatter and output style after a config change.
    pub fn apply_config(&mut self) {
        self.formatter = LocaleFormatter::new(&self.config.locale);
        self.apply_output_preferences();
    }

    fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color: self.config.ui_color_enabled && !self.config.plain_output,
            plain: self.config.plain_output,
        });
    }

    pub fn save_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_info("Use `help <command>` for usage details.");
            }
            other => {
                warn!(error = %other, command = ?self.last_command, "command failed");
                cli_io::print_error(other);
            }
        }
    }

    /// Confirmation used by destructive commands. Script runs cannot answer
    /// a prompt, so they confirm only when `assume_yes` is set.
    pub(crate) fn delete_prompt(&self, assume_yes: bool) -> ShellPrompt {
        ShellPrompt {
            mode: self.mode,
            assume_yes,
        }
    }
}

pub(crate) struct ShellPrompt {
    mode: CliMode,
    assume_yes: bool,
}

impl DeletePrompt for ShellPrompt {
    fn ask(&self, title: &str, message: &str) -> DeleteChoice {
        if self.assume_yes {
            return DeleteChoice::Delete;
        }
        if self.mode == CliMode::Script {
            cli_io::print_warning(format!("{title}: pass --yes to confirm in script mode."));
            return DeleteChoice::Cancel;
        }
        match cli_io::confirm_action(&ColorfulTheme::default(), message, false) {
            Ok(true) => DeleteChoice::Delete,
            Ok(false) => DeleteChoice::Cancel,
            Err(err) => {
                warn!(error = %err, "confirmation prompt failed");
                DeleteChoice::Cancel
            }
        }
    }
}

/// Resolves a 1-based list position or a full record id.
pub(crate) fn resolve_selector(
    input: &str,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<Uuid, CommandError> {
    let ids: Vec<Uuid> = ids.into_iter().collect();
    if let Ok(position) = input.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| ids.get(index).copied())
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "no entry at position {position} (list has {})",
                    ids.len()
                ))
            });
    }
    Uuid::parse_str(input.trim()).map_err(|_| {
        CommandError::InvalidArguments(format!(
            "`{input}` is neither a list position nor a record id"
        ))
    })
}

fn default_config_base() -> PathBuf {
    dirs::config_dir()
        .map(|base| base.join("finlit"))
        .unwrap_or_else(|| PathBuf::from(".finlit"))
}

fn resolve_data_dir(config: &Config, home: Option<&Path>) -> PathBuf {
    match (&config.data_dir, home) {
        (Some(dir), _) => dir.clone(),
        (None, Some(home)) => home.join("data"),
        (None, None) => config.resolve_data_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_accepts_positions_and_ids() {
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();
        let ids = [first, second];

        assert_eq!(resolve_selector("2", ids).unwrap(), second);
        assert_eq!(resolve_selector(&first.to_string(), ids).unwrap(), first);
        assert!(resolve_selector("0", ids).is_err());
        assert!(resolve_selector("3", ids).is_err());
        assert!(resolve_selector("abc", ids).is_err());
    }

    #[test]
    fn home_directory_hosts_data_unless_configured() {
        let home = Path::new("/tmp/finlit-home");
        let mut config = Config::default();
        assert_eq!(
            resolve_data_dir(&config, Some(home)),
            home.join("data")
        );

        config.data_dir = Some(PathBuf::from("/srv/finlit"));
        assert_eq!(
            resolve_data_dir(&config, Some(home)),
            PathBuf::from("/srv/finlit")
        );
    }
}
