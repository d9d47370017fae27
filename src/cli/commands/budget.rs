use finlit_core::{BudgetDraft, DeleteOutcome};
use finlit_domain::RecordKind;

use crate::cli::commands::{require_args, take_yes_flag};
use crate::cli::context::{resolve_selector, ShellContext};
use crate::cli::error::CommandError;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};
use crate::cli::table::{Table, TableColumn};

const USAGE: &str = "budget add <income|expense> <amount> <category...> | budget list [income|expense] | budget delete <#|id> [--yes] | budget summary";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Track income and expense entries",
        USAGE,
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((sub, rest)) = args.split_first() else {
        return list_records(context, None);
    };
    match sub.to_lowercase().as_str() {
        "add" => add_record(context, rest),
        "list" | "ls" => {
            let filter = match rest.first() {
                Some(raw) => Some(parse_kind(raw)?),
                None => None,
            };
            list_records(context, filter)
        }
        "delete" | "rm" => delete_record(context, rest),
        "summary" => show_summary(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget action `{other}`; {USAGE}"
        ))),
    }
}

fn parse_kind(raw: &str) -> Result<RecordKind, CommandError> {
    RecordKind::parse(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{raw}` is not income or expense"))
    })
}

fn add_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "budget add <income|expense> <amount> <category...>")?;
    let kind = parse_kind(args[0])?;
    let category = args[2..].join(" ");
    let mut draft = BudgetDraft::new(args[1], category, kind);
    let id = context.budget.add(&mut draft)?;
    if let Some(record) = context.budget.get(id) {
        io::print_success(format!(
            "Added {} of {} for {}.",
            record.kind.label().to_lowercase(),
            context.money(record.amount),
            record.category
        ));
    }
    Ok(())
}

fn list_records(context: &ShellContext, filter: Option<RecordKind>) -> CommandResult {
    if context.budget.is_empty() {
        io::print_info("No entries yet. Add one with `budget add`.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::left("Kind"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ]);
    for (index, record) in context.budget.records().iter().enumerate() {
        if filter.is_some_and(|kind| kind != record.kind) {
            continue;
        }
        table.push_row(vec![
            (index + 1).to_string(),
            context.date(record.date),
            record.kind.label().to_string(),
            record.category.clone(),
            context.money(record.amount),
        ]);
    }
    output::section("Budget entries");
    output::block(&table.render());
    Ok(())
}

fn delete_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (assume_yes, args) = take_yes_flag(args);
    require_args(&args, 1, "budget delete <#|id> [--yes]")?;
    let id = resolve_selector(
        args[0],
        context.budget.records().iter().map(|record| record.id),
    )?;

    let prompt = context.delete_prompt(assume_yes);
    let outcome = context.budget.delete(id, &prompt);

    match outcome {
        DeleteOutcome::Removed => io::print_success("Entry deleted."),
        DeleteOutcome::Cancelled => io::print_info("Deletion cancelled."),
        DeleteOutcome::NotFound => {
            return Err(CommandError::InvalidArguments(format!("no entry with id {id}")))
        }
    }
    Ok(())
}

fn show_summary(context: &ShellContext) -> CommandResult {
    let aggregates = context.budget.aggregates();
    output::section("Budget summary");
    io::print_info(format!("Total income : {}", context.money(aggregates.total_income)));
    io::print_info(format!("Total expense: {}", context.money(aggregates.total_expense)));
    io::print_info(format!("Balance      : {}", context.money(aggregates.balance)));

    for kind in RecordKind::ALL {
        let totals = context.budget.category_totals(kind);
        if totals.is_empty() {
            continue;
        }
        let mut table = Table::new(vec![
            TableColumn::left(kind.label()),
            TableColumn::right("Amount"),
        ]);
        for (category, amount) in totals {
            table.push_row(vec![category, context.money(amount)]);
        }
        output::block(&table.render());
    }
    Ok(())
}
