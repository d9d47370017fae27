use finlit_core::{amortization_schedule, LoanDraft, PaymentOutcome};
use uuid::Uuid;

use crate::cli::commands::require_args;
use crate::cli::context::{resolve_selector, ShellContext};
use crate::cli::error::CommandError;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};
use crate::cli::table::{Table, TableColumn};

const USAGE: &str = "loan add <name> <amount> <rate%> <months> | loan list | loan pay <#|id> | loan delete <#|id> | loan schedule <#|id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "loan",
        "Track loans and monthly installments",
        USAGE,
        cmd_loan,
    )]
}

fn cmd_loan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((sub, rest)) = args.split_first() else {
        return list_loans(context);
    };
    match sub.to_lowercase().as_str() {
        "add" => add_loan(context, rest),
        "list" | "ls" => list_loans(context),
        "pay" => pay_installment(context, rest),
        "delete" | "rm" => delete_loan(context, rest),
        "schedule" => show_schedule(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown loan action `{other}`; {USAGE}"
        ))),
    }
}

fn select_loan(context: &ShellContext, args: &[&str], usage: &str) -> Result<Uuid, CommandError> {
    require_args(args, 1, usage)?;
    resolve_selector(args[0], context.loans.loans().iter().map(|loan| loan.id))
}

fn add_loan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 4, "loan add <name> <amount> <rate%> <months>")?;
    let mut draft = LoanDraft::new(args[0], args[1], args[2], args[3]);
    let id = context.loans.add(&mut draft)?;
    if let Some(loan) = context.loans.get(id) {
        io::print_success(format!(
            "Added loan `{}` with EMI {} over {} months.",
            loan.name,
            context.money(loan.emi),
            loan.term_months
        ));
    }
    Ok(())
}

fn list_loans(context: &ShellContext) -> CommandResult {
    if context.loans.is_empty() {
        io::print_info("No loans yet. Add one with `loan add`.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Name"),
        TableColumn::right("Principal"),
        TableColumn::right("Rate"),
        TableColumn::right("EMI"),
        TableColumn::right("Paid"),
        TableColumn::right("Progress"),
    ]);
    for (index, loan) in context.loans.loans().iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            loan.name.clone(),
            context.money(loan.principal),
            format!("{}%", loan.annual_rate_percent),
            context.money(loan.emi),
            format!("{}/{}", loan.paid_installments, loan.term_months),
            format!("{:.0}%", loan.progress_percent()),
        ]);
    }
    output::section("Loans");
    output::block(&table.render());

    let summary = context.loans.summary();
    io::print_info(format!(
        "Total monthly EMI: {}",
        context.money(context.loans.total_monthly_emi())
    ));
    io::print_info(format!(
        "Active loans: {} of {}, outstanding {}",
        summary.active_count,
        summary.loan_count,
        context.money(summary.total_outstanding)
    ));
    Ok(())
}

fn pay_installment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = select_loan(context, args, "loan pay <#|id>")?;
    match context.loans.mark_paid(id) {
        PaymentOutcome::Recorded { paid, remaining } => {
            io::print_success(format!(
                "Installment {paid} recorded, {remaining} remaining."
            ));
            if remaining == 0 {
                io::print_success("Loan fully paid off!");
            }
        }
        PaymentOutcome::AlreadyPaidOff => io::print_info("This loan is already paid off."),
        PaymentOutcome::NotFound => {
            return Err(CommandError::InvalidArguments(format!("no loan with id {id}")))
        }
    }
    Ok(())
}

fn delete_loan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = select_loan(context, args, "loan delete <#|id>")?;
    if !context.loans.delete(id) {
        return Err(CommandError::InvalidArguments(format!("no loan with id {id}")));
    }
    io::print_success("Loan deleted.");
    Ok(())
}

fn show_schedule(context: &ShellContext, args: &[&str]) -> CommandResult {
    let id = select_loan(context, args, "loan schedule <#|id>")?;
    let Some(loan) = context.loans.get(id) else {
        return Err(CommandError::InvalidArguments(format!("no loan with id {id}")));
    };

    let mut table = Table::new(vec![
        TableColumn::right("Month"),
        TableColumn::right("Opening"),
        TableColumn::right("Interest"),
        TableColumn::right("Principal"),
        TableColumn::right("Closing"),
    ]);
    let rows = amortization_schedule(
        loan.principal,
        loan.annual_rate_percent,
        loan.emi,
        loan.term_months,
    );
    for row in rows {
        let marker = if row.month <= loan.paid_installments {
            " ✓"
        } else {
            ""
        };
        table.push_row(vec![
            format!("{}{marker}", row.month),
            context.money(row.opening_balance),
            context.money(row.interest),
            context.money(row.principal_part),
            context.money(row.closing_balance),
        ]);
    }
    output::section(format!("Schedule: {}", loan.name));
    output::block(&table.render());
    let total = loan.total_payable();
    io::print_info(format!("Total payable : {}", context.money(total)));
    io::print_info(format!(
        "Total interest: {}",
        context.money(total - loan.principal)
    ));
    Ok(())
}
