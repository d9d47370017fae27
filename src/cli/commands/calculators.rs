use finlit_core::{
    compute_emi, parse_count, parse_number, tip_for_day, Clock, CompoundInputs, CreditFactors,
    SystemClock, COMPOUNDING_TIPS,
};

use crate::cli::commands::require_args;
use crate::cli::context::ShellContext;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "emi",
            "Compute the monthly installment of a loan",
            "emi <amount> <rate%> <months>",
            cmd_emi,
        ),
        CommandEntry::new(
            "compound",
            "Project compound interest growth",
            "compound <principal> <rate%> <years> [periods-per-year]",
            cmd_compound,
        ),
        CommandEntry::new(
            "score",
            "Simulate a credit score",
            "score [payment-history% utilization% credit-age-years]",
            cmd_score,
        ),
    ]
}

fn cmd_emi(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, "emi <amount> <rate%> <months>")?;
    let principal = parse_number("loan amount", args[0])?;
    let rate = parse_number("interest rate", args[1])?;
    let months = parse_count("duration", args[2])?;
    let emi = compute_emi(principal, rate, months)?;
    let total = emi * months as f64;

    output::section("EMI");
    io::print_info(format!("Monthly installment: {}", context.money(emi)));
    io::print_info(format!("Total payable      : {}", context.money(total)));
    io::print_info(format!(
        "Total interest     : {}",
        context.money(total - principal)
    ));
    Ok(())
}

fn cmd_compound(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(
        args,
        3,
        "compound <principal> <rate%> <years> [periods-per-year]",
    )?;
    let default_frequency = context.config.default_compounding_frequency.to_string();
    let frequency = args.get(3).copied().unwrap_or(default_frequency.as_str());
    let inputs = CompoundInputs::parse(args[0], args[1], args[2], frequency)?;
    let result = inputs.compute()?;

    output::section("Compound interest");
    io::print_info(format!(
        "Future value   : {}",
        context.money(result.future_value)
    ));
    io::print_info(format!(
        "Interest earned: {}",
        context.money(result.total_interest)
    ));
    for tip in COMPOUNDING_TIPS {
        io::print_info(format!("Tip: {tip}"));
    }
    Ok(())
}

fn cmd_score(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let factors = if args.is_empty() {
        CreditFactors::default()
    } else {
        require_args(
            args,
            3,
            "score [payment-history% utilization% credit-age-years]",
        )?;
        CreditFactors::new(
            parse_number("payment history", args[0])?,
            parse_number("credit utilization", args[1])?,
            parse_number("credit age", args[2])?,
        )
    };
    let band = factors.band();

    output::section("Credit score");
    io::print_info(format!(
        "Payment history {:.0}%, utilization {:.0}%, credit age {:.0} years",
        factors.payment_history, factors.utilization, factors.credit_age_years
    ));
    io::print_success(format!("Score: {} ({band})", factors.score()));
    io::print_info(band.message());
    io::print_info(format!("Tip: {}", tip_for_day(SystemClock.today())));
    Ok(())
}
