use finlit_core::{Question, QuizSession};

use crate::cli::commands::require_args;
use crate::cli::context::ShellContext;
use crate::cli::error::CommandError;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandResult};

const USAGE: &str = "quiz start | quiz answer <1-4> | quiz next | quiz status";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "quiz",
        "Test your financial literacy",
        USAGE,
        cmd_quiz,
    )]
}

fn cmd_quiz(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((sub, rest)) = args.split_first() else {
        return show_status(context);
    };
    match sub.to_lowercase().as_str() {
        "start" | "restart" => start(context),
        "answer" => answer(context, rest),
        "next" => next(context),
        "status" => show_status(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown quiz action `{other}`; {USAGE}"
        ))),
    }
}

fn session(context: &mut ShellContext) -> Result<&mut QuizSession, CommandError> {
    context.quiz.as_mut().ok_or_else(|| {
        CommandError::InvalidArguments("No quiz in progress. Run `quiz start` first.".into())
    })
}

fn start(context: &mut ShellContext) -> CommandResult {
    let quiz = context.quiz.get_or_insert_with(QuizSession::default);
    quiz.restart();
    print_question(quiz);
    Ok(())
}

fn answer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "quiz answer <1-4>")?;
    let choice: usize = args[0].trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not an option number", args[0]))
    })?;
    let quiz = session(context)?;
    // Options are numbered from 1 on screen; 0 falls through as out of range.
    let feedback = quiz.answer(choice.checked_sub(1).unwrap_or(usize::MAX))?;
    let correct_text = quiz
        .current()
        .map(|question| question.options[feedback.correct_option])
        .unwrap_or_default();
    if feedback.correct {
        io::print_success("Correct!");
    } else {
        io::print_warning(format!("Not quite. The answer is: {correct_text}"));
    }
    io::print_info(format!("Progress: {:.0}%", quiz.progress_percent()));
    Ok(())
}

fn next(context: &mut ShellContext) -> CommandResult {
    let quiz = session(context)?;
    quiz.advance()?;
    if quiz.is_finished() {
        print_result(quiz);
    } else {
        print_question(quiz);
    }
    Ok(())
}

fn show_status(context: &mut ShellContext) -> CommandResult {
    let quiz = session(context)?;
    if quiz.is_finished() {
        print_result(quiz);
    } else {
        print_question(quiz);
        io::print_info(format!(
            "Score so far: {} of {}, progress {:.0}%",
            quiz.score(),
            quiz.total(),
            quiz.progress_percent()
        ));
    }
    Ok(())
}

fn print_question(quiz: &QuizSession) {
    let Some(question) = quiz.current() else {
        return;
    };
    output::section(format!(
        "Question {} of {}",
        quiz.position() + 1,
        quiz.total()
    ));
    io::print_info(question.prompt);
    for line in option_lines(question) {
        io::print_info(line);
    }
}

fn option_lines(question: &Question) -> Vec<String> {
    question
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| format!("  {}. {option}", index + 1))
        .collect()
}

fn print_result(quiz: &QuizSession) {
    output::section("Quiz complete");
    io::print_success(format!("You scored {} out of {}", quiz.score(), quiz.total()));
    let stars = usize::from(quiz.stars());
    io::print_info(format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars.min(5))));
    if quiz.is_perfect() {
        io::print_success("Perfect score! You're a financial pro.");
    }
    io::print_info("Run `quiz start` to try again.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use finlit_core::QUESTION_BANK;

    #[test]
    fn options_are_numbered_from_one() {
        let lines = option_lines(&QUESTION_BANK[0]);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  1. "));
        assert!(lines[3].starts_with("  4. "));
    }
}
