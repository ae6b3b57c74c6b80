//! Command-line front end.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use review_queue::{parse, Question};

use crate::error::ServiceError;
use crate::service::{Answered, ReviewService};
use crate::store::StateStore;

#[derive(Parser)]
#[command(name = "drill", about = "Spaced repetition drills from markdown decks", version)]
pub struct Cli {
    /// Account whose queue to use (default: DRILL_ACCOUNT or "default")
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// Directory holding queue state (default: DRILL_STATE_DIR)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a queue from a markdown deck
    Enroll {
        /// Deck file with Q:/A: blocks
        deck: PathBuf,
        /// Replace an existing queue for the account
        #[arg(long)]
        replace: bool,
    },

    /// Show the question due next
    Next,

    /// Answer the current question by typing it
    Answer {
        /// The answer text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Grade the current question yourself
    Mark {
        verdict: Verdict,
    },

    /// Show counters and the upcoming order
    Status {
        /// How many upcoming questions to list
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Delete the account's queue
    Withdraw,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum Verdict {
    Correct,
    Wrong,
}

/// Run one command for `account`, writing plain text to `out`.
pub fn execute<S, W>(
    command: Command,
    service: &ReviewService<S>,
    account: &str,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: StateStore<Question>,
    W: Write,
{
    match command {
        Command::Enroll { deck, replace } => {
            let content = std::fs::read_to_string(&deck)
                .with_context(|| format!("reading deck {}", deck.display()))?;
            let questions =
                parse(&content).with_context(|| format!("parsing deck {}", deck.display()))?;
            let total = service.enroll(account, questions, replace)?;
            writeln!(out, "Enrolled {account} with {total} questions.")?;
        }
        Command::Next => match service.current(account) {
            Ok(question) => writeln!(out, "Q: {}", question.prompt)?,
            Err(err) if err.is_exhausted() => writeln!(out, "No questions to review.")?,
            Err(err) => return Err(err.into()),
        },
        Command::Answer { text } => {
            let typed = text.join(" ");
            match service.answer_typed(account, &typed) {
                Ok((grade, answered)) => {
                    if grade.correct {
                        writeln!(out, "Correct ({:.0}% match).", grade.similarity * 100.0)?;
                    } else {
                        writeln!(out, "Incorrect. Expected: {}", answered.question.answer)?;
                    }
                    write_answered(out, &answered)?;
                }
                Err(err) => return exhausted_or(err, out),
            }
        }
        Command::Mark { verdict } => {
            match service.answer(account, verdict == Verdict::Correct) {
                Ok(answered) => {
                    writeln!(out, "A: {}", answered.question.answer)?;
                    write_answered(out, &answered)?;
                }
                Err(err) => return exhausted_or(err, out),
            }
        }
        Command::Status { limit } => {
            let status = service.status(account, limit)?;
            writeln!(
                out,
                "{} questions, {} correct, {} incorrect",
                status.total, status.stats.correct, status.stats.incorrect
            )?;
            for (position, upcoming) in status.upcoming.iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. [w{}] {}",
                    position + 1,
                    upcoming.weight,
                    first_line(&upcoming.prompt)
                )?;
            }
        }
        Command::Withdraw => {
            if service.withdraw(account)? {
                writeln!(out, "Removed queue for {account}.")?;
            } else {
                writeln!(out, "No queue stored for {account}.")?;
            }
        }
    }
    Ok(())
}

fn write_answered<W: Write>(out: &mut W, answered: &Answered) -> std::io::Result<()> {
    let review = &answered.review;
    if review.due_in == 0 {
        writeln!(out, "Up again next (weight {}).", review.weight)?;
    } else {
        let noun = if review.due_in == 1 { "review" } else { "reviews" };
        writeln!(
            out,
            "Back in {} {noun} (weight {}).",
            review.due_in, review.weight
        )?;
    }
    match &answered.next {
        Some(next) => writeln!(out, "Next: {}", first_line(&next.prompt)),
        None => writeln!(out, "No questions to review."),
    }
}

fn exhausted_or<W: Write>(err: ServiceError, out: &mut W) -> anyhow::Result<()> {
    if err.is_exhausted() {
        writeln!(out, "No questions to review.")?;
        Ok(())
    } else {
        Err(err.into())
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
