use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::error::{SweepError, SweepResult};

/// first prompt: the target host or domain. a blank answer aborts the
/// run before anything is written to disk
pub fn read_target(input: &mut impl BufRead) -> SweepResult<String> {
    let answer = prompt(input, "target host or domain: ")?;
    if answer.is_empty() {
        return Err(SweepError::EmptyTarget);
    }
    Ok(answer)
}

/// second prompt: explicit authorization. single attempt, anything but
/// a case-insensitive "yes" declines
pub fn confirm(input: &mut impl BufRead) -> SweepResult<()> {
    let answer = prompt(
        input,
        "do you have written authorization to test this target? (yes/no): ",
    )?;
    if answer.eq_ignore_ascii_case("yes") {
        Ok(())
    } else {
        Err(SweepError::ConsentDeclined)
    }
}

fn prompt(input: &mut impl BufRead, question: &str) -> SweepResult<String> {
    print!("{}", question.bold());
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
