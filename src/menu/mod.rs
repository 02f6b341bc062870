pub mod schema;

use std::io::{BufRead, Write};

use crate::{
    common::error::{AppError, LedgerError},
    io::writer,
    worker::processor::{Processor, Response},
};
use schema::{MenuOption, OPTIONS};

/// The numbered menu loop. Generic over its streams so it can be driven from
/// a terminal or from a test buffer.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until Exit is chosen or input ends. Only ledger-file failures
    /// escape; everything else is printed and the menu is shown again.
    pub fn run(&mut self, processor: &mut Processor) -> Result<(), AppError> {
        loop {
            self.show()?;
            let Some(line) = self.read_line("Please choose a menu item: ")? else {
                break;
            };
            let Some(option) = choose(&line) else {
                tracing::warn!(choice = %line.trim(), "invalid menu choice");
                writeln!(self.output, "\nPlease choose a valid menu item!\n")?;
                continue;
            };

            let Some(answers) = self.collect(option)? else {
                break;
            };
            let request = match answers.and_then(|a| option.command.build(a)) {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(option = option.label, error = %e, "input rejected");
                    self.report(&e)?;
                    continue;
                }
            };

            match processor.process(request) {
                Ok(response) => self.print(response)?,
                Err(AppError::Ledger(e)) => self.report(&e)?,
                Err(fatal) => return Err(fatal),
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn show(&mut self) -> Result<(), AppError> {
        for (i, option) in OPTIONS.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option.label)?;
        }
        Ok(())
    }

    /// Asks every prompt of `option`. The outer `None` means input ended.
    fn collect(
        &mut self,
        option: &MenuOption,
    ) -> Result<Option<Result<Vec<Option<schema::Value>>, LedgerError>>, AppError> {
        let mut answers = Vec::with_capacity(option.prompts.len());
        let mut first_error = None;
        for prompt in option.prompts {
            let Some(raw) = self.read_line(&format!("Enter {}: ", prompt.label))? else {
                return Ok(None);
            };
            match prompt.parse(&raw) {
                Ok(v) => answers.push(v),
                Err(e) => {
                    first_error.get_or_insert(e);
                    answers.push(None);
                }
            }
        }
        Ok(Some(match first_error {
            Some(e) => Err(e),
            None => Ok(answers),
        }))
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prints a rejection. Logging is left to whoever rejected it.
    fn report(&mut self, err: &LedgerError) -> Result<(), AppError> {
        writeln!(self.output, "Error: {err}. Please try again!\n")?;
        Ok(())
    }

    fn print(&mut self, response: Response) -> Result<(), AppError> {
        match response {
            Response::Balance(balance) => writeln!(self.output, "Balance: {balance}\n")?,
            Response::Added(entry) => writeln!(
                self.output,
                "Added entry #{} ({} {})\n",
                entry.id, entry.category, entry.amount
            )?,
            Response::Edited(report) => {
                if report.changed() {
                    let fields: Vec<String> =
                        report.applied.iter().map(ToString::to_string).collect();
                    writeln!(self.output, "Updated: {}", fields.join(", "))?;
                } else {
                    writeln!(self.output, "No changes made")?;
                }
                for (field, err) in &report.rejected {
                    writeln!(self.output, "  {field} not changed: {err}")?;
                }
                writeln!(self.output)?;
            }
            Response::Found(result) => {
                if result.is_empty() {
                    writeln!(self.output, "No matching entries\n")?;
                } else {
                    writer::write_entries(&mut self.output, result.entries())?;
                    writeln!(self.output)?;
                }
            }
        }
        Ok(())
    }
}

/// Maps a 1-based menu choice to its option.
fn choose(line: &str) -> Option<&'static MenuOption> {
    let n: usize = line.trim().parse().ok()?;
    OPTIONS.get(n.checked_sub(1)?)
}
