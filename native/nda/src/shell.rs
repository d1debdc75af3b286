//! Interactive prompt loop around [`Automaton::recognize`].

use crate::automaton::Automaton;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const RULE: &str = "-----------------------------------------------------------------------------------------------------";

/// How to write a definition file, shown before asking for one.
pub const DEFINITION_HELP: &str = "\
The definition of a non-deterministic automaton T is:
T = {Q, E, S, q, F} where
  Q: is the set of states separated by semi-colon (e.g. A;B;C;D),
  E: is the set with the alphabet separated by semi-colon (e.g. y;i;o),
  S: is the set with the transition function separated by semi-colon in the format (e.g. A[y-B,A]),
     an empty symbol (e.g. A[-B]) is an epsilon transition,
  q: is the initial state,
  F: is the set of final states separated by semi-colon.";

/// Command line options of the `nda` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "nda", version, about, long_about = None)]
#[command(after_help = "Set RUST_LOG (e.g. RUST_LOG=debug) to see what the recognizer is doing.")]
pub struct Options {
    /// Automaton definition file; prompted for when omitted
    pub path: Option<PathBuf>,

    /// Check STRING and exit instead of prompting (repeatable)
    #[arg(short = 't', long = "test", value_name = "STRING")]
    pub tests: Vec<String>,
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Line-oriented console session.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Start a session reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink, e.g. to inspect a transcript.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print the welcome banner and the definition format.
    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(
            self.output,
            "                   Welcome to the Non-Deterministic Automata Simulator"
        )?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "{DEFINITION_HELP}\n")?;
        writeln!(self.output, "{RULE}")
    }

    /// Ask for the definition file. Returns `None` at end of input or on a
    /// blank answer.
    pub fn prompt_path(&mut self) -> io::Result<Option<PathBuf>> {
        let answer = self.prompt("Path of the automaton file: ")?;
        Ok(answer
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from))
    }

    /// Echo the loaded definition back.
    pub fn show(&mut self, automaton: &Automaton) -> io::Result<()> {
        writeln!(self.output, "{automaton}")
    }

    /// Check every string and print one verdict per line.
    pub fn run_batch(&mut self, automaton: &Automaton, tests: &[String]) -> io::Result<()> {
        for test in tests {
            let verdict = if automaton.recognize(test) {
                "accepted"
            } else {
                "rejected"
            };
            writeln!(self.output, "{test:?}: {verdict}")?;
        }
        self.output.flush()
    }

    /// Prompt for strings until the user stops or input ends.
    pub fn run(&mut self, automaton: &Automaton) -> io::Result<()> {
        loop {
            let Some(answer) = self.prompt("\nDo you want to test the empty string? (Y/N): ")?
            else {
                break;
            };

            let test = if is_yes(&answer) {
                String::new()
            } else {
                match self.prompt("\nString to test: ")? {
                    Some(test) => test.trim().to_string(),
                    None => break,
                }
            };

            if automaton.recognize(&test) {
                writeln!(self.output, "The automaton recognized the string")?;
            } else {
                writeln!(self.output, "The automaton did NOT recognize the string")?;
            }

            match self.prompt("\nDo you want to test another string? (Y/N): ")? {
                Some(answer) if is_yes(&answer) => continue,
                _ => break,
            }
        }

        writeln!(self.output, "-- Bye!")?;
        self.output.flush()
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
