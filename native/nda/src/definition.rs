//! Loader for the textual automaton description.
//!
//! A definition has one section per line, told apart by its first character:
//!
//! ```text
//! Q = {A;B;C}
//! E = {a;b}
//! S = {A[a-B,C];B[-C]}
//! q = A
//! F = {C}
//! ```
//!
//! `Q` lists the states, `E` the alphabet, `S` the transitions, `q` names the
//! initial state and `F` lists the final states. Lines starting with any other
//! character are ignored.

use crate::automaton::{Automaton, AutomatonError};
use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading a definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The definition file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A required section (`Q` or `q`) never appeared.
    #[error("definition has no `{0}` section")]
    MissingSection(char),
    /// A set line is not wrapped in braces.
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: &'static str },
    /// A section was well formed but the automaton rejected its contents.
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// Read and load the definition stored at `path`.
pub fn load_file(path: impl AsRef<Path>) -> Result<Automaton, DefinitionError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loading automaton from {}", path.display());
    parse_definition(&text)
}

/// Build an automaton from the full text of a definition.
pub fn parse_definition(text: &str) -> Result<Automaton, DefinitionError> {
    from_lines(text.lines())
}

/// Build an automaton from definition lines, applying each section as it is
/// read. `Q` has to come before the sections that name states.
pub fn from_lines<'a, I>(lines: I) -> Result<Automaton, DefinitionError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut automaton = Automaton::new();
    let mut has_states = false;
    let mut has_initial = false;

    for (idx, line) in lines.into_iter().enumerate() {
        let number = idx + 1;
        let line = line.trim();
        let Some(section) = line.chars().next() else {
            continue;
        };

        match section {
            'Q' => {
                automaton.add_states(set_entries(line, number)?)?;
                has_states = true;
            }
            'E' => automaton.add_alphabet(set_entries(line, number)?)?,
            'S' => automaton.add_transition(set_entries(line, number)?)?,
            'q' => {
                automaton.set_initial(scalar_value(line))?;
                has_initial = true;
            }
            'F' => automaton.add_finals(set_entries(line, number)?)?,
            _ => trace!("ignoring line {number}: {line}"),
        }
    }

    if !has_states {
        return Err(DefinitionError::MissingSection('Q'));
    }
    if !has_initial {
        return Err(DefinitionError::MissingSection('q'));
    }
    Ok(automaton)
}

/// Split the `{a;b;c}` body of a set line into its entries.
fn set_entries(line: &str, number: usize) -> Result<Vec<&str>, DefinitionError> {
    let malformed = |reason| DefinitionError::MalformedLine {
        line: number,
        reason,
    };

    let open = line.find('{').ok_or_else(|| malformed("expected `{` to open the set"))?;
    let body = line[open + 1..]
        .strip_suffix('}')
        .ok_or_else(|| malformed("expected `}` to close the set"))?;

    Ok(body
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// Extract the value of a `q = A` line.
fn scalar_value(line: &str) -> &str {
    line[1..]
        .trim_start()
        .trim_start_matches(['=', ':'])
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim()
}

impl FromStr for Automaton {
    type Err = DefinitionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_definition(text)
    }
}
