use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use nda::definition;
use nda::shell::{Options, Shell};

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = Options::parse();

    let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock());

    let path = match options.path {
        Some(path) => path,
        None => {
            shell.banner()?;
            match shell.prompt_path()? {
                Some(path) => path,
                None => bail!("no automaton definition file given"),
            }
        }
    };

    let automaton = definition::load_file(&path)
        .with_context(|| format!("could not load an automaton from {}", path.display()))?;
    info!(
        "loaded {} states and {} symbols from {}",
        automaton.num_states(),
        automaton.alphabet().len(),
        path.display()
    );

    if !options.tests.is_empty() {
        shell.run_batch(&automaton, &options.tests)?;
        return Ok(ExitCode::SUCCESS);
    }

    shell.show(&automaton)?;
    shell.run(&automaton)?;
    Ok(ExitCode::SUCCESS)
}
