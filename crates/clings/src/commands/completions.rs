//! Shell completions command implementation.
//!
//! Generate shell completions for bash, zsh, fish, and powershell.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};

use crate::cli::{Cli, Shell};

impl From<&Shell> for ClapShell {
    fn from(shell: &Shell) -> Self {
        match shell {
            Shell::Bash => ClapShell::Bash,
            Shell::Zsh => ClapShell::Zsh,
            Shell::Fish => ClapShell::Fish,
            Shell::Powershell => ClapShell::PowerShell,
        }
    }
}

/// Generate shell completions for the given shell and write to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn execute(shell: &Shell) -> io::Result<()> {
    let mut stdout = io::stdout();
    write_completions(shell, &mut stdout)?;
    stdout.flush()
}

fn write_completions(shell: &Shell, out: &mut dyn Write) -> io::Result<()> {
    let mut cmd = Cli::command();
    generate(ClapShell::from(shell), &mut cmd, "clings", out);
    Ok(())
}
