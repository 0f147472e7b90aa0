//! Meta commands that never touch the network.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::Cli;

/// Print completion definitions for `shell` to stdout.
pub(crate) fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
