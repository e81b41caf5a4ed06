use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "todo-tui")]
#[command(about = "Terminal to-do list with due-date reminders")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured backend (default)
    Run,
    /// Run with a local in-memory backend and sample tasks
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::parse_from(["todo-tui"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn verbose_is_counted_after_subcommand() {
        let cli = Cli::parse_from(["todo-tui", "dev", "-vv"]);
        assert!(matches!(cli.command, Some(Commands::Dev)));
        assert_eq!(cli.verbose, 2);
    }
}
