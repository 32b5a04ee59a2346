use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `bdoc` binary.
#[derive(Debug, Parser)]
#[command(name = "bdoc", version, about = "bdoc - registry block highlighting for docs sites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file layered above `.bdoc/config.toml`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["bdoc", "--format", "raw", "--verbose", "get", "sidebar-07"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Get(ref args) if args.block == "sidebar-07"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["bdoc", "list", "--type", "registry:ui", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert!(
            matches!(cli.command, Commands::List(ref args) if args.item_type.as_deref() == Some("registry:ui"))
        );
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["bdoc", "--format", "table", "list"]).is_err());
    }

    #[test]
    fn prerender_requires_out() {
        assert!(Cli::try_parse_from(["bdoc", "prerender"]).is_err());
        let cli = Cli::try_parse_from(["bdoc", "prerender", "--out", "build/blocks"])
            .expect("cli should parse");
        assert!(
            matches!(cli.command, Commands::Prerender(ref args) if args.out == Path::new("build/blocks"))
        );
    }

    #[test]
    fn config_flag_is_copied_to_global_flags() {
        let cli = Cli::try_parse_from(["bdoc", "schema", "--config", "bdoc.toml"])
            .expect("cli should parse");
        assert_eq!(cli.global_flags().config.as_deref(), Some(Path::new("bdoc.toml")));
    }
}
