//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputMode;

#[derive(Debug, Parser)]
#[command(
    name = "termdoc",
    version,
    about = "Palette configuration and contrast checks for the termdoc theme"
)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputMode::Auto, global = true)]
    pub output: OutputMode,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a site's palette configuration and show what templates receive
    Resolve(ResolveArgs),
    /// Check bundled palettes against WCAG AA contrast thresholds
    Audit(AuditArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Site configuration file
    #[arg(long, default_value = "mkdocs.yml")]
    pub config: PathBuf,

    /// Bundled palette directory [default: <theme.custom_dir>/css/palettes]
    #[arg(long)]
    pub palettes_dir: Option<PathBuf>,

    /// Exit with an error if the configuration produced warnings
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Directory holding the palette stylesheets
    #[arg(long)]
    pub palettes_dir: PathBuf,

    /// Stylesheet loaded before each palette, in order (repeatable)
    #[arg(long = "base-css", value_name = "FILE")]
    pub base_css: Vec<PathBuf>,

    /// Palette to audit (repeatable) [default: all bundled palettes]
    #[arg(long = "palette", value_name = "NAME")]
    pub palettes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = Cli::try_parse_from(["termdoc", "resolve"]).unwrap();
        assert_eq!(cli.output, OutputMode::Auto);
        assert_eq!(cli.verbose, 0);
        let Command::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.config, PathBuf::from("mkdocs.yml"));
        assert!(args.palettes_dir.is_none());
        assert!(!args.strict);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "termdoc",
            "audit",
            "--palettes-dir",
            "css/palettes",
            "--base-css",
            "terminal.css",
            "--base-css",
            "theme.css",
            "--palette",
            "dark",
            "--output",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputMode::Json);
        assert_eq!(cli.verbose, 2);
        let Command::Audit(args) = cli.command else {
            panic!("expected audit");
        };
        assert_eq!(
            args.base_css,
            vec![PathBuf::from("terminal.css"), PathBuf::from("theme.css")]
        );
        assert_eq!(args.palettes, vec!["dark".to_string()]);
    }

    #[test]
    fn test_rejects_unknown_output() {
        assert!(Cli::try_parse_from(["termdoc", "--output", "xml", "resolve"]).is_err());
    }
}
