//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Make a target directory tree mirror a source tree and print what changed
#[derive(Debug, Parser)]
#[command(
    name = "treesync",
    version,
    about = "One-way directory synchronization with a JSON change log",
    long_about = "Removes target entries that are absent from the source, then adds missing\n\
        directories and copies new or modified files. Every applied change is printed\n\
        as a JSON array on stdout; logs go to stderr.\n\n\
        Example:\n  \
        treesync tmp/from tmp/to --pretty"
)]
pub struct Cli {
    /// Source directory (authoritative)
    pub source: Option<PathBuf>,

    /// Target directory (made to match the source)
    pub target: Option<PathBuf>,

    /// TOML config file providing defaults for every option
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Additional basename to skip in both trees (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Do not skip Thumbs.db and .DS_Store
    #[arg(long)]
    pub no_default_ignore: bool,

    /// Report the changes without applying them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Write the change log to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (set log level to debug)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "treesync",
            "src",
            "dst",
            "-n",
            "--pretty",
            "-o",
            "changes.json",
            "-v",
            "--ignore",
            "a",
            "--ignore",
            "b",
        ]);

        assert_eq!(cli.source, Some(PathBuf::from("src")));
        assert_eq!(cli.target, Some(PathBuf::from("dst")));
        assert!(cli.dry_run);
        assert!(cli.pretty);
        assert!(cli.verbose);
        assert_eq!(cli.output, Some(PathBuf::from("changes.json")));
        assert_eq!(cli.ignore, vec!["a", "b"]);
    }
}
