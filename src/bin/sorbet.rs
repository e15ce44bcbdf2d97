//! sorbet CLI
//!
//! Query, edit, validate, and reformat Sorbet configuration files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sorbet::{CollectingSink, Document, Formatter};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sorbet")]
#[command(version)]
#[command(about = "Sorbet configuration format tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value of a key
    Get {
        /// Key to look up
        key: String,

        /// Configuration file to read (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,
    },

    /// Set a key to a value and rewrite the file
    Set {
        /// Key to set
        key: String,

        /// Value to store
        value: String,

        /// Configuration file to update (created if missing)
        file: PathBuf,
    },

    /// List keys in a configuration file
    #[command(name = "t")]
    List {
        /// Configuration file to read (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Show the first line of each value as well
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a configuration file, reporting malformed lines
    Check {
        /// Configuration file to read (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,
    },

    /// Reformat a configuration file canonically
    Fmt {
        /// Configuration file to read (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Rewrite the input file in place instead of printing
        #[arg(short, long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get { key, input } => get_value(&key, input),
        Commands::Set { key, value, file } => set_value(&key, &value, file),
        Commands::List { input, verbose } => list_keys(input, verbose),
        Commands::Check { input } => check(input),
        Commands::Fmt { input, write } => reformat(input, write),
    }
}

/// Read Sorbet text from a file, or stdin when no path is given
fn read_input(input: Option<&PathBuf>) -> Result<String> {
    if let Some(path) = input {
        fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}

/// Parse input, surfacing any diagnostics on stderr
fn parse_input(input: Option<&PathBuf>) -> Result<Document> {
    let text = read_input(input)?;
    Ok(sorbet::parse(&text))
}

fn get_value(key: &str, input: Option<PathBuf>) -> Result<()> {
    let document = parse_input(input.as_ref())?;

    match document.get(key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => bail!("Key not found: {}", key),
    }
}

fn set_value(key: &str, value: &str, file: PathBuf) -> Result<()> {
    let mut document = if file.exists() {
        let text = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read: {}", file.display()))?;
        sorbet::parse(&text)
    } else {
        Document::new()
    };

    document.insert(key, value);
    Formatter::new().write_to_file(&document, &file)
}

fn list_keys(input: Option<PathBuf>, verbose: bool) -> Result<()> {
    let document = parse_input(input.as_ref())?;

    for (key, value) in document.iter() {
        if verbose {
            let first_line = value.split('\n').next().unwrap_or("");
            println!("{} => {}", key, first_line);
        } else {
            println!("{}", key);
        }
    }

    Ok(())
}

fn check(input: Option<PathBuf>) -> Result<()> {
    let text = read_input(input.as_ref())?;

    let mut parser = sorbet::Parser::with_sink(CollectingSink::new());
    let document = parser.parse(&text);
    let diagnostics = parser.into_sink().into_diagnostics();

    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic);
    }

    if diagnostics.is_empty() {
        println!("OK: {} entries", document.len());
        Ok(())
    } else {
        bail!("{} malformed line(s)", diagnostics.len());
    }
}

fn reformat(input: Option<PathBuf>, write: bool) -> Result<()> {
    let document = parse_input(input.as_ref())?;
    let formatter = Formatter::new();

    if write {
        let path = match input {
            Some(path) => path,
            None => bail!("--write requires an input file"),
        };
        formatter.write_to_file(&document, &path)
    } else {
        println!("{}", formatter.format(&document));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_creates_and_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.sorbet");

        set_value("host", "example.com", path.clone()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "host => example.com"
        );

        set_value("host", "other.example.com", path.clone()).unwrap();
        set_value("port", "8080", path.clone()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "host => other.example.com\nport => 8080"
        );
    }

    #[test]
    fn test_get_missing_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.sorbet");
        fs::write(&path, "host => example.com").unwrap();

        assert!(get_value("host", Some(path.clone())).is_ok());
        assert!(get_value("missing", Some(path)).is_err());
    }

    #[test]
    fn test_check_fails_on_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.sorbet");

        fs::write(&path, "key => value").unwrap();
        assert!(check(Some(path.clone())).is_ok());

        fs::write(&path, "a => b => c\nkey => value").unwrap();
        assert!(check(Some(path)).is_err());
    }

    #[test]
    fn test_fmt_write_canonicalizes_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.sorbet");
        fs::write(&path, "  key  =>  value  \n\nother => x\n>  more  ").unwrap();

        reformat(Some(path.clone()), true).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "key => value\nother => x\n> more"
        );
    }
}
