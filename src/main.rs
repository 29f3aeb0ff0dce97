//! `ini`: get, set and delete values in INI files from the command line.
//!
//! ```text
//! ini [-f <FILE>] [--unsorted] get                          list sections
//! ini [-f <FILE>] [--unsorted] get <SECTION>                list properties of a section
//! ini [-f <FILE>] [--unsorted] get <SECTION> <PROPERTY>     print a value
//! ini [-f <FILE>] [--unsorted] set <SECTION> <PROPERTY> <VALUE>
//! ini [-f <FILE>] [--unsorted] del <SECTION> [<PROPERTY>]
//! ```
//!
//! Without `--file` (or with `-`) the document is read from stdin and any modified document is
//! written to stdout. A named file that does not exist yet is treated as empty and is created by
//! the first `set`. Log verbosity follows `RUST_LOG` and goes to stderr.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inistore::Ini;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ini", about = "Get, set and delete values in INI files", version)]
struct Cli {
    /// Target INI file ('-' for stdin/stdout).
    #[arg(short, long, env = "INI_FILE", default_value = "-")]
    file: PathBuf,

    /// Keep sections and properties in their original order instead of sorting them when
    /// writing the document back.
    #[arg(long)]
    unsorted: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// List sections, list the properties of a section, or print a single value.
    Get {
        section: Option<String>,
        property: Option<String>,
    },
    /// Set a property, creating its section if needed.
    Set {
        section: String,
        property: String,
        value: String,
    },
    /// Delete a whole section, or a single property of it.
    #[command(alias = "delete")]
    Del {
        section: String,
        property: Option<String>,
    },
}

/// Where the document comes from and where a modified document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Stdio,
    File(PathBuf),
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdio
        } else {
            Self::File(path)
        }
    }
}

impl Target {
    fn load(&self) -> anyhow::Result<Ini> {
        match self {
            Self::Stdio => Ini::from_reader(io::stdin().lock()).context("failed to read stdin"),
            Self::File(path) => load_file(path),
        }
    }

    fn store(&self, ini: &Ini, prettify: bool) -> anyhow::Result<()> {
        // Render completely before touching the destination so a failure cannot truncate it.
        let mut buffer = Vec::with_capacity(4096);
        ini.write(&mut buffer, prettify)
            .context("failed to serialize INI document")?;

        match self {
            Self::Stdio => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(&buffer)?;
                stdout.flush()?;
            }
            Self::File(path) => {
                fs::write(path, &buffer)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), bytes = buffer.len(), "updated INI file");
            }
        }

        Ok(())
    }
}

fn load_file(path: &Path) -> anyhow::Result<Ini> {
    match fs::File::open(path) {
        Ok(file) => {
            Ini::from_reader(file).with_context(|| format!("failed to load {}", path.display()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "file does not exist yet, starting empty");
            Ok(Ini::new())
        }
        Err(e) => Err(e).with_context(|| format!("failed to open {}", path.display())),
    }
}

/// Apply `command` to `ini`, printing any query results to `out`.
///
/// Returns whether the document was modified and needs to be written back.
fn execute<W>(command: &Command, ini: &mut Ini, out: &mut W) -> anyhow::Result<bool>
where
    W: Write,
{
    match command {
        Command::Get {
            section: None,
            property: _,
        } => {
            for section in ini.sections() {
                writeln!(out, "{section}")?;
            }
            Ok(false)
        }
        Command::Get {
            section: Some(section),
            property: None,
        } => {
            for property in ini.properties(section)? {
                writeln!(out, "{property}")?;
            }
            Ok(false)
        }
        Command::Get {
            section: Some(section),
            property: Some(property),
        } => {
            writeln!(out, "{}", ini.get_str(section, property)?)?;
            Ok(false)
        }
        Command::Set {
            section,
            property,
            value,
        } => {
            ini.set_str(section, property, value.as_str());
            Ok(true)
        }
        Command::Del {
            section,
            property: None,
        } => {
            if !ini.delete_section(section) {
                warn!(section, "section not found, nothing deleted");
            }
            Ok(true)
        }
        Command::Del {
            section,
            property: Some(property),
        } => {
            if !ini.delete_property(section, property) {
                warn!(section, property, "property not found, nothing deleted");
            }
            Ok(true)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let target = Target::from(cli.file);
    let mut ini = target.load()?;

    let modified = execute(&cli.command, &mut ini, &mut io::stdout().lock())?;
    if modified {
        target.store(&ini, !cli.unsorted)?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Stdout carries command output, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    run(Cli::parse())
}
