//! bfsdl-drv - Command line front-end for the BFSDL parser.
//!
//! A thin shell over `bfsdl-par`:
//!
//! ```text
//! bfsdl --file <path> [--testing]
//! ```
//!
//! Exit codes: 0 on success, 1 on a parse error, 2 on a usage error. In
//! `--testing` mode diagnostics are printed without call-site decoration
//! (stable output for tests) and the resulting tree is dumped on success as
//! `PROP <name>=<value>` and `FIELD <name> <type>` lines.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;

use bfsdl_par::{parse_stream, Object, ObjectRef, Property, Tree};
use bfsdl_util::Handler;

/// Read granularity of the stream driver.
const CHUNK_SIZE: usize = 4096;

/// Properties rendered numerically by the tree dump.
const NUMERIC_PROPERTIES: &[&str] = &[
    "Version",
    "BitBase",
    "DefaultByteOrder",
    "DefaultBitOrder",
    "DefaultStringTerm",
];

/// Errors from command-line parsing.
#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    /// An option that needs a value was last on the line.
    #[error("missing value for '{0}'")]
    MissingValue(&'static str),
    /// No `--file` was given.
    #[error("missing required option '--file <path>'")]
    MissingFile,
    /// An unrecognized argument was given.
    #[error("unknown argument '{0}'")]
    Unknown(String),
}

/// Validated invocation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Specification file to validate.
    pub file: PathBuf,
    /// Deterministic output for tests.
    pub testing: bool,
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Command {
    /// Parse the given file.
    Run(Config),
    /// Print usage and exit successfully.
    Help,
}

/// Parses command line arguments (without the program name).
pub fn parse_args(args: impl Iterator<Item = String>) -> Result<Command, ArgError> {
    let mut file = None;
    let mut testing = false;
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--file" => match args.next() {
                Some(value) => file = Some(PathBuf::from(value)),
                None => return Err(ArgError::MissingValue("--file")),
            },
            "--testing" => testing = true,
            other => return Err(ArgError::Unknown(other.to_string())),
        }
    }

    let file = file.ok_or(ArgError::MissingFile)?;
    Ok(Command::Run(Config { file, testing }))
}

/// Usage text printed by `--help` and on usage errors.
pub fn usage() -> &'static str {
    "Usage: bfsdl --file <path> [--testing]\n\
     \n\
     Validates a BFSDL specification file.\n\
     \n\
     Options:\n\
     \x20   --file <path>   Specification file to validate\n\
     \x20   --testing       Stable diagnostic output and a tree dump\n\
     \x20   -h, --help      Show this help"
}

/// Runs a validated configuration. Returns the process exit code.
pub fn run(config: &Config) -> Result<i32> {
    let handler = Handler::new();
    if config.testing {
        handler.set_runtime_sink(|_module, _line, text| eprintln!("{text}"));
    } else {
        handler.set_runtime_sink(|module, line, text| eprintln!("[{module}:{line}] {text}"));
        handler.set_misuse_sink(|module, line, text| eprintln!("[{module}:{line}] misuse: {text}"));
        handler
            .set_internal_sink(|module, line, text| eprintln!("[{module}:{line}] internal: {text}"));
    }

    let mut tree = Tree::new();
    let filename = config.file.display().to_string();
    tree.add(Object::Property(Property::with_string("Filename", &filename)))
        .ok();

    let mut file = File::open(&config.file)
        .with_context(|| format!("cannot open '{}'", config.file.display()))?;

    match parse_stream(&mut tree, &mut file, CHUNK_SIZE, &handler) {
        Ok(()) => {
            if config.testing {
                dump_tree(&tree);
            }
            Ok(0)
        }
        Err(_) => Ok(1),
    }
}

/// Dumps the tree children to stdout, one line per object.
fn dump_tree(tree: &Tree) {
    tree.iterate(|object| match object {
        ObjectRef::Property(property) => println!("PROP {}={}", property.name(), render(property)),
        ObjectRef::Field(field) => println!("FIELD {} {}", field.name(), field.type_str()),
    });
}

fn render(property: &Property) -> String {
    if NUMERIC_PROPERTIES.contains(&property.name()) {
        if let Some(value) = property.as_u64() {
            return value.to_string();
        }
    } else if let Some(text) = property.as_string_utf8() {
        return text.to_string();
    }
    // Anything else prints as hex bytes.
    property
        .data()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
