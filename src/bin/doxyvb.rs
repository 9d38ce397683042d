//! Command-line interface for doxyvb
//! Doxygen `INPUT_FILTER` for Visual Basic 6 sources: reads one module and writes C#-like
//! declarations with their doc comments to stdout.
//!
//! Usage:
//!   doxyvb `<path>` [--config `<file>`] [--encoding `<label>`] [--kind bas|cls|frm] [--format `<format>`] [--no-type-map]
//!   doxyvb -                                               - Read the module from stdin
//!   doxyvb --list-formats                                  - List all output formats
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see classification decisions.

use clap::{Arg, ArgAction, ArgMatches, Command};
use doxyvb::vb6::{render, EmitOptions, LoaderError, ModuleKind, OutputFormat, SourceUnit};
use doxyvb_config::{ConfigError, DoxyvbConfig, Loader};
use std::io::{self, Read, Write};

fn main() {
    // stdout is the Doxygen pipe
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let matches = Command::new("doxyvb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Doxygen input filter for Visual Basic 6 modules")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the .bas/.cls/.frm file, or '-' for stdin")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .short('e')
                .help("Source encoding label (default: shift_jis)"),
        )
        .arg(
            Arg::new("kind")
                .long("kind")
                .short('k')
                .help("Module kind: bas, cls or frm (default: from the file extension)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: csharp)"),
        )
        .arg(
            Arg::new("no-type-map")
                .long("no-type-map")
                .help("Keep VB type names instead of mapping them to C# keywords")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let Some(path) = matches.get_one::<String>("path") else {
        eprintln!("A path is required unless listing formats");
        std::process::exit(1);
    };
    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    handle_filter_command(path, matches.get_one::<String>("kind"), &config);
}

/// Defaults, then the `--config` file, then individual flags
fn load_config(matches: &ArgMatches) -> Result<DoxyvbConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }
    if let Some(encoding) = matches.get_one::<String>("encoding") {
        loader = loader.set_override("source.encoding", encoding.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("no-type-map") {
        loader = loader.set_override("filter.map_types", false)?;
    }
    loader.build()
}

/// Handle the filter command
fn handle_filter_command(path: &str, kind: Option<&String>, config: &DoxyvbConfig) {
    let format: OutputFormat = config.output.format.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        eprintln!("\nAvailable formats:");
        for format in OutputFormat::ALL {
            eprintln!("  {} - {}", format.name(), format.description());
        }
        std::process::exit(1);
    });
    let kind: Option<ModuleKind> = kind.map(|k| {
        k.parse().unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        })
    });

    let encoding = config.source.encoding.as_str();
    let loaded = if path == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .map_err(LoaderError::from)
            .and_then(|_| {
                SourceUnit::from_bytes(&bytes, kind.unwrap_or(ModuleKind::Standard), encoding)
            })
    } else {
        SourceUnit::from_path(path, encoding).map(|unit| match kind {
            Some(kind) => unit.with_kind(kind),
            None => unit,
        })
    };
    let unit = loaded.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });

    let options = EmitOptions {
        indent: config.filter.indent.clone(),
        map_types: config.filter.map_types,
        blank_line_between_members: config.filter.blank_line_between_members,
    };
    let output = render(&unit, format, &options).unwrap_or_else(|e| {
        eprintln!("Error rendering {}: {}", path, e);
        std::process::exit(1);
    });

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in OutputFormat::ALL {
        println!("  {}", format.name());
        println!("    {}", format.description());
        println!();
    }
}
