// Sat Jan 17 2026 - Alex

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use cxx_layout::structure::LayoutValidator;
use cxx_layout::{DeclId, Session};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cxx-layout")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Itanium C++ record layout analyzer", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Front-end arguments, e.g. "--target=i686-pc-linux-gnu"
    #[arg(long, global = true, default_value = "")]
    args: String,

    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the analyzed record list
    List { dump: PathBuf },
    /// Print the layout of one record
    Layout {
        dump: PathBuf,
        #[arg(allow_hyphen_values = true)]
        id: DeclId,
    },
    /// Print every layout, one per line
    Dump { dump: PathBuf },
    /// Check every layout for ordering and validity problems
    Check { dump: PathBuf },
}

impl Command {
    fn dump_path(&self) -> &PathBuf {
        match self {
            Self::List { dump } | Self::Layout { dump, .. } | Self::Dump { dump } | Self::Check { dump } => dump,
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    setup_logging(&args.log_level);
    if args.no_color {
        colored::control::set_override(false);
    }

    let path = args.command.dump_path();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut session = Session::new();
    session.configure(&args.args);
    let count = session.analyze(&source);
    eprintln!("{} Analyzed {} records from {}", "[*]".blue(), count, path.display());

    match args.command {
        Command::List { .. } => println!("{}", session.list_records()),
        Command::Layout { id, .. } => println!("{}", session.layout_of(id)),
        Command::Dump { .. } => {
            for (id, _) in session.store().iter() {
                println!("{}", session.layout_of(id));
            }
        }
        Command::Check { .. } => check(&session)?,
    }
    Ok(())
}

fn check(session: &Session) -> anyhow::Result<()> {
    let validator = LayoutValidator::new();
    let mut violations = 0;

    for (id, layout) in session.store().iter() {
        let found = validator.violations(layout);
        if !found.is_empty() {
            for err in &found {
                println!("{} #{} {}", "[!]".red(), id, err);
            }
            violations += found.len();
        } else if !layout.is_valid() {
            println!("{} #{} {} contains invalid declarations", "[?]".yellow(), id, layout.type_name());
        } else {
            println!("{} #{} {}", "[+]".green(), id, layout.type_name());
        }
    }

    if violations > 0 {
        anyhow::bail!("{} layout violations", violations);
    }
    Ok(())
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
