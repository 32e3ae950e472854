use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use csvask_core::Config;
use csvask_engine::{execute, render};
use csvask_loader::TableLoader;
use csvask_sql::Translator;

const USAGE: &str = "Usage: csvask <csv_file> <natural language query>";

/// csvask - Ask plain-English questions of a CSV file
#[derive(Parser, Debug)]
#[command(name = "csvask")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file with a header row
    csv_file: Option<PathBuf>,

    /// Question, e.g. "average age" (unquoted words are joined)
    question: Vec<String>,

    /// Path to a TOML config file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the generated SQL to stderr before running it
    #[arg(long)]
    show_sql: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Write the answer, usage line or error line to `out`, returning the exit status
fn run(cli: &Cli, out: &mut impl Write) -> std::io::Result<u8> {
    let question = cli.question.join(" ");
    let Some(csv_file) = cli.csv_file.as_deref().filter(|_| !question.trim().is_empty()) else {
        writeln!(out, "{}", USAGE)?;
        return Ok(1);
    };

    match answer(cli, csv_file, &question) {
        Ok(rendered) => {
            writeln!(out, "{}", rendered)?;
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "question failed");
            writeln!(out, "Error: {:#}", e)?;
            Ok(1)
        }
    }
}

/// Load, translate, execute, render
///
/// The table lives only inside this call, so it is closed on every path.
fn answer(cli: &Cli, csv_file: &Path, question: &str) -> Result<String> {
    let config = Config::load(cli.config.as_deref())?;

    if cli.verbose {
        eprintln!("{} {}", "Loading".cyan(), csv_file.display());
    }

    let table = TableLoader::new(config.loader.clone())
        .load_path(csv_file)
        .with_context(|| format!("Failed to load {}", csv_file.display()))?;

    if cli.verbose {
        eprintln!(
            "{} {} rows into '{}'",
            "Loaded".green(),
            table.row_count(),
            table.table_name()
        );
        for column in &table.schema().columns {
            eprintln!("  {} {}", column.name, column.column_type.to_string().yellow());
        }
    }

    let statement = Translator::from_config(&config).translate(question, table.schema());

    if cli.show_sql || cli.verbose {
        eprintln!("{} {}", "Generated SQL:".cyan(), statement);
    }

    let result = execute(&table, &statement)?;

    if cli.verbose {
        eprintln!("{} {} rows", "Returned".green(), result.row_count());
    }

    Ok(render(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn invoke(args: &[&str]) -> (u8, String) {
        let cli = Cli::try_parse_from(std::iter::once("csvask").chain(args.iter().copied())).unwrap();
        let mut out = Vec::new();
        let code = run(&cli, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn missing_arguments_print_usage() {
        assert_eq!(invoke(&[]), (1, format!("{}\n", USAGE)));
        assert_eq!(invoke(&["people.csv"]), (1, format!("{}\n", USAGE)));
    }

    #[test]
    fn answers_scalar_question() {
        let file = csv_file("Name,Age,City\nAlice,30,NYC\nBob,25,LA\n");
        let path = file.path().to_str().unwrap();

        assert_eq!(invoke(&[path, "average age"]), (0, "27.5\n".to_string()));
    }

    #[test]
    fn unquoted_question_words_are_joined() {
        let file = csv_file("Name,Age,City\nAlice,30,NYC\nBob,25,LA\n");
        let path = file.path().to_str().unwrap();

        assert_eq!(invoke(&[path, "total", "age"]), (0, "55\n".to_string()));
    }

    #[test]
    fn answers_with_grid() {
        let file = csv_file("Name,Age,City\nAlice,30,NYC\nBob,25,LA\n");
        let path = file.path().to_str().unwrap();

        let (code, output) = invoke(&[path, "show all"]);
        assert_eq!(code, 0);
        assert!(output.contains("| Name  | Age | City |"));
        assert_eq!(output.lines().filter(|l| l.starts_with("| ")).count(), 3);
    }

    #[test]
    fn failures_print_error_line() {
        let file = csv_file("");
        let path = file.path().to_str().unwrap();

        let (code, output) = invoke(&[path, "show all"]);
        assert_eq!(code, 1);
        assert!(output.starts_with("Error: "));
        assert!(output.contains("CSV file has no headers"));
    }

    #[test]
    fn degenerate_question_is_an_error() {
        let file = csv_file("Name,Age,City\nAlice,30,NYC\n");
        let path = file.path().to_str().unwrap();

        let (code, output) = invoke(&[path, "sum of city"]);
        assert_eq!(code, 1);
        assert_eq!(output, "Error: could not build a query from the question\n");
    }

    #[test]
    fn config_file_renames_table() {
        let data = csv_file("city;pop\nParis;2100000\nLyon;520000\n");
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "[loader]\ntable_name = \"towns\"\ndelimiter = \";\"").unwrap();

        let (code, output) = invoke(&[
            "--config",
            config.path().to_str().unwrap(),
            data.path().to_str().unwrap(),
            "max pop",
        ]);
        assert_eq!((code, output.as_str()), (0, "2100000\n"));
    }

    #[test]
    fn bad_config_is_reported() {
        let data = csv_file("a\n1\n");
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "[loader]\nsample_rows = 0").unwrap();

        let (code, output) = invoke(&[
            "-c",
            config.path().to_str().unwrap(),
            data.path().to_str().unwrap(),
            "show all",
        ]);
        assert_eq!(code, 1);
        assert!(output.starts_with("Error: Invalid config"));
    }
}
