use clap::{Parser as ClapParser, Subcommand};
use cql_lang::cli::{self, CheckOptions, CheckResult, CliError, OutputFormat, SqlOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "cql")]
#[command(about = "cql - Parse, canonicalize and translate Contextual Query Language queries")]
#[command(version)]
struct Cli {
    /// Log parsing details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CQL query and print it
    Check {
        /// The CQL query (reads from stdin if not provided)
        query: Option<String>,

        /// Reject multi-word terms without a relation
        #[arg(short, long)]
        strict: bool,

        /// Output format: cql, json, xcql or debug
        #[arg(short = 't', long, default_value = "cql")]
        format: String,

        /// Indentation step for xcql and json output
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },

    /// Translate a CQL query into a PostgreSQL WHERE clause
    Sql {
        /// The CQL query (reads from stdin if not provided)
        query: Option<String>,

        /// Reject multi-word terms without a relation
        #[arg(long)]
        strict: bool,

        /// Column searched by terms without an index
        #[arg(short = 's', long)]
        server_choice: Option<String>,

        /// Text field as NAME or NAME=COLUMN (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Numeric field as NAME or NAME=COLUMN (repeatable)
        #[arg(short, long = "number")]
        numbers: Vec<String>,

        /// Number of the first $n placeholder
        #[arg(long, default_value_t = 1)]
        first_arg: usize,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'cql docs' to list categories)
        category: String,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CQL_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            query,
            strict,
            format,
            indent,
        } => run_check(query, strict, &format, indent),
        Commands::Sql {
            query,
            strict,
            server_choice,
            fields,
            numbers,
            first_arg,
        } => read_query(query).and_then(|query| {
            run_sql(SqlOptions {
                query,
                strict,
                server_choice,
                fields,
                numbers,
                first_argument: first_arg,
            })
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Use the argument, or stdin when it is piped.
fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            tracing::debug!(bytes = buffer.len(), "read query from stdin");
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    query: Option<String>,
    strict: bool,
    format: &str,
    indent: usize,
) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        strict,
        format: format.parse::<OutputFormat>()?,
        indent,
    };

    match cli::execute_check(&options)? {
        CheckResult::Text(text) => {
            if text.ends_with('\n') {
                print!("{}", text);
            } else {
                println!("{}", text);
            }
        }
        CheckResult::Json(value) => {
            let json = if indent > 0 {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_sql(options: SqlOptions) -> Result<(), CliError> {
    let translated = cli::execute_sql(&options)?;
    println!("{}", translated.where_clause());
    for (i, argument) in translated.arguments().iter().enumerate() {
        println!("${} = {}", options.first_argument + i, argument);
    }
    Ok(())
}
