//! `sqlsight` command-line front end
//!
//! Every subcommand prints the JSON tool response on stdout and exits with a
//! failure status when the response carries an `error`.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use sqlsight_services::AdvisorService;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;
mod settings;

use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "sqlsight")]
#[command(version, about = "Static SQL query advisor", long_about = None)]
struct Cli {
    /// Settings file (defaults to <config dir>/sqlsight/settings.json)
    #[arg(long, global = true, env = "SQLSIGHT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to stderr as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report performance issues, complexity and structure
    Analyze {
        #[command(flatten)]
        query: QueryArgs,

        /// File holding EXPLAIN output for the query
        #[arg(long, value_name = "FILE")]
        explain: Option<PathBuf>,
    },
    /// Rewrite the query and summarize the improvements
    Optimize {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Suggest indexes for the query
    Indexes {
        /// SQL text; read from stdin when omitted or "-"
        sql: Option<String>,

        /// Schema description (accepted but not used yet)
        #[arg(long)]
        schema: Option<String>,
    },
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// SQL text; read from stdin when omitted or "-"
    sql: Option<String>,

    /// postgres, mysql, sqlite, tsql, oracle, generic or auto
    #[arg(short, long)]
    dialect: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    logging::init(&settings.logging_config(cli.log_json))?;

    let service = AdvisorService::with_config(settings.advisor.clone());
    let dialect_or_default =
        |dialect: Option<String>| dialect.unwrap_or_else(|| settings.default_dialect.clone());

    let (json, success) = match cli.command {
        Commands::Analyze { query, explain } => {
            let sql = read_sql(query.sql)?;
            let plan = explain
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read EXPLAIN output from {:?}", path))
                })
                .transpose()?;
            let response = service.analyze(&sql, &dialect_or_default(query.dialect), plan.as_deref());
            (response.to_json()?, response.is_success())
        }
        Commands::Optimize { query } => {
            let sql = read_sql(query.sql)?;
            let response = service.optimize(&sql, &dialect_or_default(query.dialect));
            (response.to_json()?, response.is_success())
        }
        Commands::Indexes { sql, schema } => {
            let sql = read_sql(sql)?;
            let report = service.suggest_indexes(&sql, schema.as_deref());
            (report.to_json()?, true)
        }
    };

    println!("{}", json);
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_sql(arg: Option<String>) -> Result<String> {
    let sql = match arg {
        Some(sql) if sql != "-" => sql,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read SQL from stdin")?;
            buf
        }
    };
    if sql.trim().is_empty() {
        bail!("no SQL given");
    }
    Ok(sql)
}
