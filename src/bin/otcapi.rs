//! Open Telekom Cloud API CLI binary.
//!
//! A command-line interface for listing, fetching and deleting cloud resources.

use clap::Parser;
use otcapi::cli::{to_map, Cli, Command, ListArgs};
use otcapi::output::{catalog_table, record_table, PrettyPrint};
use otcapi::{models, OtcClient, OtcError, Record, ResourceDef};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = models::validate_catalog() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    if let Command::Resources = cli.command {
        println!("{}", catalog_table(models::CATALOG));
        return ExitCode::SUCCESS;
    }

    let client = match OtcClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set OTC_AUTH_TOKEN and OTC_PROJECT_ID environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &OtcClient, cli: Cli) -> otcapi::Result<ExitCode> {
    match cli.command {
        Command::List(args) => handle_list(client, &args, cli.json).await,
        Command::Get {
            resource,
            id,
            params,
        } => {
            let def = models::lookup(&resource)?;
            let record = def.get(client, &id, &to_map(&params)).await?;
            output_single(&record, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Delete {
            resource,
            ids,
            params,
        } => {
            let def = models::lookup(&resource)?;
            if !def.supports_delete() {
                return Err(OtcError::Unsupported {
                    resource: def.kind,
                    operation: "delete",
                });
            }
            let report = def.delete_each(client, &ids, &to_map(&params)).await;
            for id in &report.deleted {
                println!("Deleted {} {}", def.kind, id);
            }
            if report.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!(
                    "Error: {} of {} deletions failed",
                    report.failure_count(),
                    ids.len()
                );
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Resources => {
            println!("{}", catalog_table(models::CATALOG));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn handle_list(client: &OtcClient, args: &ListArgs, json: bool) -> otcapi::Result<ExitCode> {
    let def: &'static ResourceDef = models::lookup(&args.resource)?;
    let mut pager = def.pager(client, args.options())?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    while let Some(item) = pager.next().await {
        match item {
            Ok(record) => records.push(record),
            Err(err @ OtcError::Coercion { .. }) => {
                tracing::warn!(kind = def.kind, error = %err, "skipped record");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    output_list(def, &records, json)?;
    if skipped > 0 {
        eprintln!("{skipped} record(s) could not be read");
    }
    Ok(ExitCode::SUCCESS)
}

fn output_single(record: &Record, json: bool) -> otcapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", record.pretty_print());
    }
    Ok(())
}

fn output_list(def: &ResourceDef, records: &[Record], json: bool) -> otcapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        println!("{}", record_table(def, records));
        println!("\n{} {} record(s)", records.len(), def.kind);
    }
    Ok(())
}
