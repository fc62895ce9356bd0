//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the otcapi binary.

use std::collections::BTreeMap;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};

use crate::models::CATALOG;
use crate::pagination::ListOptions;

/// Open Telekom Cloud API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "otcapi", about = "Open Telekom Cloud API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List records of a resource, following every page.
    List(ListArgs),

    /// Get a single record by ID.
    Get {
        /// Resource kind, e.g. dcs.instance.
        #[arg(value_parser = resource_parser())]
        resource: String,

        /// The record identifier.
        id: String,

        /// Path parameter as KEY=VALUE.
        #[arg(long = "param", short = 'p', value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Delete records by ID.
    Delete {
        /// Resource kind, e.g. dms.queue.
        #[arg(value_parser = resource_parser())]
        resource: String,

        /// Identifiers of the records to delete.
        #[arg(required = true)]
        ids: Vec<String>,

        /// Path parameter as KEY=VALUE.
        #[arg(long = "param", short = 'p', value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Show the supported resources.
    Resources,
}

/// Arguments of `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource kind, e.g. dcs.instance.
    #[arg(value_parser = resource_parser())]
    pub resource: String,

    /// Filter as KEY=VALUE, using the resource's filter names.
    #[arg(long = "filter", short = 'f', value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    /// Path parameter as KEY=VALUE, e.g. instance_id=...
    #[arg(long = "param", short = 'p', value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Number of records per page.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Marker to start from (marker-paged resources).
    #[arg(long)]
    pub marker: Option<String>,

    /// Offset to start from (offset-paged resources).
    #[arg(long)]
    pub start: Option<u64>,

    /// Fetch only the first page.
    #[arg(long)]
    pub no_paginate: bool,

    /// Send filters the resource does not declare unchanged.
    #[arg(long)]
    pub allow_unknown_filters: bool,
}

impl ListArgs {
    /// The list options these arguments stand for.
    pub fn options(&self) -> ListOptions {
        let mut options = ListOptions::new();
        for (name, value) in &self.filters {
            options = options.filter(name.clone(), value);
        }
        options.path_params = to_map(&self.params);
        options.limit = self.limit;
        options.marker = self.marker.clone();
        options.start = self.start;
        options.paginated = !self.no_paginate;
        options.allow_unknown_filters = self.allow_unknown_filters;
        options
    }
}

/// Collect `KEY=VALUE` pairs; later keys win.
pub fn to_map(pairs: &[(String, String)]) -> BTreeMap<String, String> {
    pairs.iter().cloned().collect()
}

fn resource_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(CATALOG.iter().map(|def| def.kind))
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
