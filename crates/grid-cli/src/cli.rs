//! CLI argument definitions for gridctl.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use grid_model::{ColumnFilter, ColumnSort};

#[derive(Parser)]
#[command(
    name = "gridctl",
    version,
    about = "Inspect people-grid URL state, rank names and fetch pages",
    long_about = "Drive the people grid controller from the command line.\n\n\
                  Decodes URL query strings into grid state, applies grid actions,\n\
                  ranks names with the fuzzy matcher and fetches pages from the\n\
                  people service."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Grid settings file (TOML). Defaults are used when absent.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a URL query, optionally apply actions, and show the result.
    State(StateArgs),

    /// Rank candidate strings against a fuzzy query.
    Rank(RankArgs),

    /// Fetch the page described by a URL query.
    Fetch(FetchArgs),

    /// List the first page of people without any query state.
    People,
}

#[derive(Args)]
pub struct StateArgs {
    /// URL query string, with or without the leading `?`.
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub actions: ActionArgs,

    /// Known match count, used to clamp page moves.
    #[arg(long = "total", value_name = "N")]
    pub total: Option<u64>,
}

/// Grid actions applied in a fixed order: filters, sorting, page size, page.
#[derive(Args, Default)]
pub struct ActionArgs {
    /// Drop all filters before applying the others.
    #[arg(long = "reset-filters")]
    pub reset_filters: bool,

    /// Set the global filter (empty clears it).
    #[arg(long = "global-filter", value_name = "TEXT")]
    pub global_filter: Option<String>,

    /// Set a column filter; an empty value clears it. Repeatable.
    #[arg(long = "filter", value_name = "ID=VALUE", value_parser = parse_filter)]
    pub filters: Vec<ColumnFilter>,

    /// Replace the sorting with these columns (`id` or `id:desc`). Repeatable.
    #[arg(long = "sort", value_name = "ID[:desc]", value_parser = parse_sort)]
    pub sorting: Vec<ColumnSort>,

    /// Clear the sorting.
    #[arg(long = "no-sort", conflicts_with = "sorting")]
    pub no_sort: bool,

    /// Rows per page.
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<u32>,

    /// Go to a 1-based page.
    #[arg(long = "page", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,
}

#[derive(Args)]
pub struct RankArgs {
    /// Query to rank against.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Candidate strings.
    #[arg(value_name = "CANDIDATE", required = true)]
    pub candidates: Vec<String>,

    /// Also show candidates that do not match.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Args)]
pub struct FetchArgs {
    /// URL query string, with or without the leading `?`.
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Override the people service base URL.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Also filter the fetched rows locally.
    #[arg(long = "client-filter")]
    pub client_filter: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_filter(raw: &str) -> Result<ColumnFilter, String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got `{raw}`"))?;
    if id.is_empty() {
        return Err("column id must not be empty".to_string());
    }
    Ok(ColumnFilter::new(id, value))
}

fn parse_sort(raw: &str) -> Result<ColumnSort, String> {
    let (id, desc) = match raw.rsplit_once(':') {
        Some((id, "desc")) => (id, true),
        Some((id, "asc")) => (id, false),
        Some((_, other)) => return Err(format!("unknown direction `{other}`, use asc or desc")),
        None => (raw, false),
    };
    if id.is_empty() {
        return Err("column id must not be empty".to_string());
    }
    Ok(ColumnSort {
        id: id.to_string(),
        desc,
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_filters() {
        assert_eq!(
            parse_filter("fullName=ann lee").unwrap(),
            ColumnFilter::new("fullName", "ann lee")
        );
        assert_eq!(parse_filter("email=").unwrap(), ColumnFilter::new("email", ""));
        assert!(parse_filter("email").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn parses_sorts() {
        assert_eq!(parse_sort("email").unwrap(), ColumnSort::asc("email"));
        assert_eq!(parse_sort("email:desc").unwrap(), ColumnSort::desc("email"));
        assert_eq!(parse_sort("id:asc").unwrap(), ColumnSort::asc("id"));
        assert!(parse_sort("id:up").is_err());
    }

    #[test]
    fn state_command_collects_actions() {
        let cli = Cli::try_parse_from([
            "gridctl",
            "state",
            "?page=4",
            "--filter",
            "lastName=smith",
            "--sort",
            "email:desc",
            "--page",
            "2",
        ])
        .unwrap();
        let Command::State(args) = cli.command else {
            panic!("expected state command");
        };
        assert_eq!(args.query, "?page=4");
        assert_eq!(args.actions.filters, vec![ColumnFilter::new("lastName", "smith")]);
        assert_eq!(args.actions.sorting, vec![ColumnSort::desc("email")]);
        assert_eq!(args.actions.page, Some(2));
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(Cli::try_parse_from(["gridctl", "state", "--page", "0"]).is_err());
    }
}
