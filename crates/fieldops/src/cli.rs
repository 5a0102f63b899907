//! The `fieldops` command line.
//!
//! ```text
//! fieldops list work-orders --search boiler --facet status=pending,scheduled --sort priority_rank:desc
//! fieldops facets materials
//! fieldops quote-totals 12 --output json
//! fieldops prefs set sidebar.collapsed true
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Args, Parser, Subcommand};
use console::style;
use fieldops_seeker::{facet_counts, ActiveFilters, FacetArg, ListState, SortSpec};
use serde::Serialize;

use crate::config::AppConfig;
use crate::entities::{
    Client, ClientLocation, Entity, EntityKind, EntityRef, Material, Project, Quote, Technician,
    WorkOrder,
};
use crate::lists;
use crate::output::{
    page_footer, render_facets, render_table, render_totals, serialize_structured,
    FacetSummary, ListPage, OutputMode,
};
use crate::prefs::{parse_value, Preferences};
use crate::quote::{QuoteItem, QuoteTotals};
use crate::store::{JsonFileStore, RecordStore};

/// Field-services dashboard lists, facets and quote totals.
#[derive(Debug, Parser)]
#[command(name = "fieldops", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Store snapshot file (overrides the config file and FIELDOPS_DATA)
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Config file [default: ./fieldops.yaml when present]
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List one page of records
    List(ListArgs),

    /// Show facet options with record counts
    Facets(FacetsArgs),

    /// Compute totals for a stored quote
    QuoteTotals(QuoteTotalsArgs),

    /// Read or change preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which list: clients, locations, technicians, materials, work-orders, quotes, projects
    pub entity: EntityKind,

    /// Case-insensitive text matched against the list's search fields
    #[arg(short, long)]
    pub search: Option<String>,

    /// Facet selection; repeat for more facets (OR within a facet, AND across)
    #[arg(short, long = "facet", value_name = "KEY=V1,V2")]
    pub facets: Vec<FacetArg>,

    /// Sort field with optional direction
    #[arg(long, value_name = "FIELD[:asc|desc]")]
    pub sort: Option<SortSpec>,

    /// Page to show, clamped to the available pages
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Items per page (common choices: 10, 20, 50, 100)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Store --page-size as this list's preferred page size
    #[arg(long, requires = "page_size")]
    pub remember: bool,

    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputMode,
}

#[derive(Debug, Args)]
pub struct FacetsArgs {
    /// Which list to count facets for
    pub entity: EntityKind,

    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputMode,
}

#[derive(Debug, Args)]
pub struct QuoteTotalsArgs {
    /// Quote id
    pub id: i64,

    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputMode,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print a preference as JSON
    Get { key: String },
    /// Set a preference; VALUE is parsed as JSON, falling back to a string
    Set { key: String, value: String },
    /// Remove a preference
    Unset { key: String },
    /// Print all preferences
    List,
}

/// Calls a generic function with the entity type of a list.
macro_rules! for_entity {
    ($kind:expr, $f:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            EntityKind::Clients => $f::<Client>($($arg),*),
            EntityKind::Locations => $f::<ClientLocation>($($arg),*),
            EntityKind::Technicians => $f::<Technician>($($arg),*),
            EntityKind::Materials => $f::<Material>($($arg),*),
            EntityKind::WorkOrders => $f::<WorkOrder>($($arg),*),
            EntityKind::Quotes => $f::<Quote>($($arg),*),
            EntityKind::Projects => $f::<Project>($($arg),*),
        }
    };
}

/// Runs a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config =
        AppConfig::load(cli.global.config.as_deref()).context("failed to load configuration")?;
    if let Some(data) = cli.global.data {
        config.data = Some(data);
    }

    match cli.command {
        Commands::List(args) => {
            let store = open_store(&config)?;
            let mut prefs = Preferences::load(config.prefs_path())?;
            for_entity!(args.entity, list_page(&store, &config, &mut prefs, &args))
        }
        Commands::Facets(args) => {
            let store = open_store(&config)?;
            for_entity!(args.entity, facet_page(&store, &config, args.output))
        }
        Commands::QuoteTotals(args) => {
            let store = open_store(&config)?;
            quote_totals(&store, &args)
        }
        Commands::Prefs(command) => {
            let mut prefs = Preferences::load(config.prefs_path())?;
            prefs_command(&mut prefs, command)
        }
    }
}

fn open_store(config: &AppConfig) -> anyhow::Result<JsonFileStore> {
    let path = config.data_path();
    JsonFileStore::open(&path).with_context(|| format!("failed to open store {}", path.display()))
}

fn print_structured<T: Serialize + ?Sized>(data: &T, mode: OutputMode) -> anyhow::Result<()> {
    let text = serialize_structured(data, mode)?;
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn list_page<T: Entity>(
    store: &JsonFileStore,
    config: &AppConfig,
    prefs: &mut Preferences,
    args: &ListArgs,
) -> anyhow::Result<()> {
    let kind = T::KIND;
    let list_config = config.list_config(kind);

    let mut filters = ActiveFilters::new();
    for arg in &args.facets {
        filters.merge_arg(arg.clone());
    }
    list_config.check_filters(&filters)?;
    if let Some(sort) = &args.sort {
        list_config.check_sort(sort)?;
    }
    if args.page_size == Some(0) {
        bail!("--page-size must be at least 1");
    }

    let mut state = ListState::new(&list_config);
    if let Some(size) = args.page_size.or_else(|| prefs.page_size(kind)) {
        state.set_page_size(size);
    }
    if let Some(search) = &args.search {
        state.set_search(search.as_str());
    }
    state.set_filters(filters);
    if let Some(sort) = &args.sort {
        state.set_sort(sort.clone());
    }

    if let Some(page) = args.page {
        state.go_to_page(page);
    }

    let records: Vec<T> = store.load()?;
    let view = state.view(&records);
    tracing::debug!(
        list = kind.name(),
        total = view.total_items,
        filters = %state.filters().summary(),
        "listed records"
    );

    if args.remember {
        if let Some(size) = args.page_size {
            prefs.set_page_size(kind, size)?;
            prefs.save()?;
        }
    }

    let info = state.page_info();
    match args.output {
        OutputMode::Text => {
            println!(
                "{}",
                render_table(&view.page_items, lists::columns(kind), console::colors_enabled())
            );
            println!();
            println!("{}", page_footer(&info));
            let active = state.filters().summary();
            if !state.search_text().trim().is_empty() || !active.is_empty() {
                let mut parts = Vec::new();
                if !state.search_text().trim().is_empty() {
                    parts.push(format!("search \"{}\"", state.search_text()));
                }
                if !active.is_empty() {
                    parts.push(active);
                }
                println!("Filtered by {}", parts.join("; "));
            }
            Ok(())
        }
        OutputMode::Csv => print_structured(view.page_items.as_slice(), OutputMode::Csv),
        mode => print_structured(
            &ListPage {
                entity: kind.name(),
                search: state.search_text(),
                filters: state.filters(),
                sort: state.sort(),
                page: info,
                items: view.page_items,
            },
            mode,
        ),
    }
}

fn facet_page<T: Entity>(
    store: &JsonFileStore,
    config: &AppConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let records: Vec<T> = store.load()?;
    let summaries: Vec<FacetSummary> = config
        .list_config(T::KIND)
        .facets
        .iter()
        .map(|facet| FacetSummary::new(facet, facet_counts(&records, facet)))
        .collect();

    if output.is_structured() {
        return print_structured(&summaries, output);
    }
    if summaries.is_empty() {
        println!("{} has no facets", T::KIND.name());
    } else {
        println!("{}", render_facets(&summaries));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct QuoteSummary<'a> {
    id: i64,
    quote_number: u32,
    title: &'a str,
    client: &'a EntityRef,
    items: &'a [QuoteItem],
    totals: QuoteTotals,
}

fn quote_totals(store: &JsonFileStore, args: &QuoteTotalsArgs) -> anyhow::Result<()> {
    let quote: Quote = store
        .find(args.id)
        .with_context(|| format!("failed to load quote {}", args.id))?;
    let totals = quote.totals();

    for item in quote.items.iter().filter(|item| !item.is_consistent()) {
        tracing::warn!(
            quote = quote.id,
            line = %item.description,
            "line subtotal does not match quantity x unit price"
        );
    }
    for warning in &totals.warnings {
        tracing::warn!(quote = quote.id, "{warning}");
        if !args.output.is_structured() {
            eprintln!("{} {warning}", style("warning:").yellow().bold());
        }
    }

    match args.output {
        OutputMode::Text => {
            println!(
                "Quote #{} {} ({})",
                quote.quote_number, quote.title, quote.client.name
            );
            println!();
            println!("{}", render_totals(&totals));
            Ok(())
        }
        OutputMode::Csv => print_structured(&totals, OutputMode::Csv),
        mode => print_structured(
            &QuoteSummary {
                id: quote.id,
                quote_number: quote.quote_number,
                title: &quote.title,
                client: &quote.client,
                items: &quote.items,
                totals,
            },
            mode,
        ),
    }
}

fn prefs_command(prefs: &mut Preferences, command: PrefsCommand) -> anyhow::Result<()> {
    match command {
        PrefsCommand::Get { key } => {
            let Some(value) = prefs.get_raw(&key) else {
                bail!("preference '{key}' is not set");
            };
            println!("{}", serde_json::to_string(value)?);
        }
        PrefsCommand::Set { key, value } => {
            prefs.set(key.as_str(), parse_value(&value))?;
            prefs.save()?;
            tracing::info!(%key, "preference saved");
        }
        PrefsCommand::Unset { key } => {
            if prefs.remove(&key).is_some() {
                prefs.save()?;
            } else {
                tracing::warn!(%key, "preference was not set");
            }
        }
        PrefsCommand::List => {
            for (key, value) in prefs.iter() {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_arguments() {
        let cli = Cli::try_parse_from([
            "fieldops",
            "list",
            "work_orders",
            "--search",
            "boiler",
            "-f",
            "status=pending,scheduled",
            "-f",
            "priority=urgent",
            "--sort",
            "priority_rank:desc",
            "--page",
            "2",
            "--output",
            "json",
        ])
        .unwrap();

        let Commands::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.entity, EntityKind::WorkOrders);
        assert_eq!(args.facets.len(), 2);
        assert_eq!(args.sort, Some(SortSpec::desc("priority_rank")));
        assert_eq!(args.page, Some(2));
        assert_eq!(args.output, OutputMode::Json);
    }

    #[test]
    fn rejects_unknown_entity_and_bad_facet() {
        assert!(Cli::try_parse_from(["fieldops", "list", "invoices"]).is_err());
        assert!(Cli::try_parse_from(["fieldops", "list", "clients", "-f", "status"]).is_err());
    }

    #[test]
    fn remember_requires_page_size() {
        assert!(Cli::try_parse_from(["fieldops", "list", "clients", "--remember"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fieldops",
            "quote-totals",
            "12",
            "--data",
            "store.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.global.data, Some(PathBuf::from("store.json")));
        assert_eq!(cli.global.verbose, 2);
    }
}
