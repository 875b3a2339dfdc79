use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use permatrix::ApplyMode;
use permatrix_cli::commands;
use permatrix_config::{CatalogConfig, SearchConfig};
use permatrix_core::Catalog;
use permatrix_models::PermissionTemplate;
use permatrix_observability::init_tracing;
use permatrix_search::index::clamp_threshold;
use permatrix_search::{CatalogEntry, QueryDebouncer, SearchIndex};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "permatrix-cli")]
#[command(about = "Permatrix CLI - Inspect permission catalogs, sets, and templates", long_about = None)]
struct Cli {
    /// Catalog JSON file (overrides PERMATRIX_CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every resource and its allowed actions
    Catalog,
    /// Check permission codes against the catalog and print them canonically
    Validate {
        /// Codes in `resource:action` form
        codes: Vec<String>,
    },
    /// Print permission codes grouped by resource
    Group {
        /// Codes in `resource:action` form
        codes: Vec<String>,
    },
    /// Fuzzy search the catalog, or a templates file
    Search {
        query: String,

        /// Search this templates file instead of the catalog
        #[arg(short = 't', long)]
        templates: Option<PathBuf>,

        /// Match threshold in [0, 1] (default: PERMATRIX_SEARCH_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Search the catalog as you type: one query per line on stdin
    Watch {
        /// Match threshold in [0, 1] (default: PERMATRIX_SEARCH_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Apply a template to a set of codes
    ApplyTemplate {
        /// Templates JSON file
        #[arg(short = 't', long)]
        templates: PathBuf,

        /// Template id or name
        #[arg(long)]
        id: String,

        /// Add the template's permissions instead of replacing
        #[arg(long)]
        merge: bool,

        /// Current codes in `resource:action` form
        codes: Vec<String>,
    },
    /// List templates that reference permissions outside the catalog
    AuditTemplates {
        /// Templates JSON file
        #[arg(short = 't', long)]
        templates: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut catalog_config = CatalogConfig::from_env();
    if let Some(path) = cli.catalog {
        catalog_config.path = Some(path);
    }
    let search_config = SearchConfig::from_env();
    let catalog = catalog_config.load_catalog();
    let policy = catalog_config.boundary_policy;

    match cli.command {
        Commands::Catalog => match commands::catalog(&catalog) {
            Ok(out) => println!("{}", out),
            Err(e) => fail("reading catalog", e),
        },
        Commands::Validate { codes } => match commands::validate(&catalog, &codes, policy) {
            Ok(out) => {
                println!("✅ Permissions are valid ({} policy)", policy);
                println!("{}", out);
            }
            Err(e) => fail("validating permissions", e),
        },
        Commands::Group { codes } => match commands::group(&catalog, &codes, policy) {
            Ok(out) => println!("{}", out),
            Err(e) => fail("grouping permissions", e),
        },
        Commands::Search {
            query,
            templates,
            threshold,
        } => {
            let threshold = threshold.map_or(search_config.threshold, clamp_threshold);
            let lines = match templates {
                Some(path) => match commands::load_templates(&path) {
                    Ok(templates) => commands::search_templates(&templates, &query, threshold),
                    Err(e) => fail("loading templates", e),
                },
                None => commands::search_catalog(&catalog, &query, threshold),
            };
            print_lines(&lines, "No matches");
        }
        Commands::Watch { threshold } => {
            let config = match threshold {
                Some(t) => search_config.with_threshold(t),
                None => search_config,
            };
            if let Err(e) = handle_watch(&catalog, config).await {
                fail("reading queries", e);
            }
        }
        Commands::ApplyTemplate {
            templates,
            id,
            merge,
            codes,
        } => {
            let mode = if merge { ApplyMode::Merge } else { ApplyMode::Replace };
            let result = commands::load_templates(&templates).and_then(|templates| {
                commands::apply_template(&catalog, &templates, &id, mode, &codes, policy)
            });
            match result {
                Ok(out) => println!("{}", out),
                Err(e) => fail("applying template", e),
            }
        }
        Commands::AuditTemplates { templates } => {
            let templates: Vec<PermissionTemplate> = match commands::load_templates(&templates) {
                Ok(templates) => templates,
                Err(e) => fail("loading templates", e),
            };
            let lines = commands::audit_templates(&catalog, &templates);
            if lines.is_empty() {
                println!("✅ All {} templates match the catalog", templates.len());
            } else {
                println!("⚠️  {} templates reference unknown permissions:", lines.len());
                print_lines(&lines, "");
            }
        }
    }
}

async fn handle_watch(catalog: &Catalog, config: SearchConfig) -> anyhow::Result<()> {
    let index = SearchIndex::new(CatalogEntry::from_catalog(catalog), CatalogEntry::default_fields());
    let threshold = config.threshold;
    let debouncer = QueryDebouncer::spawn(config.debounce, move |query| {
        println!("\n🔎 {}", query);
        print_lines(&commands::render_catalog_hits(&index, &query, threshold), "   No matches");
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        debouncer.on_input(line);
    }

    // Let the last query settle before exiting.
    tokio::time::sleep(debouncer.window() * 2).await;
    Ok(())
}

fn print_lines(lines: &[String], empty: &str) {
    if lines.is_empty() {
        if !empty.is_empty() {
            println!("{}", empty);
        }
        return;
    }
    for line in lines {
        println!("   {}", line);
    }
}

fn fail(action: &str, e: anyhow::Error) -> ! {
    eprintln!("\n❌ Error {}: {}", action, e);
    std::process::exit(1);
}
