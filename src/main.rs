use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use configuration::cli::ServerOverrides;
use configuration::{init_tracing, load_settings, Settings};
use database::schema::schema_history;
use database::DbRepository;

/// The main entry point for the GridVault content service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may come from a .env file; its absence is not an error.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = load_settings()?;
    // Held for the process lifetime so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&settings.logging)?;

    match cli.command {
        Commands::Serve(overrides) => {
            overrides.apply(&mut settings.server);
            web_server::run_server(&settings).await?;
        }
        Commands::Schema { action: SchemaAction::Ensure } => handle_schema_ensure(&settings).await?,
        Commands::Schema { action: SchemaAction::Plan } => print_schema_plan(),
        Commands::Catalog => print_catalog(),
    }
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Content API and schema tooling for the GridVault website.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON API.
    Serve(ServerOverrides),
    /// Inspect or reconcile the database schema.
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// Print the static content served when the database is unavailable.
    Catalog,
}

#[derive(Subcommand)]
enum SchemaAction {
    /// Create missing tables and add missing columns.
    Ensure,
    /// List the columns added after each table's first release.
    Plan,
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h)));
    table
}

// ==============================================================================
// Schema Commands
// ==============================================================================

/// Reconciles every declared table and prints what changed.
async fn handle_schema_ensure(settings: &Settings) -> anyhow::Result<()> {
    let repo = DbRepository::new(database::connect(&settings.database).await?);
    let results = repo.ensure_schema().await;

    let mut table = new_table(&["Table", "Status", "Added columns"]);
    let mut failures = 0;
    for (name, result) in &results {
        match result {
            Ok(reconciliation) if reconciliation.added_columns.is_empty() => {
                table.add_row(vec![name.to_string(), "up to date".into(), String::new()]);
            }
            Ok(reconciliation) => {
                table.add_row(vec![
                    name.to_string(),
                    "evolved".into(),
                    reconciliation.added_columns.join(", "),
                ]);
            }
            Err(e) => {
                failures += 1;
                table.add_row(vec![name.to_string(), "failed".into(), e.to_string()]);
            }
        }
    }
    println!("{table}");

    if failures > 0 {
        anyhow::bail!("{failures} of {} tables could not be reconciled", results.len());
    }
    Ok(())
}

fn print_schema_plan() {
    let mut table = new_table(&["Version", "Table", "Column", "Type", "After"]);
    for (name, addition) in schema_history() {
        let column = &addition.column;
        let ty = match column.default {
            Some(default) => format!("{} DEFAULT {default}", column.ty),
            None => column.ty.to_string(),
        };
        table.add_row(vec![
            addition.version.to_string(),
            name.to_string(),
            column.name.to_string(),
            ty,
            addition.after.to_string(),
        ]);
    }
    println!("{table}");
}

// ==============================================================================
// Catalog Command
// ==============================================================================

fn print_catalog() {
    use content::catalog;

    let mut table = new_table(&["Collection", "Title", "Slug / Link"]);
    for product in catalog::products() {
        table.add_row(vec!["products".to_string(), product.name, product.slug]);
    }
    for solution in catalog::solutions() {
        table.add_row(vec!["solutions".to_string(), solution.title, solution.slug]);
    }
    for case_study in catalog::case_studies() {
        table.add_row(vec!["case studies".to_string(), case_study.title, case_study.slug]);
    }
    for equipment in catalog::lab_equipment() {
        table.add_row(vec!["lab equipment".to_string(), equipment.name, String::new()]);
    }
    for article in catalog::news() {
        table.add_row(vec!["news".to_string(), article.title, article.slug]);
    }
    for slide in catalog::hero_slides() {
        table.add_row(vec!["hero slides".to_string(), slide.title, slide.position.to_string()]);
    }
    for item in catalog::navigation() {
        table.add_row(vec!["navigation".to_string(), item.label, item.url]);
    }
    println!("{table}");
}
