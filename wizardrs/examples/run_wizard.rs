use std::{env, sync::Arc};

use sqlwizard::wizard::DatePreset;
use sqlwizard::{connect, HttpQueryService, StaticToken};

fn usage() {
    eprintln!("Usage: run_wizard <base_url> <connection_id> <table> <column>");
    eprintln!("Example: cargo run --example run_wizard -- http://localhost:8000/api conn-1 Orders Amount");
    eprintln!("Set SQLWIZARD_TOKEN for the bearer credential.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.len() < 4 {
        usage();
        std::process::exit(1);
    }
    let base_url = args.remove(0);
    let connection_id = args.remove(0);
    let table = args.remove(0);
    let column = args.remove(0);
    let token = env::var("SQLWIZARD_TOKEN").unwrap_or_default();

    let service = Arc::new(HttpQueryService::new(
        base_url,
        Arc::new(StaticToken(token)),
    ));
    let mut wizard = connect(service, connection_id).await?;

    println!("catalog: {} tables", wizard.catalog().len());
    for entry in wizard.search_catalog(&table) {
        println!("  {} - {}", entry.name, entry.description.as_deref().unwrap_or(""));
    }

    wizard.select_table(&table);
    wizard.advance().await?;

    wizard.activate_table(&table).await?;
    wizard.toggle_column(&table, &column);
    wizard.advance().await?;

    println!("relationships:");
    for rel in wizard.relationships().all() {
        println!(
            "  [{}] {}.{} -> {}.{} ({:?})",
            if rel.selected { "x" } else { " " },
            rel.endpoints.source_table,
            rel.endpoints.source_column,
            rel.endpoints.target_table,
            rel.endpoints.target_column,
            rel.kind,
        );
    }
    wizard.advance().await?;

    wizard.advance().await?;
    wizard.apply_date_preset(DatePreset::LastMonth);
    wizard.advance().await?;

    match wizard.generated_sql() {
        Some(sql) => println!("{sql}"),
        None => eprintln!("{}", wizard.last_error().unwrap_or("no sql generated")),
    }
    Ok(())
}
