//! salestat - Analyze marketplace order data from CSV exports

use clap::Parser;
use salestat::{
    aggregation,
    cli::{Cli, Command},
    data_loader::DataLoader,
    error::Result,
    output::get_formatter,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("salestat=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Progress bars only make sense for human-readable terminal output
    let show_progress = !cli.json && is_terminal::is_terminal(std::io::stdout());
    let loader = DataLoader::new(&cli.data)?.with_progress(show_progress);
    let records = loader.load_order_items()?;

    let selection = cli.selection(&records)?;
    let views = selection.split(&records);
    info!(
        "Filtered {} records into {} customer rows and {} seller rows",
        records.len(),
        views.customers.len(),
        views.sellers.len()
    );

    let formatter = get_formatter(cli.json);

    match cli.command {
        Some(Command::Summary) => {
            info!("Running headline summary report");
            let metrics = aggregation::summarize(&views);
            println!("{}", formatter.format_headline(&metrics));
        }

        Some(Command::States) => {
            info!("Running per-state report");
            let states = aggregation::by_state(&views);
            println!("{}", formatter.format_states(&states));
        }

        Some(Command::Monthly) => {
            info!("Running per-month report");
            let monthly = aggregation::by_month(&views);
            println!("{}", formatter.format_monthly(&monthly));
        }

        None => {
            // Default to the full dashboard
            info!("No command specified, rendering the full dashboard");
            let metrics = aggregation::summarize(&views);
            let states = aggregation::by_state(&views);
            let monthly = aggregation::by_month(&views);
            println!("{}", formatter.format_dashboard(&metrics, &states, &monthly));
        }
    }

    Ok(())
}
