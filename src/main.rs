use anyhow::Context;
use wb_scrape::cli::{Cli, prompt_request};
use wb_scrape::{HttpClient, RunOptions, RunOutcome, config, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = <Cli as clap::Parser>::parse();
    logging::init_tracing(logging::default_filter(cli.verbose))?;

    let settings = config::load(cli.config.as_deref()).context("failed to load settings")?;
    let request = match cli.command {
        Some(command) => command.into_request(),
        None => prompt_request().context("no run mode selected")?,
    };

    let client = HttpClient::new(&settings.http).context("failed to build HTTP client")?;
    let options = RunOptions {
        enrich_sales: !cli.no_sales,
        ..RunOptions::default()
    };

    let outcome = run(&client, &settings, &request, &options)
        .await
        .context("an error occurred during parsing")?;

    match outcome {
        RunOutcome::CategoryNotFound { input } => println!("Category not found: {input}"),
        RunOutcome::Exported { path, records, .. } => {
            println!("Saved {records} products to {}", path.display());
        }
    }

    Ok(())
}
