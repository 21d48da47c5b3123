use clap::Parser;
use fhir_view::core::feedback::{LOADING_MESSAGE, NO_DATA_MESSAGE};
use fhir_view::core::summary::{render_csv, render_json, render_table, summarize};
use fhir_view::utils::logger;
use fhir_view::{fetch_resources, CliConfig, Command, FetchOutcome, OutputFormat};
use serde_json::Value;

fn render(body: &Value, config: &fhir_view::ClientConfig) -> anyhow::Result<String> {
    let rows = summarize(body, &config.identifier_matcher());
    let output = match config.output_format() {
        OutputFormat::Table => render_table(&rows),
        OutputFormat::Csv => render_csv(&rows)?,
        OutputFormat::Json => render_json(&rows)?,
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    let client = config.client();
    tracing::info!("{} ({})", LOADING_MESSAGE, client.base_url());

    match &cli.command {
        Command::Search {
            resource_type,
            params,
        } => {
            let params: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();

            match fetch_resources(&client, resource_type, &params).await {
                FetchOutcome::Found(body) => println!("{}", render(&body, &config)?),
                FetchOutcome::Empty(_) => println!("{}", NO_DATA_MESSAGE),
                FetchOutcome::Failed(e) => {
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(2);
                }
            }
        }
        Command::Read { resource_type, id } => match client.read(resource_type, id).await {
            Ok(body) => println!("{}", render(&body, &config)?),
            Err(e) => {
                tracing::error!("❌ Read of {}/{} failed: {}", resource_type, id, e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(if e.is_not_found() { 3 } else { 2 });
            }
        },
    }

    Ok(())
}
