//! rds-data-mapper - Reads the first row of a table through the RDS Data API.

mod cli;

use cli::{Cli, OutputFormat};
use rds_data_mapper::config::{Config, ConnectionConfig};
use rds_data_mapper::error::{MapperError, Result};
use rds_data_mapper::{logging, record, DataApiClient};
use serde::Serialize;
use tracing::{error, info};

/// Destination record filled by the command.
#[derive(Debug, Default, Serialize)]
struct Item {
    id: String,
}

record!(Item { "id" => id });

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(&cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let format = cli.parse_output_format().map_err(MapperError::config)?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(cli, &config)?;
    info!("Connection: {}", connection.display_string());

    let client = DataApiClient::from_config(&connection).await?;

    let mut item = Item::default();
    let query = client.select_first(&mut item, &cli.table);
    match cli.timeout() {
        Some(limit) => tokio::time::timeout(limit, query)
            .await
            .map_err(|_| MapperError::Timeout(limit))??,
        None => query.await?,
    }

    print_record(&item, format)?;
    info!("finished");
    Ok(())
}

/// Resolves the final connection configuration from CLI args, config file, and environment.
///
/// Precedence: CLI arguments, then the named (or default) connection from the
/// config file, then environment variables.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = match cli.connection_name() {
        Some(name) => config.get_connection(Some(name)).cloned().ok_or_else(|| {
            MapperError::config(format!("Connection '{}' not found in config file", name))
        })?,
        None => config.get_connection(None).cloned().unwrap_or_default(),
    };

    connection.merge(&cli.to_connection_config());
    connection.apply_env_defaults();

    Ok(connection)
}

fn print_record<T: std::fmt::Debug + Serialize>(record: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Debug => println!("{record:#?}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(record)
                .map_err(|e| MapperError::internal(format!("Failed to encode record: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
