//! Live Data API tests.
//!
//! Require AWS credentials plus RDS_TEST_RESOURCE_ARN, RDS_TEST_SECRET_ARN,
//! RDS_TEST_DATABASE and RDS_TEST_REGION. The target database must contain a
//! table named by RDS_TEST_TABLE (default `transaction`) with an `id` column.

use rds_data_mapper::config::ConnectionConfig;
use rds_data_mapper::{record, DataApiClient, MapperError};

#[derive(Debug, Default)]
struct LiveRow {
    id: Option<i64>,
}

record!(LiveRow { "id" => id });

/// Builds the live connection config, or `None` when any variable is absent.
fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Option<ConnectionConfig> {
    Some(ConnectionConfig::new(
        lookup("RDS_TEST_DATABASE")?,
        lookup("RDS_TEST_RESOURCE_ARN")?,
        lookup("RDS_TEST_SECRET_ARN")?,
        lookup("RDS_TEST_REGION")?,
    ))
}

/// Helper to get the live connection config from the environment.
fn get_test_config() -> Option<ConnectionConfig> {
    config_from(|name| std::env::var(name).ok())
}

/// Helper to create a test client. Skips only when the variables are unset;
/// a configured but unusable connection fails the test.
async fn get_test_client() -> Option<DataApiClient> {
    let config = get_test_config()?;
    Some(DataApiClient::from_config(&config).await.unwrap())
}

#[test]
fn test_live_config_requires_every_variable() {
    let full = |name: &str| Some(format!("{name}-value"));
    let config = config_from(full).unwrap();
    assert_eq!(config.database.as_deref(), Some("RDS_TEST_DATABASE-value"));

    let missing_region = |name: &str| (name != "RDS_TEST_REGION").then(|| format!("{name}-value"));
    assert!(config_from(missing_region).is_none());
}

#[tokio::test]
async fn test_live_broken_config_is_not_skipped() {
    // Blank identifiers are present but unusable, so connecting must fail.
    let config = config_from(|_| Some(" ".to_string())).unwrap();
    let err = DataApiClient::from_config(&config).await.err();
    assert!(matches!(err, Some(MapperError::Config(_))));
}

#[tokio::test]
async fn test_live_select_first() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: RDS_TEST_* variables not set");
        return;
    };

    let table = std::env::var("RDS_TEST_TABLE").unwrap_or_else(|_| "transaction".to_string());
    let mut row = LiveRow::default();
    client.select_first(&mut row, &table).await.unwrap();
}

#[tokio::test]
async fn test_live_missing_table() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: RDS_TEST_* variables not set");
        return;
    };

    let mut row = LiveRow::default();
    let err = client
        .select_first(&mut row, "nonexistent_table_xyz")
        .await
        .unwrap_err();

    assert!(matches!(err, MapperError::Execution(_)));
    assert!(row.id.is_none());
}
