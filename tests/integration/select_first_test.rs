//! End-to-end `select_first` tests against in-memory executors.

use pretty_assertions::assert_eq;
use rds_data_mapper::config::ConnectionConfig;
use rds_data_mapper::db::{
    ColumnInfo, FailingExecutor, MockExecutor, QueryResult, StatementExecutor, StatementRequest,
    Value,
};
use rds_data_mapper::{record, DataApiClient, MapperError};
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq)]
struct Transaction {
    id: i64,
    reference: String,
    settled: bool,
    amount: f64,
    memo: Option<String>,
    attempts: u16,
    // Unannotated, never written by the mapper.
    local_tag: String,
}

record!(Transaction {
    "id" => id,
    "reference" => reference,
    "settled" => settled,
    "amount" => amount,
    "memo" => memo,
    "attempts" => attempts,
});

#[derive(Debug, Default)]
struct Item {
    id: i64,
}

record!(Item { "id" => id });

/// Shares one mock between the client and the test so requests can be inspected.
struct Shared(Arc<MockExecutor>);

#[async_trait::async_trait]
impl StatementExecutor for Shared {
    async fn execute_statement(
        &self,
        request: &StatementRequest,
    ) -> rds_data_mapper::Result<QueryResult> {
        self.0.execute_statement(request).await
    }
}

fn config() -> ConnectionConfig {
    ConnectionConfig::new(
        "ledger",
        "arn:aws:rds:eu-west-1:123456789012:cluster:ledger",
        "arn:aws:secretsmanager:eu-west-1:123456789012:secret:ledger-ro",
        "eu-west-1",
    )
}

fn client_with(result: QueryResult) -> DataApiClient {
    DataApiClient::with_executor(Box::new(MockExecutor::with_result(result)), &config()).unwrap()
}

fn transaction_result(rows: Vec<Vec<Value>>) -> QueryResult {
    QueryResult::with_data(
        vec![
            ColumnInfo::new("id", "int8"),
            ColumnInfo::new("reference", "varchar"),
            ColumnInfo::new("settled", "bool"),
            ColumnInfo::new("amount", "float8"),
            ColumnInfo::new("memo", "text"),
            ColumnInfo::new("attempts", "int4"),
            ColumnInfo::new("created_by", "varchar"),
        ],
        rows,
    )
}

#[tokio::test]
async fn test_select_first_populates_record() {
    let client = client_with(transaction_result(vec![vec![
        Value::Int(1001),
        Value::from("INV-1001"),
        Value::Bool(true),
        Value::Float(249.99),
        Value::from("first order"),
        Value::Int(2),
        Value::from("batch-import"),
    ]]));

    let mut tx = Transaction {
        local_tag: "local".to_string(),
        ..Default::default()
    };
    client.select_first(&mut tx, "transaction").await.unwrap();

    assert_eq!(
        tx,
        Transaction {
            id: 1001,
            reference: "INV-1001".to_string(),
            settled: true,
            amount: 249.99,
            memo: Some("first order".to_string()),
            attempts: 2,
            local_tag: "local".to_string(),
        }
    );
}

#[tokio::test]
async fn test_select_first_sends_fixed_query() {
    let mock = Arc::new(MockExecutor::new());
    let client = DataApiClient::with_executor(Box::new(Shared(mock.clone())), &config()).unwrap();

    let mut item = Item::default();
    client.select_first(&mut item, "transaction").await.unwrap();

    let requests = mock.requests();
    assert_eq!(
        requests,
        vec![StatementRequest {
            sql: "SELECT * FROM ledger.transaction LIMIT 1".to_string(),
            database: "ledger".to_string(),
            resource_arn: "arn:aws:rds:eu-west-1:123456789012:cluster:ledger".to_string(),
            secret_arn: "arn:aws:secretsmanager:eu-west-1:123456789012:secret:ledger-ro"
                .to_string(),
            include_result_metadata: true,
        }]
    );
}

#[tokio::test]
async fn test_client_is_reusable() {
    let client = client_with(QueryResult::with_data(
        vec![ColumnInfo::new("id", "int8")],
        vec![vec![Value::Int(42)]],
    ));

    for _ in 0..3 {
        let mut item = Item::default();
        client.select_first(&mut item, "transaction").await.unwrap();
        assert_eq!(item.id, 42);
    }
}

#[tokio::test]
async fn test_empty_table_leaves_record_unchanged() {
    let client = client_with(transaction_result(vec![]));
    let original = Transaction {
        id: 7,
        reference: "keep".to_string(),
        ..Default::default()
    };

    let mut tx = original.clone();
    client.select_first(&mut tx, "transaction").await.unwrap();

    assert_eq!(tx, original);
}

#[tokio::test]
async fn test_nulls_keep_plain_fields_and_clear_options() {
    let client = client_with(transaction_result(vec![vec![
        Value::Int(5),
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
    ]]));

    let mut tx = Transaction {
        reference: "prior".to_string(),
        settled: true,
        memo: Some("stale".to_string()),
        attempts: 9,
        ..Default::default()
    };
    client.select_first(&mut tx, "transaction").await.unwrap();

    assert_eq!(tx.id, 5);
    assert_eq!(tx.reference, "prior");
    assert!(tx.settled);
    assert_eq!(tx.attempts, 9);
    assert_eq!(tx.memo, None);
}

#[tokio::test]
async fn test_execution_error_is_propagated() {
    let client = DataApiClient::with_executor(
        Box::new(FailingExecutor::new(
            "BadRequestException: relation \"ledger.nope\" does not exist",
        )),
        &config(),
    )
    .unwrap();

    let mut item = Item { id: 3 };
    let err = client.select_first(&mut item, "nope").await.unwrap_err();

    assert_eq!(
        err,
        MapperError::execution("BadRequestException: relation \"ledger.nope\" does not exist")
    );
    assert_eq!(err.category(), "Execution Error");
    assert_eq!(item.id, 3);
}

#[tokio::test]
async fn test_type_mismatch_is_conversion_error() {
    let client = client_with(QueryResult::with_data(
        vec![ColumnInfo::new("id", "varchar")],
        vec![vec![Value::from("not-a-number")]],
    ));

    let mut item = Item { id: 1 };
    let err = client.select_first(&mut item, "transaction").await.unwrap_err();

    assert_eq!(err, MapperError::conversion("id", "i64", "text"));
    assert_eq!(item.id, 1);
}

#[tokio::test]
async fn test_out_of_range_integer_is_conversion_error() {
    let mut row = vec![
        Value::Int(1),
        Value::from("r"),
        Value::Bool(false),
        Value::Float(0.0),
        Value::Null,
        Value::Int(70_000),
        Value::Null,
    ];
    let client = client_with(transaction_result(vec![row.clone()]));

    let mut tx = Transaction::default();
    let err = client.select_first(&mut tx, "transaction").await.unwrap_err();
    assert!(matches!(err, MapperError::Conversion { ref column, .. } if column == "attempts"));
    assert_eq!(tx, Transaction::default());

    row[5] = Value::Int(65_535);
    let client = client_with(transaction_result(vec![row]));
    client.select_first(&mut tx, "transaction").await.unwrap();
    assert_eq!(tx.attempts, u16::MAX);
}

#[tokio::test]
async fn test_unsupported_kinds_are_ignored() {
    let client = client_with(QueryResult::with_data(
        vec![ColumnInfo::new("id", "_int8")],
        vec![vec![Value::Other("integer array".to_string())]],
    ));

    let mut item = Item { id: 11 };
    client.select_first(&mut item, "transaction").await.unwrap();

    assert_eq!(item.id, 11);
}
