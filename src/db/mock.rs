//! Mock statement executors for testing.
//!
//! Provides in-memory executors so the query and mapping layers can be
//! exercised without a live Data API endpoint.

use super::{QueryResult, StatementExecutor, StatementRequest};
use crate::error::{MapperError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mock executor that returns a predefined result and records every request.
#[derive(Debug, Default)]
pub struct MockExecutor {
    result: QueryResult,
    requests: Mutex<Vec<StatementRequest>>,
}

impl MockExecutor {
    /// Creates a mock executor that returns an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock executor that returns the given result for every statement.
    pub fn with_result(result: QueryResult) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests received so far, oldest first.
    pub fn requests(&self) -> Vec<StatementRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StatementExecutor for MockExecutor {
    async fn execute_statement(&self, request: &StatementRequest) -> Result<QueryResult> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(self.result.clone())
    }
}

/// An executor whose every statement fails with the given service message.
#[derive(Debug, Clone)]
pub struct FailingExecutor {
    message: String,
}

impl FailingExecutor {
    /// Creates an executor that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl StatementExecutor for FailingExecutor {
    async fn execute_statement(&self, _request: &StatementRequest) -> Result<QueryResult> {
        Err(MapperError::execution(self.message.clone()))
    }
}
