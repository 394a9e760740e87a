#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use dmsql_core::SqlValue;
use dmsql_driver::{builder, Connection, DmBuilder, DmConfig, DriverError, Row};

/// Host connection double serving a fixed catalog and recording every
/// query it receives.
#[derive(Debug, Default)]
pub struct MockConnection {
    pub tables: Vec<String>,
    pub columns: HashMap<String, Vec<Row>>,
    pub failure: Option<DriverError>,
    pub latency: Duration,
    pub log: Mutex<Vec<(String, Vec<SqlValue>)>>,
}

impl MockConnection {
    pub fn shop() -> Self {
        let mut columns = HashMap::new();
        columns.insert(
            String::from("users"),
            vec![
                column("id", "INT", "N"),
                column("name", "VARCHAR", "Y"),
                column("score", "INT", "Y"),
                column("data", "JSON", "Y"),
                column("tags", "VARCHAR", "Y"),
            ],
        );
        columns.insert(
            String::from("orders"),
            vec![
                column("id", "INT", "N"),
                column("user_id", "INT", "N"),
                column("amount", "DECIMAL", "Y"),
            ],
        );
        Self {
            tables: vec![String::from("users"), String::from("orders")],
            columns,
            ..Self::default()
        }
    }

    pub fn failing(error: DriverError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn queries(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.queries()
            .iter()
            .filter(|(sql, _)| sql.contains(needle))
            .count()
    }
}

impl Connection for MockConnection {
    fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DriverError> {
        self.log
            .lock()
            .unwrap()
            .push((String::from(sql), params.to_vec()));
        thread::sleep(self.latency);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        if sql.contains("all_tables") {
            return Ok(self
                .tables
                .iter()
                .map(|table| Row::new().with("TABLE_NAME", table.as_str()))
                .collect());
        }
        let table = match params.first() {
            Some(SqlValue::Text(table)) => table.as_str(),
            _ => "",
        };
        Ok(self.columns.get(table).cloned().unwrap_or_default())
    }
}

pub fn column(name: &str, data_type: &str, nullable: &str) -> Row {
    Row::new()
        .with("COLUMN_NAME", name)
        .with("DATA_TYPE", data_type)
        .with("NULLABLE", nullable)
        .with("DATA_DEFAULT", SqlValue::Null)
}

pub fn config() -> DmConfig {
    DmConfig {
        hostname: String::from("db.local"),
        hostport: String::from("5236"),
        ..DmConfig::default()
    }
}

pub fn shop() -> DmBuilder<MockConnection> {
    builder(&config(), MockConnection::shop())
}
