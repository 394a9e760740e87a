#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use dmsql_core::{Builder, BuilderOptions, ColumnInfo, GenericDialect, Introspect};

/// In-memory catalog that counts how often it is queried.
#[derive(Debug, Default)]
pub struct MemorySchema {
    pub tables: HashMap<String, Vec<ColumnInfo>>,
    pub table_calls: AtomicUsize,
    pub column_calls: AtomicUsize,
    /// Delay applied inside every lookup, to widen race windows.
    pub latency: Duration,
}

impl MemorySchema {
    pub fn shop() -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            String::from("users"),
            vec![
                ColumnInfo::new("id", "INT").primary_key().not_null(),
                ColumnInfo::new("name", "VARCHAR"),
                ColumnInfo::new("user_id", "INT"),
                ColumnInfo::new("score", "INT"),
                ColumnInfo::new("data", "JSON"),
            ],
        );
        tables.insert(
            String::from("orders"),
            vec![
                ColumnInfo::new("id", "INT").primary_key().not_null(),
                ColumnInfo::new("user_id", "INT"),
                ColumnInfo::new("amount", "DECIMAL"),
            ],
        );
        Self {
            tables,
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn table_calls(&self) -> usize {
        self.table_calls.load(Ordering::SeqCst)
    }

    pub fn column_calls(&self) -> usize {
        self.column_calls.load(Ordering::SeqCst)
    }
}

impl Introspect for MemorySchema {
    type Error = std::io::Error;

    fn list_tables(&self) -> Result<Vec<String>, Self::Error> {
        self.table_calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.latency);
        Ok(self.tables.keys().cloned().collect())
    }

    fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, Self::Error> {
        self.column_calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.latency);
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}

pub fn shop_builder() -> Builder<GenericDialect, MemorySchema> {
    Builder::new(
        GenericDialect::new(),
        BuilderOptions::default(),
        MemorySchema::shop(),
    )
}
