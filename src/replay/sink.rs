//! Destinations for the dense rating history

use crate::error::{RatingError, Result};
use crate::replay::history::HistoryTable;
use std::path::{Path, PathBuf};
use tracing::info;

/// Trait for consuming a finished rating history
pub trait HistorySink {
    fn write_table(&mut self, table: &HistoryTable) -> Result<()>;
}

/// Sink keeping every written table in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryHistorySink {
    tables: Vec<HistoryTable>,
}

impl MemoryHistorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[HistoryTable] {
        &self.tables
    }

    pub fn last(&self) -> Option<&HistoryTable> {
        self.tables.last()
    }
}

impl HistorySink for MemoryHistorySink {
    fn write_table(&mut self, table: &HistoryTable) -> Result<()> {
        self.tables.push(table.clone());
        Ok(())
    }
}

/// Sink writing the table as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonHistorySink {
    path: PathBuf,
}

impl JsonHistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for JsonHistorySink {
    fn write_table(&mut self, table: &HistoryTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RatingError::HistoryWriteFailed {
                    message: format!("failed to create {}: {}", parent.display(), e),
                })?;
            }
        }

        let json =
            serde_json::to_string_pretty(table).map_err(|e| RatingError::HistoryWriteFailed {
                message: format!("failed to serialize history: {}", e),
            })?;

        std::fs::write(&self.path, json).map_err(|e| RatingError::HistoryWriteFailed {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })?;

        info!(
            "Saved rating history for {} entities over {} contests to {}",
            table.entities.len(),
            table.contests.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> HistoryTable {
        HistoryTable {
            contests: vec!["c1".to_string(), "c2".to_string()],
            entities: vec!["a".to_string()],
            ratings: vec![vec![1420, 1433]],
        }
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemoryHistorySink::new();
        assert!(sink.last().is_none());

        sink.write_table(&table()).unwrap();
        assert_eq!(sink.tables().len(), 1);
        assert_eq!(sink.last(), Some(&table()));
    }

    #[test]
    fn test_json_sink_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rating").join("rating_school.json");

        let mut sink = JsonHistorySink::new(&path);
        sink.write_table(&table()).unwrap();

        let written: HistoryTable =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, table());
    }
}
