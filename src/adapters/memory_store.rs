use crate::domain::ports::{Filter, RemoteStore};
use crate::utils::error::{FormsError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 行程內的資料庫實作，用於測試與 `--dry-run`。
/// 條件式更新在同一把鎖內完成，因此認領具原子性。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 目前某個資料表的所有列 (複本)
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let tables = self.tables.lock().await;
        tables.get(table).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let Value::Object(mut object) = row else {
            return Err(FormsError::ValidationError {
                message: format!("rows inserted into {} must be JSON objects", table),
            });
        };

        if !matches!(object.get("id"), Some(Value::String(_))) {
            object.insert(
                "id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }
        if !matches!(object.get("created_at"), Some(Value::String(_))) {
            object.insert(
                "created_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }

        let stored = Value::Object(object);
        let mut tables = self.tables.lock().await;
        tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());

        tracing::debug!("memory store: inserted row into {}", table);
        Ok(stored)
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Vec<Value>> {
        let Value::Object(patch) = patch else {
            return Err(FormsError::ValidationError {
                message: format!("patch for {} must be a JSON object", table),
            });
        };

        let mut tables = self.tables.lock().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut() {
                if !filters.iter().all(|f| f.matches(&*row)) {
                    continue;
                }
                if let Value::Object(object) = row {
                    for (key, value) in &patch {
                        object.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }

        tracing::debug!("memory store: updated {} row(s) in {}", updated.len(), table);
        Ok(updated)
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
