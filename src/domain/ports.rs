use crate::utils::error::{FormsError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// 等值篩選條件，對應 PostgREST 的 `col=eq.x` 與 `col=is.null`
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { column: String, value: String },
    IsNull { column: String },
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Filter::IsNull {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::IsNull { column } => column,
        }
    }

    /// PostgREST query string 的值部分
    pub fn operator_value(&self) -> String {
        match self {
            Filter::Eq { value, .. } => format!("eq.{}", value),
            Filter::IsNull { .. } => "is.null".to_string(),
        }
    }

    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Filter::Eq { column, value } => match row.get(column) {
                Some(Value::String(s)) => s == value,
                Some(Value::Null) | None => false,
                Some(other) => other.to_string() == *value,
            },
            Filter::IsNull { column } => matches!(row.get(column), None | Some(Value::Null)),
        }
    }
}

/// 遠端關聯式資料庫 (查詢建構器風格) 的最小契約
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// 插入一列並回傳儲存後的完整資料 (含產生的 id、時間戳)
    async fn insert(&self, table: &str, row: Value) -> Result<Value>;

    /// 對符合所有條件的列套用 patch，只回傳實際被更新的列
    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Vec<Value>>;

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>>;
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for std::sync::Arc<T> {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        (**self).insert(table, row).await
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Vec<Value>> {
        (**self).update(table, patch, filters).await
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        (**self).select(table, filters).await
    }
}

/// 剛好一列，否則錯誤
pub fn single(table: &str, mut rows: Vec<Value>) -> Result<Value> {
    if rows.len() == 1 {
        Ok(rows.remove(0))
    } else {
        Err(FormsError::UnexpectedRowCount {
            table: table.to_string(),
            expected: "exactly 1",
            actual: rows.len(),
        })
    }
}

/// 零或一列；多於一列視為錯誤
pub fn maybe_single(table: &str, mut rows: Vec<Value>) -> Result<Option<Value>> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(Some(rows.remove(0))),
        n => Err(FormsError::UnexpectedRowCount {
            table: table.to_string(),
            expected: "at most 1",
            actual: n,
        }),
    }
}

/// 連線到遠端資料庫所需的設定
pub trait StoreSettings: Send + Sync {
    fn store_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn businesses_table(&self) -> &str;
    fn enrollments_table(&self) -> &str;
}
