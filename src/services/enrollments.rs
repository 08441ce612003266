use crate::domain::model::{AmbassadorEnrollment, StoredEnrollment};
use crate::domain::ports::RemoteStore;
use crate::utils::error::Result;
use chrono::Utc;
use serde_json::{json, Value};

pub const DEFAULT_ENROLLMENTS_TABLE: &str = "enrollments";

#[derive(Debug, Clone)]
pub struct EnrollmentService<S: RemoteStore> {
    store: S,
    table: String,
}

impl<S: RemoteStore> EnrollmentService<S> {
    pub fn new(store: S) -> Self {
        Self::with_table(store, DEFAULT_ENROLLMENTS_TABLE)
    }

    pub fn with_table(store: S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// 新增一筆大使報名；建立後不再修改
    pub async fn create_ambassador_enrollment(
        &self,
        enrollment: &AmbassadorEnrollment,
    ) -> Result<StoredEnrollment> {
        let mut row = serde_json::to_value(enrollment)?;
        if let Value::Object(object) = &mut row {
            object.insert("type".to_string(), json!("ambassador"));
            object.insert("created_at".to_string(), json!(Utc::now().to_rfc3339()));
        }

        let stored = self.store.insert(&self.table, row).await.map_err(|e| {
            tracing::error!("Failed to submit enrollment for {}: {}", enrollment.email, e);
            e
        })?;
        let stored: StoredEnrollment = serde_json::from_value(stored)?;
        tracing::info!(
            "✅ Ambassador enrollment {} created with {} commitment(s)",
            stored.id,
            stored.enrollment.commitments.len()
        );
        Ok(stored)
    }
}
