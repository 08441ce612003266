use crate::domain::model::{Business, BusinessFormData, BusinessUpdate, ClaimOutcome};
use crate::domain::ports::{maybe_single, single, Filter, RemoteStore};
use crate::utils::error::{FormsError, Result};
use chrono::Utc;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

pub const DEFAULT_BUSINESSES_TABLE: &str = "businesses";

fn website_prefix() -> Result<&'static Regex> {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = PREFIX.get() {
        return Ok(re);
    }
    let re = Regex::new(r"^(https?://)?(www\.)?").map_err(|e| FormsError::ConfigError {
        message: format!("invalid website prefix pattern: {}", e),
    })?;
    Ok(PREFIX.get_or_init(|| re))
}

/// 去掉網址開頭的 `http(s)://` 與 `www.`，重複套用結果不變
pub fn normalize_website(website: &str) -> Result<String> {
    Ok(website_prefix()?.replace(website, "").into_owned())
}

/// 月費必須是有限且非負的數字；NaN 會被序列化成 null
fn check_monthly_fee(fee: f64) -> Result<()> {
    if fee.is_finite() && fee >= 0.0 {
        Ok(())
    } else {
        Err(FormsError::ValidationError {
            message: format!("monthly_fee must be a non-negative number, got {}", fee),
        })
    }
}

/// 商家資料的存取服務
#[derive(Debug, Clone)]
pub struct BusinessService<S: RemoteStore> {
    store: S,
    table: String,
}

impl<S: RemoteStore> BusinessService<S> {
    pub fn new(store: S) -> Self {
        Self::with_table(store, DEFAULT_BUSINESSES_TABLE)
    }

    pub fn with_table(store: S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 依 place id 查詢；找不到回傳 None
    pub async fn find_by_place_id(&self, place_id: &str) -> Result<Option<Business>> {
        let rows = self
            .store
            .select(&self.table, &[Filter::eq("place_id", place_id)])
            .await?;
        match maybe_single(&self.table, rows)? {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Business>> {
        let rows = self.store.select(&self.table, &[Filter::eq("id", id)]).await?;
        match maybe_single(&self.table, rows)? {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// 建立一筆尚未被認領的商家
    pub async fn create(&self, form: &BusinessFormData, place_id: Option<&str>) -> Result<Business> {
        check_monthly_fee(form.monthly_fee)?;
        let website = form.website.as_deref().map(normalize_website).transpose()?;

        let mut row = json!({
            "first_name": form.first_name,
            "last_name": form.last_name,
            "contact_email": form.contact_email,
            "phone": form.phone,
            "church": form.church,
            "business_name": form.business_name,
            "business_address": form.business_address,
            "website": website,
            "business_description": form.business_description,
            "subscription_tier": form.subscription_tier,
            "monthly_fee": form.monthly_fee,
            "created_at": Utc::now().to_rfc3339(),
        });
        if let (Some(place_id), Value::Object(object)) = (place_id, &mut row) {
            object.insert("place_id".to_string(), Value::String(place_id.to_string()));
        }

        let stored = self.store.insert(&self.table, row).await.map_err(|e| {
            tracing::error!("Failed to create business '{}': {}", form.business_name, e);
            e
        })?;
        let business: Business = serde_json::from_value(stored)?;
        tracing::info!("✅ Created business {} ({})", business.id, business.business_name);
        Ok(business)
    }

    /// 合併變更欄位並蓋上 updated_at
    pub async fn update(&self, id: &str, changes: &BusinessUpdate) -> Result<Business> {
        if let Some(fee) = changes.monthly_fee {
            check_monthly_fee(fee)?;
        }
        let mut changes = changes.clone();
        if let Some(Some(website)) = changes.website.as_mut() {
            *website = normalize_website(website.as_str())?;
        }

        let mut patch = serde_json::to_value(&changes)?;
        if let Value::Object(object) = &mut patch {
            object.insert(
                "updated_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }

        let rows = self
            .store
            .update(&self.table, patch, &[Filter::eq("id", id)])
            .await
            .map_err(|e| {
                tracing::error!("Failed to update business {}: {}", id, e);
                e
            })?;
        if rows.is_empty() {
            return Err(FormsError::NotFound {
                table: self.table.clone(),
                key: id.to_string(),
            });
        }

        let business: Business = serde_json::from_value(single(&self.table, rows)?)?;
        tracing::info!("✅ Updated business {}", business.id);
        Ok(business)
    }

    /// 只在 claimed_by 仍為空時才寫入；先搶先贏由資料庫的條件式更新保證
    pub async fn claim(&self, id: &str, user_id: &str) -> ClaimOutcome {
        let filters = [Filter::eq("id", id), Filter::is_null("claimed_by")];
        let rows = match self
            .store
            .update(&self.table, json!({ "claimed_by": user_id }), &filters)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Claim of business {} failed: {}", id, e);
                return ClaimOutcome::Failed(e);
            }
        };

        if rows.is_empty() {
            // 沒有列被更新：可能已被認領，也可能根本不存在
            return match self.find_by_id(id).await {
                Ok(Some(_)) => {
                    tracing::warn!("⚠️ Business {} is already claimed", id);
                    ClaimOutcome::AlreadyClaimed
                }
                Ok(None) => ClaimOutcome::Failed(FormsError::NotFound {
                    table: self.table.clone(),
                    key: id.to_string(),
                }),
                Err(e) => ClaimOutcome::Failed(e),
            };
        }

        match single(&self.table, rows).and_then(|row| Ok(serde_json::from_value::<Business>(row)?)) {
            Ok(business) => {
                tracing::info!("✅ Business {} claimed by {}", id, user_id);
                ClaimOutcome::Claimed(business)
            }
            Err(e) => ClaimOutcome::Failed(e),
        }
    }
}
