use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 大使必須至少接受一項的承諾
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Commitment {
    #[serde(rename = "Spread awareness")]
    SpreadAwareness,
    #[serde(rename = "Engage with community")]
    EngageWithCommunity,
    #[serde(rename = "Support values")]
    SupportValues,
    #[serde(rename = "Be active")]
    BeActive,
}

impl Commitment {
    pub const ALL: [Commitment; 4] = [
        Commitment::SpreadAwareness,
        Commitment::EngageWithCommunity,
        Commitment::SupportValues,
        Commitment::BeActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::SpreadAwareness => "Spread awareness",
            Commitment::EngageWithCommunity => "Engage with community",
            Commitment::SupportValues => "Support values",
            Commitment::BeActive => "Be active",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Commitment::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown commitment '{}', expected one of: {}",
                    s,
                    Commitment::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}

/// 寫入 enrollments 表的大使報名資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbassadorEnrollment {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub church: Option<String>,
    pub commitments: Vec<Commitment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEnrollment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub enrollment: AmbassadorEnrollment,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Basic,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Premium => "premium",
        }
    }
}

impl FromStr for SubscriptionTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(SubscriptionTier::Basic),
            "premium" => Ok(SubscriptionTier::Premium),
            other => Err(format!("unknown subscription tier '{}'", other)),
        }
    }
}

/// 商家表單的輸入值。必填欄位用 String，選填用 Option。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BusinessFormData {
    pub first_name: String,
    pub last_name: String,
    pub contact_email: String,
    pub phone: Option<String>,
    pub church: Option<String>,
    pub business_name: String,
    pub business_address: String,
    pub website: Option<String>,
    pub business_description: String,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub monthly_fee: f64,
}

impl BusinessFormData {
    /// 認領既有商家時，用已存在的商家資料預填
    pub fn prefilled_from(existing: &Business) -> Self {
        Self {
            business_name: existing.business_name.clone(),
            business_address: existing.business_address.clone(),
            website: existing.website.clone(),
            business_description: existing.business_description.clone(),
            ..Self::default()
        }
    }
}

/// 部分更新；None 的欄位不會送出。
/// 選填欄位用 `Option<Option<_>>`：`Some(None)` 送出 `null` 清除原值。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BusinessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub church: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<SubscriptionTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_fee: Option<f64>,
}

impl From<&BusinessFormData> for BusinessUpdate {
    fn from(form: &BusinessFormData) -> Self {
        Self {
            first_name: Some(form.first_name.clone()),
            last_name: Some(form.last_name.clone()),
            contact_email: Some(form.contact_email.clone()),
            phone: Some(form.phone.clone()),
            church: Some(form.church.clone()),
            business_name: Some(form.business_name.clone()),
            business_address: Some(form.business_address.clone()),
            website: Some(form.website.clone()),
            business_description: Some(form.business_description.clone()),
            subscription_tier: Some(form.subscription_tier),
            monthly_fee: Some(form.monthly_fee),
        }
    }
}

/// businesses 表中的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    #[serde(default)]
    pub place_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub church: Option<String>,
    pub business_name: String,
    pub business_address: String,
    #[serde(default)]
    pub website: Option<String>,
    pub business_description: String,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub monthly_fee: f64,
    #[serde(default)]
    pub claimed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 條件式認領的結果
#[derive(Debug)]
pub enum ClaimOutcome {
    Claimed(Business),
    AlreadyClaimed,
    Failed(crate::utils::error::FormsError),
}

impl ClaimOutcome {
    pub fn into_result(self, business_id: &str) -> crate::utils::error::Result<Business> {
        match self {
            ClaimOutcome::Claimed(business) => Ok(business),
            ClaimOutcome::AlreadyClaimed => Err(crate::utils::error::FormsError::ClaimConflict {
                business_id: business_id.to_string(),
            }),
            ClaimOutcome::Failed(err) => Err(err),
        }
    }
}
