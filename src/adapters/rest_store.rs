use crate::domain::ports::{single, Filter, RemoteStore, StoreSettings};
use crate::utils::error::{FormsError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// PostgREST 錯誤回應的格式
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// 透過 HTTP 存取託管資料庫 (PostgREST `/rest/v1`) 的實作
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl RestStore {
    pub fn new<C: StoreSettings + ?Sized>(settings: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds()))
            .build()?;

        // 確保結尾有斜線，否則 join 會取代最後一段路徑
        let mut base = Url::parse(settings.store_url())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let base_url = base.join("rest/v1/")?;

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key().to_string(),
        })
    }

    fn request(&self, method: Method, table: &str, filters: &[Filter]) -> Result<RequestBuilder> {
        let url = self.base_url.join(table)?;

        let mut query: Vec<(String, String)> = vec![("select".to_string(), "*".to_string())];
        for filter in filters {
            query.push((filter.column().to_string(), filter.operator_value()));
        }

        tracing::debug!("{} {} {:?}", method, url, query);

        Ok(self
            .client
            .request(method, url)
            .query(&query)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation"))
    }

    async fn send_rows(&self, request: RequestBuilder) -> Result<Vec<Value>> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Store response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        let body: Value = response.json().await?;
        match body {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}

fn rejection(status: u16, body: &str) -> FormsError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            let mut message = err
                .message
                .unwrap_or_else(|| format!("request failed with status {}", status));
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                message = format!("{} ({})", message, details);
            }
            if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                tracing::debug!("Store hint: {}", hint);
            }
            FormsError::StoreRejected {
                status,
                code: err.code,
                message,
            }
        }
        Err(_) => FormsError::StoreRejected {
            status,
            code: None,
            message: if body.trim().is_empty() {
                format!("request failed with status {}", status)
            } else {
                body.trim().to_string()
            },
        },
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        let request = self.request(Method::POST, table, &[])?.json(&row);
        let rows = self.send_rows(request).await?;
        single(table, rows)
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Vec<Value>> {
        let request = self.request(Method::PATCH, table, filters)?.json(&patch);
        self.send_rows(request).await
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        let request = self.request(Method::GET, table, filters)?;
        self.send_rows(request).await
    }
}
