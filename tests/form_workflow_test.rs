use async_trait::async_trait;
use patriot_forms::domain::ports::{Filter, RemoteStore};
use patriot_forms::forms::{
    ambassador_form, business_claim_form, AmbassadorEdit, BusinessEdit, FormField, Phase, View,
};
use patriot_forms::utils::error::{FormsError, Result};
use patriot_forms::{BusinessService, Commitment, EnrollmentService, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

/// 記錄每次寫入，必要時讓寫入失敗
#[derive(Clone, Default)]
struct RecordingStore {
    inner: MemoryStore,
    inserts: Arc<Mutex<Vec<(String, Value)>>>,
    fail_writes: Arc<Mutex<Option<String>>>,
}

impl RecordingStore {
    async fn fail_with(&self, message: &str) {
        *self.fail_writes.lock().await = Some(message.to_string());
    }

    async fn recover(&self) {
        *self.fail_writes.lock().await = None;
    }

    async fn insert_calls(&self) -> Vec<(String, Value)> {
        self.inserts.lock().await.clone()
    }

    async fn check_failure(&self) -> Result<()> {
        match self.fail_writes.lock().await.as_ref() {
            Some(message) => Err(FormsError::StoreRejected {
                status: 503,
                code: None,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStore for RecordingStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value> {
        self.inserts
            .lock()
            .await
            .push((table.to_string(), row.clone()));
        self.check_failure().await?;
        self.inner.insert(table, row).await
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> Result<Vec<Value>> {
        self.check_failure().await?;
        self.inner.update(table, patch, filters).await
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        self.inner.select(table, filters).await
    }
}

#[tokio::test]
async fn test_valid_ambassador_submission_creates_once_and_succeeds() {
    let store = RecordingStore::default();
    let mut form = ambassador_form(EnrollmentService::new(store.clone()));

    form.edit(AmbassadorEdit::FirstName("Jane".to_string()));
    form.edit(AmbassadorEdit::LastName("Doe".to_string()));
    form.edit(AmbassadorEdit::Email("j@x.com".to_string()));
    form.edit(AmbassadorEdit::Phone(String::new()));
    form.edit(AmbassadorEdit::Church(String::new()));
    form.edit(AmbassadorEdit::ToggleCommitment(Commitment::BeActive));

    assert_eq!(form.submit().await, Phase::Success);
    assert_eq!(form.state().view(), View::Success);

    let calls = store.insert_calls().await;
    assert_eq!(calls.len(), 1);
    let (table, row) = &calls[0];
    assert_eq!(table, "enrollments");
    assert_eq!(row["type"], "ambassador");
    assert_eq!(row["first_name"], "Jane");
    assert_eq!(row["last_name"], "Doe");
    assert_eq!(row["email"], "j@x.com");
    assert_eq!(row["commitments"], json!(["Be active"]));
    assert!(row["phone"].is_null());
    assert!(row["church"].is_null());
}

#[tokio::test]
async fn test_missing_commitments_blocks_submission_without_network() {
    let store = RecordingStore::default();
    let mut form = ambassador_form(EnrollmentService::new(store.clone()));

    form.edit(AmbassadorEdit::FirstName("Jane".to_string()));
    form.edit(AmbassadorEdit::LastName("Doe".to_string()));
    form.edit(AmbassadorEdit::Email("j@x.com".to_string()));

    assert_eq!(form.submit().await, Phase::Editing);
    assert_eq!(
        form.state().errors().get(FormField::Commitments),
        Some("Please accept at least one commitment")
    );
    assert_eq!(form.state().errors().len(), 1);
    assert!(store.insert_calls().await.is_empty());

    // 勾選後錯誤消失，並可以送出
    form.edit(AmbassadorEdit::ToggleCommitment(Commitment::SpreadAwareness));
    assert!(form.state().errors().is_empty());
    assert_eq!(form.submit().await, Phase::Success);
    assert_eq!(store.insert_calls().await.len(), 1);
}

#[tokio::test]
async fn test_blank_business_form_reports_required_fields_without_network() {
    let store = RecordingStore::default();
    let mut form = business_claim_form(BusinessService::new(store.clone()), None, None);

    assert_eq!(form.submit().await, Phase::Editing);

    let errors = form.state().errors();
    let fields: Vec<FormField> = errors.iter().map(|(f, _)| f).collect();
    assert_eq!(
        fields,
        vec![
            FormField::FirstName,
            FormField::LastName,
            FormField::ContactEmail,
            FormField::BusinessName,
            FormField::BusinessAddress,
            FormField::BusinessDescription,
        ]
    );
    assert_eq!(errors.get(FormField::ContactEmail), Some("Contact email is required"));
    assert!(!errors.contains(FormField::Submit));
    assert!(store.insert_calls().await.is_empty());
}

#[tokio::test]
async fn test_failed_create_keeps_fields_and_sets_single_submit_error() {
    let store = RecordingStore::default();
    store.fail_with("connection refused by upstream").await;

    let mut form = ambassador_form(EnrollmentService::new(store.clone()));
    form.edit(AmbassadorEdit::FirstName("Jane".to_string()));
    form.edit(AmbassadorEdit::LastName("Doe".to_string()));
    form.edit(AmbassadorEdit::Email("j@x.com".to_string()));
    form.edit(AmbassadorEdit::Church("Grace Chapel".to_string()));
    form.edit(AmbassadorEdit::ToggleCommitment(Commitment::SupportValues));
    let before = form.state().data().clone();

    assert_eq!(form.submit().await, Phase::Editing);

    let state = form.state();
    assert!(!state.is_loading());
    assert_eq!(state.errors().len(), 1);
    assert_eq!(
        state.errors().get(FormField::Submit),
        Some("connection refused by upstream")
    );
    assert_eq!(state.view(), View::ErrorBanner("connection refused by upstream"));
    assert_eq!(state.data(), &before);

    // 使用者可以直接重試
    store.recover().await;
    assert_eq!(form.submit().await, Phase::Success);
    assert_eq!(store.insert_calls().await.len(), 2);
    assert_eq!(store.inner.rows("enrollments").await.len(), 1);
}

#[tokio::test]
async fn test_failed_business_update_reports_submit_error() {
    let store = RecordingStore::default();
    let service = BusinessService::new(store.clone());

    let mut form = business_claim_form(service.clone(), None, Some("place-3".to_string()));
    for edit in [
        BusinessEdit::FirstName("Ann".to_string()),
        BusinessEdit::LastName("Lee".to_string()),
        BusinessEdit::ContactEmail("ann@bakery.com".to_string()),
        BusinessEdit::BusinessName("Ann's Bakery".to_string()),
        BusinessEdit::BusinessAddress("1 Main St".to_string()),
        BusinessEdit::BusinessDescription("Bread".to_string()),
    ] {
        form.edit(edit);
    }
    assert_eq!(form.submit().await, Phase::Success);

    let existing = service.find_by_place_id("place-3").await.unwrap().unwrap();
    store.fail_with("permission denied for table businesses").await;

    let mut form = business_claim_form(service, Some(&existing), None);
    form.edit(BusinessEdit::FirstName("Ann".to_string()));
    form.edit(BusinessEdit::LastName("Lee".to_string()));
    form.edit(BusinessEdit::ContactEmail("ann@bakery.com".to_string()));
    form.edit(BusinessEdit::BusinessDescription("Bread and cakes".to_string()));

    assert_eq!(form.submit().await, Phase::Editing);
    assert_eq!(form.state().errors().len(), 1);
    assert_eq!(
        form.state().errors().get(FormField::Submit),
        Some("permission denied for table businesses")
    );
    assert_eq!(form.state().data().business_description, "Bread and cakes");
}

fn complete_business_edits() -> Vec<BusinessEdit> {
    vec![
        BusinessEdit::FirstName("Ann".to_string()),
        BusinessEdit::LastName("Lee".to_string()),
        BusinessEdit::ContactEmail("ann@bakery.com".to_string()),
        BusinessEdit::BusinessName("Ann's Bakery".to_string()),
        BusinessEdit::BusinessAddress("1 Main St".to_string()),
        BusinessEdit::BusinessDescription("Bread".to_string()),
    ]
}

#[tokio::test]
async fn test_invalid_monthly_fee_blocks_submission_and_writes_nothing() {
    let store = RecordingStore::default();
    let mut form = business_claim_form(
        BusinessService::new(store.clone()),
        None,
        Some("place-8".to_string()),
    );
    for edit in complete_business_edits() {
        form.edit(edit);
    }
    form.edit(BusinessEdit::MonthlyFee(f64::NAN));

    // 連送兩次都不應寫入任何資料
    for _ in 0..2 {
        assert_eq!(form.submit().await, Phase::Editing);
        assert_eq!(form.state().errors().len(), 1);
        assert_eq!(
            form.state().errors().get(FormField::MonthlyFee),
            Some("Monthly fee must be a non-negative amount")
        );
    }
    assert!(store.insert_calls().await.is_empty());
    assert!(store.inner.rows("businesses").await.is_empty());

    form.edit(BusinessEdit::MonthlyFee(25.0));
    assert!(form.state().errors().is_empty());
    assert_eq!(form.submit().await, Phase::Success);
    let rows = store.inner.rows("businesses").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["monthly_fee"], 25.0);
}

#[tokio::test]
async fn test_updating_existing_business_clears_removed_phone() {
    let store = RecordingStore::default();
    let service = BusinessService::new(store.clone());

    let mut form = business_claim_form(service.clone(), None, Some("place-4".to_string()));
    for edit in complete_business_edits() {
        form.edit(edit);
    }
    form.edit(BusinessEdit::Phone(Some("555-0100".to_string())));
    form.edit(BusinessEdit::Church(Some("Grace Chapel".to_string())));
    assert_eq!(form.submit().await, Phase::Success);

    let existing = service.find_by_place_id("place-4").await.unwrap().unwrap();
    assert_eq!(existing.phone.as_deref(), Some("555-0100"));

    let mut form = business_claim_form(service.clone(), Some(&existing), None);
    form.edit(BusinessEdit::FirstName("Ann".to_string()));
    form.edit(BusinessEdit::LastName("Lee".to_string()));
    form.edit(BusinessEdit::ContactEmail("ann@bakery.com".to_string()));
    form.edit(BusinessEdit::Phone(None));
    form.edit(BusinessEdit::Church(Some("Grace Chapel".to_string())));
    assert_eq!(form.submit().await, Phase::Success);

    let stored = service.find_by_id(&existing.id).await.unwrap().unwrap();
    assert!(stored.phone.is_none());
    assert_eq!(stored.church.as_deref(), Some("Grace Chapel"));
    assert_eq!(store.inner.rows("businesses").await.len(), 1);
}

#[tokio::test]
async fn test_any_missing_required_business_fields_block_submission() {
    let store = RecordingStore::default();
    let required = [
        FormField::FirstName,
        FormField::LastName,
        FormField::ContactEmail,
        FormField::BusinessName,
        FormField::BusinessAddress,
        FormField::BusinessDescription,
    ];

    for mask in 1u32..(1 << required.len()) {
        let mut form = business_claim_form(BusinessService::new(store.clone()), None, None);
        for (bit, edit) in complete_business_edits().into_iter().enumerate() {
            if mask & (1u32 << bit) == 0 {
                form.edit(edit);
            }
        }

        assert_eq!(form.submit().await, Phase::Editing, "mask {:06b}", mask);
        let reported: Vec<FormField> = form.state().errors().iter().map(|(f, _)| f).collect();
        let expected: Vec<FormField> = required
            .iter()
            .enumerate()
            .filter(|&(bit, _)| mask & (1u32 << bit) != 0)
            .map(|(_, field)| *field)
            .collect();
        assert_eq!(reported, expected, "mask {:06b}", mask);
    }
    assert!(store.insert_calls().await.is_empty());
}
