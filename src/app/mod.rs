//! 命令列與其他進入點共用的流程：把設定、資料庫和表單接在一起。

use crate::domain::model::{Business, BusinessFormData};
use crate::domain::ports::{RemoteStore, StoreSettings};
use crate::forms::{
    ambassador_form, business_claim_form, AmbassadorEdit, AmbassadorFormData, BusinessEdit,
    FormState,
};
use crate::services::{BusinessService, EnrollmentService};
use crate::utils::error::Result;

pub struct FormsApp<S: RemoteStore + Clone> {
    businesses: BusinessService<S>,
    enrollments: EnrollmentService<S>,
}

impl<S: RemoteStore + Clone> FormsApp<S> {
    pub fn new<C: StoreSettings + ?Sized>(store: S, settings: &C) -> Self {
        Self {
            businesses: BusinessService::with_table(store.clone(), settings.businesses_table()),
            enrollments: EnrollmentService::with_table(store, settings.enrollments_table()),
        }
    }

    pub fn businesses(&self) -> &BusinessService<S> {
        &self.businesses
    }

    /// 以使用者輸入的方式填寫並送出大使表單，回傳最後的表單狀態
    pub async fn enroll(&self, input: AmbassadorFormData) -> FormState<AmbassadorFormData> {
        let mut form = ambassador_form(self.enrollments.clone());
        form.edit(AmbassadorEdit::FirstName(input.first_name));
        form.edit(AmbassadorEdit::LastName(input.last_name));
        form.edit(AmbassadorEdit::Email(input.email));
        form.edit(AmbassadorEdit::Phone(input.phone));
        form.edit(AmbassadorEdit::Church(input.church));
        for commitment in input.commitments {
            // 重複的承諾不切換第二次
            if !form.state().data().commitments.contains(&commitment) {
                form.edit(AmbassadorEdit::ToggleCommitment(commitment));
            }
        }

        form.submit().await;
        form.close()
    }

    /// 有 place id 且已存在時更新該商家 (表單先預填)，否則新增
    pub async fn register_business(
        &self,
        place_id: Option<String>,
        edits: Vec<BusinessEdit>,
    ) -> Result<FormState<BusinessFormData>> {
        let existing = match place_id.as_deref() {
            Some(place_id) => self.businesses.find_by_place_id(place_id).await?,
            None => None,
        };
        if let Some(business) = &existing {
            tracing::info!("Updating existing business {} for place id", business.id);
        }

        let mut form = business_claim_form(self.businesses.clone(), existing.as_ref(), place_id);
        for edit in edits {
            form.edit(edit);
        }

        form.submit().await;
        Ok(form.close())
    }

    pub async fn lookup(&self, place_id: &str) -> Result<Option<Business>> {
        self.businesses.find_by_place_id(place_id).await
    }

    pub async fn claim(&self, business_id: &str, user_id: &str) -> Result<Business> {
        self.businesses
            .claim(business_id, user_id)
            .await
            .into_result(business_id)
    }
}
