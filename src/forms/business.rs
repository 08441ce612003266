use crate::domain::model::{Business, BusinessFormData, BusinessUpdate, SubscriptionTier};
use crate::domain::ports::RemoteStore;
use crate::forms::controller::{FormController, FormModel, Submitter};
use crate::forms::errors::{FieldError, FormField};
use crate::forms::validation::validate_business_form;
use crate::services::BusinessService;
use crate::utils::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub enum BusinessEdit {
    FirstName(String),
    LastName(String),
    ContactEmail(String),
    Phone(Option<String>),
    Church(Option<String>),
    BusinessName(String),
    BusinessAddress(String),
    Website(Option<String>),
    BusinessDescription(String),
    SubscriptionTier(SubscriptionTier),
    MonthlyFee(f64),
}

impl FormModel for BusinessFormData {
    type Edit = BusinessEdit;

    fn apply(&mut self, edit: BusinessEdit) -> FormField {
        match edit {
            BusinessEdit::FirstName(v) => {
                self.first_name = v;
                FormField::FirstName
            }
            BusinessEdit::LastName(v) => {
                self.last_name = v;
                FormField::LastName
            }
            BusinessEdit::ContactEmail(v) => {
                self.contact_email = v;
                FormField::ContactEmail
            }
            BusinessEdit::Phone(v) => {
                self.phone = v;
                FormField::Phone
            }
            BusinessEdit::Church(v) => {
                self.church = v;
                FormField::Church
            }
            BusinessEdit::BusinessName(v) => {
                self.business_name = v;
                FormField::BusinessName
            }
            BusinessEdit::BusinessAddress(v) => {
                self.business_address = v;
                FormField::BusinessAddress
            }
            BusinessEdit::Website(v) => {
                self.website = v;
                FormField::Website
            }
            BusinessEdit::BusinessDescription(v) => {
                self.business_description = v;
                FormField::BusinessDescription
            }
            BusinessEdit::SubscriptionTier(tier) => {
                self.subscription_tier = tier;
                FormField::SubscriptionTier
            }
            BusinessEdit::MonthlyFee(fee) => {
                self.monthly_fee = fee;
                FormField::MonthlyFee
            }
        }
    }

    fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        validate_business_form(self)
    }
}

/// 既有商家走 update，否則 create
#[derive(Debug, Clone)]
pub struct BusinessWriter<S: RemoteStore> {
    service: BusinessService<S>,
    existing_id: Option<String>,
    place_id: Option<String>,
}

impl<S: RemoteStore> BusinessWriter<S> {
    pub fn service(&self) -> &BusinessService<S> {
        &self.service
    }

    pub fn existing_id(&self) -> Option<&str> {
        self.existing_id.as_deref()
    }
}

#[async_trait]
impl<S: RemoteStore> Submitter<BusinessFormData> for BusinessWriter<S> {
    async fn submit(&self, data: &BusinessFormData) -> Result<()> {
        match &self.existing_id {
            Some(id) => {
                self.service.update(id, &BusinessUpdate::from(data)).await?;
            }
            None => {
                self.service.create(data, self.place_id.as_deref()).await?;
            }
        }
        Ok(())
    }
}

pub type BusinessClaimForm<S> = FormController<BusinessFormData, BusinessWriter<S>>;

/// 建立商家表單；有既有商家時預填其名稱、地址、網站與描述
pub fn business_claim_form<S: RemoteStore>(
    service: BusinessService<S>,
    existing: Option<&Business>,
    place_id: Option<String>,
) -> BusinessClaimForm<S> {
    let data = existing
        .map(BusinessFormData::prefilled_from)
        .unwrap_or_default();
    let writer = BusinessWriter {
        service,
        existing_id: existing.map(|b| b.id.clone()),
        place_id: place_id.or_else(|| existing.and_then(|b| b.place_id.clone())),
    };
    FormController::new(data, writer)
}
