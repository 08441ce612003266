use crate::domain::model::{AmbassadorEnrollment, Commitment};
use crate::domain::ports::RemoteStore;
use crate::forms::controller::{FormController, FormModel, Submitter};
use crate::forms::errors::{FieldError, FormField};
use crate::forms::validation::validate_ambassador_form;
use crate::services::EnrollmentService;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 大使表單的輸入值 (尚未轉成報名紀錄)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AmbassadorFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub church: String,
    pub commitments: Vec<Commitment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AmbassadorEdit {
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    Church(String),
    ToggleCommitment(Commitment),
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl AmbassadorFormData {
    pub fn to_enrollment(&self) -> AmbassadorEnrollment {
        AmbassadorEnrollment {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: non_blank(&self.phone),
            church: non_blank(&self.church),
            commitments: self.commitments.clone(),
        }
    }
}

impl FormModel for AmbassadorFormData {
    type Edit = AmbassadorEdit;

    fn apply(&mut self, edit: AmbassadorEdit) -> FormField {
        match edit {
            AmbassadorEdit::FirstName(v) => {
                self.first_name = v;
                FormField::FirstName
            }
            AmbassadorEdit::LastName(v) => {
                self.last_name = v;
                FormField::LastName
            }
            AmbassadorEdit::Email(v) => {
                self.email = v;
                FormField::Email
            }
            AmbassadorEdit::Phone(v) => {
                self.phone = v;
                FormField::Phone
            }
            AmbassadorEdit::Church(v) => {
                self.church = v;
                FormField::Church
            }
            AmbassadorEdit::ToggleCommitment(commitment) => {
                if let Some(pos) = self.commitments.iter().position(|c| *c == commitment) {
                    self.commitments.remove(pos);
                } else {
                    self.commitments.push(commitment);
                }
                FormField::Commitments
            }
        }
    }

    fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        validate_ambassador_form(self)
    }
}

#[async_trait]
impl<S: RemoteStore> Submitter<AmbassadorFormData> for EnrollmentService<S> {
    async fn submit(&self, data: &AmbassadorFormData) -> Result<()> {
        self.create_ambassador_enrollment(&data.to_enrollment())
            .await
            .map(|_| ())
    }
}

pub type AmbassadorForm<S> = FormController<AmbassadorFormData, EnrollmentService<S>>;

/// 空白的大使報名表單
pub fn ambassador_form<S: RemoteStore>(service: EnrollmentService<S>) -> AmbassadorForm<S> {
    FormController::new(AmbassadorFormData::default(), service)
}
