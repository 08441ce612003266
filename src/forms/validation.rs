use crate::domain::model::BusinessFormData;
use crate::forms::ambassador::AmbassadorFormData;
use crate::forms::errors::{FieldError, FormField};

fn require(errors: &mut Vec<FieldError>, field: FormField, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

fn into_result(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// 檢查必填欄位與月費；email / 電話格式不在檢查範圍
pub fn validate_business_form(form: &BusinessFormData) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    require(&mut errors, FormField::FirstName, &form.first_name, "First name is required");
    require(&mut errors, FormField::LastName, &form.last_name, "Last name is required");
    require(
        &mut errors,
        FormField::ContactEmail,
        &form.contact_email,
        "Contact email is required",
    );
    require(
        &mut errors,
        FormField::BusinessName,
        &form.business_name,
        "Business name is required",
    );
    require(
        &mut errors,
        FormField::BusinessAddress,
        &form.business_address,
        "Business address is required",
    );
    require(
        &mut errors,
        FormField::BusinessDescription,
        &form.business_description,
        "Business description is required",
    );
    if !(form.monthly_fee.is_finite() && form.monthly_fee >= 0.0) {
        errors.push(FieldError::new(
            FormField::MonthlyFee,
            "Monthly fee must be a non-negative amount",
        ));
    }
    into_result(errors)
}

pub fn validate_ambassador_form(form: &AmbassadorFormData) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    require(&mut errors, FormField::FirstName, &form.first_name, "First name is required");
    require(&mut errors, FormField::LastName, &form.last_name, "Last name is required");
    require(&mut errors, FormField::Email, &form.email, "Email is required");
    if form.commitments.is_empty() {
        errors.push(FieldError::new(
            FormField::Commitments,
            "Please accept at least one commitment",
        ));
    }
    into_result(errors)
}
