pub mod ambassador;
pub mod business;
pub mod controller;
pub mod errors;
pub mod validation;

pub use ambassador::{ambassador_form, AmbassadorEdit, AmbassadorForm, AmbassadorFormData};
pub use business::{business_claim_form, BusinessClaimForm, BusinessEdit, BusinessWriter};
pub use controller::{Effect, FormAction, FormController, FormModel, FormState, Phase, Submitter, View};
pub use errors::{FieldError, FormErrors, FormField};
