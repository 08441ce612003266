pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod forms;
pub mod services;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{MemoryStore, RestStore};
pub use app::FormsApp;
pub use config::{EnvConfig, TomlConfig};
pub use domain::model::{
    AmbassadorEnrollment, Business, BusinessFormData, BusinessUpdate, ClaimOutcome, Commitment,
    SubscriptionTier,
};
pub use domain::ports::{Filter, RemoteStore, StoreSettings};
pub use services::{normalize_website, BusinessService, EnrollmentService};
pub use utils::error::{FormsError, Result};
