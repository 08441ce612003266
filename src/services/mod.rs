pub mod businesses;
pub mod enrollments;

pub use businesses::{normalize_website, BusinessService};
pub use enrollments::EnrollmentService;
