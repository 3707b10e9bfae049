// Business logic behind the HTTP routes

mod submission;

pub use submission::{SubmissionService, SubmitError, SubmitForm};
