mod new_submission;
mod submitter_email;
mod submitter_name;

pub use new_submission::NewSubmission;
pub use submitter_email::SubmitterEmail;
pub use submitter_name::SubmitterName;
