use chrono::{DateTime, Utc};

use crate::domain::submitter_email::SubmitterEmail;
use crate::domain::submitter_name::SubmitterName;

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub first_name: SubmitterName,
    pub last_name: SubmitterName,
    pub email: SubmitterEmail,
    pub rare_disease: Option<String>,
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
