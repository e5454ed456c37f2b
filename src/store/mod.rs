use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::NewSubmission;

mod mongo;

pub use mongo::MongoSubmissionStore;

/// Identifier assigned by the store on insert. Treated as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionId(String);

impl From<String> for SubmissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SubmissionId> for String {
    fn from(id: SubmissionId) -> Self {
        id.0
    }
}

/// Append-only sink for submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionId, anyhow::Error>;
}

pub type SharedStore = Arc<dyn SubmissionStore>;
