use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use mongodb::bson::{self, Bson};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::configuration::DatabaseSettings;
use crate::domain::NewSubmission;
use crate::store::{SubmissionId, SubmissionStore};

#[derive(Debug, Serialize)]
struct SubmissionDocument {
    first_name: String,
    last_name: String,
    email: String,
    rare_disease: Option<String>,
    message: Option<String>,
    submitted_at: bson::DateTime,
}

impl From<&NewSubmission> for SubmissionDocument {
    fn from(submission: &NewSubmission) -> Self {
        Self {
            first_name: submission.first_name.as_ref().to_owned(),
            last_name: submission.last_name.as_ref().to_owned(),
            email: submission.email.as_ref().to_owned(),
            rare_disease: submission.rare_disease.clone(),
            message: submission.message.clone(),
            submitted_at: bson::DateTime::from_millis(submission.submitted_at.timestamp_millis()),
        }
    }
}

#[derive(Clone)]
pub struct MongoSubmissionStore {
    collection: Collection<SubmissionDocument>,
}

impl MongoSubmissionStore {
    /// Builds the client handle. No connection is opened until the first insert.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, anyhow::Error> {
        let mut options = ClientOptions::parse(settings.uri.expose_secret())
            .await
            .context("Failed to parse the MongoDB connection string")?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        if let Some(millis) = settings.server_selection_timeout_millis {
            options.server_selection_timeout = Some(Duration::from_millis(millis));
        }

        let client = Client::with_options(options).context("Failed to build a MongoDB client")?;
        let collection = client
            .database(&settings.database_name)
            .collection(&settings.collection);

        Ok(Self { collection })
    }
}

#[async_trait]
impl SubmissionStore for MongoSubmissionStore {
    #[tracing::instrument(name = "Saving new submission in MongoDB", skip(self, submission))]
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionId, anyhow::Error> {
        let document = SubmissionDocument::from(submission);

        let result = self
            .collection
            .insert_one(&document, None)
            .await
            .context("Failed to insert the submission document")?;

        Ok(render_id(result.inserted_id))
    }
}

fn render_id(id: Bson) -> SubmissionId {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
    .into()
}
