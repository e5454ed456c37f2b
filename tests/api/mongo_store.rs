use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Client;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use herd_form::configuration::{self, CorsSettings, DatabaseSettings};
use herd_form::domain::NewSubmission;
use herd_form::routes::{SubmissionData, SubmissionReceipt};
use herd_form::store::{MongoSubmissionStore, SubmissionStore};

use crate::helpers::spawn_app;

/// Points at the configured MongoDB but isolates each test in its own database.
fn isolated_settings() -> DatabaseSettings {
    let mut settings = configuration::get_configuration()
        .expect("Failed to read configuration")
        .database;
    settings.database_name = format!("herdForm_test_{}", Uuid::new_v4().simple());
    settings.server_selection_timeout_millis = Some(2_000);
    settings
}

fn ada() -> NewSubmission {
    SubmissionData {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        rare_disease: None,
        message: None,
    }
    .try_into()
    .unwrap()
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn inserted_submission_is_persisted_with_null_optional_fields() {
    let settings = isolated_settings();
    let store = MongoSubmissionStore::connect(&settings).await.unwrap();

    let id = store.insert(&ada()).await.expect("Failed to insert");

    let client = Client::with_uri_str(settings.uri.expose_secret())
        .await
        .unwrap();
    let database = client.database(&settings.database_name);
    let collection = database.collection::<Document>(&settings.collection);

    let oid = ObjectId::parse_str(id.as_ref()).expect("Expected an ObjectId");
    let saved = collection
        .find_one(doc! { "_id": oid }, None)
        .await
        .unwrap()
        .expect("Failed to fetch saved submission");

    assert_eq!(saved.get_str("first_name").unwrap(), "Ada");
    assert_eq!(saved.get_str("last_name").unwrap(), "Lovelace");
    assert_eq!(saved.get_str("email").unwrap(), "ada@example.com");
    assert!(matches!(saved.get("rare_disease"), None | Some(Bson::Null)));
    assert!(matches!(saved.get("message"), None | Some(Bson::Null)));
    assert!(saved.get_datetime("submitted_at").is_ok());
    assert_eq!(collection.count_documents(None, None).await.unwrap(), 1);

    database.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB instance"]
async fn identical_submissions_become_separate_documents() {
    let settings = isolated_settings();
    let store = MongoSubmissionStore::connect(&settings).await.unwrap();

    let first = store.insert(&ada()).await.unwrap();
    let second = store.insert(&ada()).await.unwrap();

    assert_ne!(first, second);

    let client = Client::with_uri_str(settings.uri.expose_secret())
        .await
        .unwrap();
    let database = client.database(&settings.database_name);
    let count = database
        .collection::<Document>(&settings.collection)
        .count_documents(None, None)
        .await
        .unwrap();
    assert_eq!(count, 2);

    database.drop(None).await.unwrap();
}

#[tokio::test]
async fn unreachable_database_yields_500_and_no_id() {
    let settings = DatabaseSettings {
        uri: Secret::new("mongodb://127.0.0.1:1/?directConnection=true".to_string()),
        database_name: "herdForm".into(),
        collection: "formData".into(),
        server_selection_timeout_millis: Some(300),
    };
    let store = MongoSubmissionStore::connect(&settings)
        .await
        .expect("Building a client must not require a reachable server");
    let address = spawn_app(store, &CorsSettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/submit/", address))
        .json(&serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("id").is_none());
    assert!(serde_json::from_value::<SubmissionReceipt>(body).is_err());
}
