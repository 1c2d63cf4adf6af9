//! Black-box tests against a spawned application.
//!
//! These talk to the MongoDB instance at MONGODB_URI (localhost by default)
//! and are ignored unless one is available.

mod common;

use catalog_service::models::{Document, DocumentOrigin, DocumentType};
use chrono::{DateTime, Utc};
use common::TestApp;
use reqwest::multipart;
use reqwest::StatusCode;
use serde_json::Value;

fn fixture(name: &str, tribute: &str) -> Document {
    Document::new(
        name.to_string(),
        DocumentOrigin::Internal,
        DocumentType::Contract,
        "Acme Ltda".to_string(),
        tribute.to_string(),
        "R$ 1.000,00".to_string(),
        "/files/fixture.pdf".to_string(),
        1024,
    )
}

async fn list(app: &TestApp, query: &[(&str, &str)]) -> Value {
    let response = reqwest::Client::new()
        .get(format!("{}/api/documents", app.address))
        .query(query)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::OK, response.status());
    response.json().await.expect("Failed to parse JSON")
}

#[tokio::test]
#[ignore = "requires a local MongoDB replica set"]
async fn empty_unfiltered_store_is_seeded_exactly_once() {
    let app = TestApp::spawn().await;

    let body = list(&app, &[]).await;
    assert_eq!(body["totalDocuments"], 2);
    assert_eq!(body["documents"].as_array().unwrap().len(), 2);

    // A second identical query must not seed again.
    let body = list(&app, &[]).await;
    assert_eq!(body["totalDocuments"], 2);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn tribute_value_filter_is_a_substring_match() {
    let app = TestApp::spawn().await;
    for (name, tribute) in [
        ("exact", "R$ 200,00"),
        ("thousands", "R$ 1.200,00"),
        ("other", "R$ 50,00"),
    ] {
        app.repo.insert(&fixture(name, tribute)).await.unwrap();
    }

    let body = list(&app, &[("tributeValue", "200")]).await;
    assert_eq!(body["totalDocuments"], 2);
    for doc in body["documents"].as_array().unwrap() {
        assert!(doc["tributeValue"].as_str().unwrap().contains("200"));
    }

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn date_filter_is_a_half_open_day_window() {
    let app = TestApp::spawn().await;

    let stamps = [
        ("before", "2024-04-11T23:59:59Z"),
        ("start", "2024-04-12T00:00:00Z"),
        ("during", "2024-04-12T15:30:00Z"),
        ("next-day", "2024-04-13T00:00:00Z"),
    ];
    for (name, stamp) in stamps {
        let mut doc = fixture(name, "R$ 10,00");
        let at: DateTime<Utc> = stamp.parse().unwrap();
        doc.created_at = at;
        doc.updated_at = at;
        app.repo.insert(&doc).await.unwrap();
    }

    let body = list(&app, &[("date", "2024-04-12")]).await;
    let names: Vec<&str> = body["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(body["totalDocuments"], 2);
    assert!(names.contains(&"start"));
    assert!(names.contains(&"during"));

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn hygiene_clause_excludes_records_with_empty_fields() {
    let app = TestApp::spawn().await;

    app.repo.insert(&fixture("valid", "R$ 10,00")).await.unwrap();
    let mut broken = fixture("broken", "R$ 10,00");
    broken.origin = String::new();
    app.repo.insert(&broken).await.unwrap();

    let body = list(&app, &[]).await;
    assert_eq!(body["totalDocuments"], 1);
    assert_eq!(body["documents"][0]["name"], "valid");

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn total_pages_reflect_the_filtered_set() {
    let app = TestApp::spawn().await;
    for i in 0..15 {
        app.repo
            .insert(&fixture(&format!("doc-{:02}", i), "R$ 10,00"))
            .await
            .unwrap();
    }

    let body = list(&app, &[]).await;
    assert_eq!(body["totalDocuments"], 15);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["documents"].as_array().unwrap().len(), 10);

    let body = list(&app, &[("page", "2")]).await;
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["documents"].as_array().unwrap().len(), 5);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn upload_document_works() {
    let app = TestApp::spawn().await;

    let metadata = serde_json::json!({
        "name": "Service Agreement",
        "origin": "internal",
        "type": "contract",
        "emitter": "Acme Ltda",
        "tributeValue": "R$ 500,00",
        "liquidValue": "R$ 5.000,00",
    });
    let form = multipart::Form::new()
        .text("metadata", metadata.to_string())
        .part(
            "file",
            multipart::Part::bytes(vec![0; 100])
                .file_name("agreement.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );

    let response = reqwest::Client::new()
        .post(format!("{}/api/documents", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::CREATED, response.status());
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["name"], "Service Agreement");
    assert_eq!(body["fileSize"], 100);
    assert!(body["fileUrl"].as_str().unwrap().starts_with("/files/"));

    // The record must be queryable afterwards.
    let listed = list(&app, &[("search", "Agreement")]).await;
    assert_eq!(listed["totalDocuments"], 1);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn upload_accepts_files_up_to_the_documented_cap() {
    let app = TestApp::spawn().await;

    // Above axum's default body limit, below the 10 MB cap.
    let three_mb = 3 * 1024 * 1024;
    let metadata = serde_json::json!({
        "name": "Large Contract",
        "origin": "internal",
        "type": "contract",
        "emitter": "Acme Ltda",
        "tributeValue": "R$ 500,00",
        "liquidValue": "R$ 5.000,00",
    });
    let form = multipart::Form::new()
        .text("metadata", metadata.to_string())
        .part(
            "file",
            multipart::Part::bytes(vec![0; three_mb])
                .file_name("large.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );

    let response = reqwest::Client::new()
        .post(format!("{}/api/documents", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::CREATED, response.status());
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["fileSize"], three_mb);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn upload_above_the_cap_is_rejected() {
    let app = TestApp::spawn().await;

    let metadata = serde_json::json!({
        "name": "Oversized",
        "origin": "internal",
        "type": "contract",
        "emitter": "Acme Ltda",
        "tributeValue": "R$ 1,00",
        "liquidValue": "R$ 1,00",
    });
    let form = multipart::Form::new()
        .text("metadata", metadata.to_string())
        .part(
            "file",
            multipart::Part::bytes(vec![0; 10 * 1024 * 1024 + 1])
                .file_name("oversized.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );

    let response = reqwest::Client::new()
        .post(format!("{}/api/documents", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn upload_with_out_of_domain_origin_is_rejected() {
    let app = TestApp::spawn().await;

    let metadata = serde_json::json!({
        "name": "Bad",
        "origin": "somewhere",
        "type": "contract",
        "emitter": "Acme",
        "tributeValue": "R$ 1,00",
        "liquidValue": "R$ 1,00",
    });
    let form = multipart::Form::new()
        .text("metadata", metadata.to_string())
        .part(
            "file",
            multipart::Part::bytes(vec![0; 10])
                .file_name("bad.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );

    let response = reqwest::Client::new()
        .post(format!("{}/api/documents", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().is_some());

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn delete_removes_the_record_from_subsequent_pages() {
    let app = TestApp::spawn().await;
    let victim = fixture("victim", "R$ 10,00");
    app.repo.insert(&victim).await.unwrap();
    app.repo.insert(&fixture("survivor", "R$ 10,00")).await.unwrap();

    let response = reqwest::Client::new()
        .delete(format!("{}/api/documents", app.address))
        .query(&[("id", victim.id.as_str())])
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(StatusCode::OK, response.status());

    let body = list(&app, &[]).await;
    assert_eq!(body["totalDocuments"], 1);
    assert!(body["documents"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["id"] != victim.id.as_str()));

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a local MongoDB"]
async fn delete_without_id_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .delete(format!("{}/api/documents", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing document id");

    app.cleanup().await;
}
