//! Tests for the template management surface.

use httpmock::prelude::*;
use httpmock::Method::PATCH;
use sendpigeon::{Client, CreateTemplateRequest, UpdateTemplateRequest};
use serde_json::json;

fn client_for(server: &MockServer) -> Client {
    Client::builder("test-key")
        .base_url(server.base_url())
        .build()
        .expect("client should build")
}

fn template_json() -> serde_json::Value {
    json!({
        "id": "tpl_abc123",
        "name": "welcome-email",
        "subject": "Welcome {{name}}!",
        "html": "<p>Hello {{name}}</p>",
        "text": null,
        "variables": ["name"],
        "domain": null,
        "createdAt": "2024-01-15T10:30:00Z",
        "updatedAt": "2024-01-15T10:30:00Z",
    })
}

#[tokio::test]
async fn list_gets_all_templates() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/templates")
                .header("authorization", "Bearer test-key")
                .header("content-type", "application/json");
            then.status(200).json_body(json!([template_json()]));
        })
        .await;

    let client = client_for(&server);
    let templates = client.templates().list().await.expect("list should succeed");

    mock.assert_async().await;
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].id, "tpl_abc123");
    assert_eq!(templates[0].variables, vec!["name".to_string()]);
    assert_eq!(templates[0].text, None);
    assert_eq!(templates[0].domain, None);
}

#[tokio::test]
async fn create_posts_template_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/templates").json_body(json!({
                "name": "welcome-email",
                "subject": "Welcome {{name}}!",
                "html": "<p>Hello {{name}}</p>",
            }));
            then.status(201).json_body(template_json());
        })
        .await;

    let client = client_for(&server);
    let created = client
        .templates()
        .create(&CreateTemplateRequest {
            name: "welcome-email".to_string(),
            subject: "Welcome {{name}}!".to_string(),
            html: Some("<p>Hello {{name}}</p>".to_string()),
            ..Default::default()
        })
        .await
        .expect("create should succeed");

    mock.assert_async().await;
    assert_eq!(created.name, "welcome-email");
}

#[tokio::test]
async fn get_fetches_template_by_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/templates/tpl_abc123");
            then.status(200).json_body(template_json());
        })
        .await;

    let client = client_for(&server);
    let template = client
        .templates()
        .get("tpl_abc123")
        .await
        .expect("get should succeed");

    mock.assert_async().await;
    assert_eq!(template.subject, "Welcome {{name}}!");
}

#[tokio::test]
async fn update_patches_only_provided_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/v1/templates/tpl_abc123")
                .json_body(json!({"subject": "Updated subject"}));
            then.status(200).json_body(json!({
                "id": "tpl_abc123",
                "name": "welcome-email",
                "subject": "Updated subject",
                "html": "<p>Hello {{name}}</p>",
                "text": null,
                "variables": ["name"],
                "domain": null,
                "createdAt": "2024-01-15T10:30:00Z",
                "updatedAt": "2024-02-01T09:00:00Z",
            }));
        })
        .await;

    let client = client_for(&server);
    let updated = client
        .templates()
        .update(
            "tpl_abc123",
            &UpdateTemplateRequest {
                subject: Some("Updated subject".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update should succeed");

    mock.assert_async().await;
    assert_eq!(updated.subject, "Updated subject");
}

#[tokio::test]
async fn delete_returns_unit_on_204() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1/templates/tpl_abc123");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    client
        .templates()
        .delete("tpl_abc123")
        .await
        .expect("delete should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn delete_ignores_any_success_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1/templates/tpl_abc123");
            then.status(200).body("unexpected body");
        })
        .await;

    let client = client_for(&server);
    client
        .templates()
        .delete("tpl_abc123")
        .await
        .expect("delete should ignore the body");
}

#[tokio::test]
async fn get_surfaces_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/templates/nonexistent");
            then.status(404).json_body(json!({"message": "Template not found"}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .templates()
        .get("nonexistent")
        .await
        .expect_err("404 should be an error");

    assert_eq!(err.code(), "api_error");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Template not found");
}
