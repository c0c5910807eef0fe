//! End-to-end walkthrough of the SendPigeon client.
//!
//! Run with a real key:
//! `SENDPIGEON_API_KEY=sp_live_... cargo run --example demo`

use sendpigeon::{Client, CreateTemplateRequest, SendEmailRequest, SendOptions};

#[tokio::main]
async fn main() -> Result<(), sendpigeon::Error> {
    let api_key =
        std::env::var("SENDPIGEON_API_KEY").unwrap_or_else(|_| "sp_test_demo".to_string());
    let client = Client::new(api_key)?;

    // Sending requires a verified domain.
    for item in client.domains().list().await? {
        println!("domain {} is {:?}", item.domain.name, item.domain.status);
    }

    let template = client
        .templates()
        .create(&CreateTemplateRequest {
            name: "welcome-email".to_string(),
            subject: "Welcome {{name}}!".to_string(),
            html: Some("<p>Hello {{name}}</p>".to_string()),
            ..Default::default()
        })
        .await?;
    println!("created template {}", template.id);

    let response = client
        .send_with_options(
            &SendEmailRequest {
                from: "Acme <hello@acme.com>".to_string(),
                to: "user@example.com".into(),
                template_id: Some(template.id.clone()),
                variables: Some([("name".to_string(), "Ada".to_string())].into()),
                ..Default::default()
            },
            &SendOptions {
                idempotency_key: Some("demo-1".to_string()),
            },
        )
        .await?;
    println!("sent {} ({:?})", response.id, response.status);

    client.templates().delete(&template.id).await?;
    Ok(())
}
