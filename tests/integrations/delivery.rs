//! End-to-end delivery tests: config through dispatcher, retry, and the real
//! HTTP transport against a mock Bot API server.

use anyhow::Result;
use std::sync::Arc;
use telelog::{Config, EventNotifier, Metadata, Severity};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::CollectingDiagnostics;

#[tokio::test]
async fn delivers_rendered_event_to_the_endpoint() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let toml = format!(
        r#"
        environment = "production"

        [[destinations]]
        kind = "telegram"
        bot_token = "123:abc"
        chat_id = "-1001"
        api_url = "{}"
        max_attempts = 1
        "#,
        server.uri()
    );
    let config = Config::from_toml_str(&toml)?;
    let diagnostics = Arc::new(CollectingDiagnostics::default());
    let dispatcher = EventNotifier::from_config(&config, diagnostics.clone())?;

    // Act
    let metadata = Metadata::from_iter([("u", 1_i64)]);
    dispatcher.deliver("hi", Severity::Error, metadata).await;

    // Assert
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body["chat_id"], "-1001");
    assert_eq!(body["parse_mode"], "HTML");

    let text = body["text"].as_str().unwrap();
    assert!(text.starts_with("❌ [ERROR] "), "payload was: {text}");
    assert!(text.contains("*METADATA*\n*u*: 1"));
    assert!(text.ends_with("\n\nhi"));

    assert!(diagnostics.errors().is_empty());
    assert!(diagnostics.notices().is_empty());
    Ok(())
}

#[tokio::test]
async fn failing_destination_does_not_block_the_healthy_one() -> Result<()> {
    // Arrange: two destinations on one mock server, told apart by bot token.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botgood:token/sendMessage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/botbad:token/sendMessage"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let toml = format!(
        r#"
        environment = "production"

        [[destinations]]
        kind = "telegram"
        bot_token = "good:token"
        chat_id = "1"
        api_url = "{uri}"
        max_attempts = 1

        [[destinations]]
        kind = "telegram"
        bot_token = "bad:token"
        chat_id = "2"
        api_url = "{uri}"
        max_attempts = 1
        "#,
        uri = server.uri()
    );
    let config = Config::from_toml_str(&toml)?;
    let diagnostics = Arc::new(CollectingDiagnostics::default());
    let dispatcher = EventNotifier::from_config(&config, diagnostics.clone())?;

    // Act
    dispatcher
        .deliver("mixed fleet", Severity::Warn, Metadata::new())
        .await;

    // Assert: both endpoints were attempted, and only the aggregate failure
    // shows up on the side channel.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(diagnostics.errors(), ["1 of 2 deliveries failed"]);
    Ok(())
}

#[tokio::test]
async fn empty_message_with_metadata_still_reaches_the_endpoint() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let toml = format!(
        r#"
        environment = "production"

        [[destinations]]
        kind = "telegram"
        bot_token = "123:abc"
        chat_id = "-1001"
        api_url = "{}"
        max_attempts = 1
        "#,
        server.uri()
    );
    let config = Config::from_toml_str(&toml)?;
    let dispatcher =
        EventNotifier::from_config(&config, Arc::new(CollectingDiagnostics::default()))?;

    // Act
    let metadata = Metadata::from_iter([("event", "heartbeat")]);
    dispatcher.deliver("", Severity::Info, metadata).await;

    // Assert
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    let text = body["text"].as_str().unwrap();
    assert!(text.contains("*event*: heartbeat"));
    assert!(text.ends_with("\n\n"), "message section should be empty: {text:?}");
    Ok(())
}

#[tokio::test]
async fn shape_check_failure_makes_no_network_calls() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let toml = format!(
        r#"
        environment = "production"

        [[destinations]]
        kind = "telegram"
        bot_token = "123:abc"
        chat_id = "-1001"
        api_url = "{}"
        "#,
        server.uri()
    );
    let config = Config::from_toml_str(&toml)?;
    let diagnostics = Arc::new(CollectingDiagnostics::default());
    let dispatcher = EventNotifier::from_config(&config, diagnostics.clone())?;

    // Act
    dispatcher.deliver("", Severity::Error, Metadata::new()).await;

    // Assert
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(diagnostics.warnings().len(), 1);
    Ok(())
}
