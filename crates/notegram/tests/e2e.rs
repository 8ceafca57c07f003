// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete notegram pipeline.
//!
//! Each test loads a configuration from TOML, reads a note from an in-memory
//! vault and delivers it through a scripted transport. Tests are independent
//! and order-insensitive.

use futures::future::join_all;
use notegram_core::traits::DocumentSource;
use notegram_core::types::{DeliveryState, Document};
use notegram_telegram::{ApiSettings, DeliveryOrchestrator};
use notegram_test_utils::{MockTransport, MockVault, fixtures};

const CONFIG: &str = r#"
[telegram]
api_base_url = "http://bot-api.local/"
disable_link_preview = false

[[bots]]
id = "personal"
token = "111:aaa"
chat_id = "10"

[[bots]]
id = "team"
name = "Team channel"
token = "222:bbb"
chat_id = "@team"
"#;

async fn vault_with(reference: &str, document: Document) -> MockVault {
    let vault = MockVault::new();
    vault.insert(reference, document).await;
    vault
}

// ---- Test 1: Note with media to one bot ----

#[tokio::test]
async fn note_with_media_reaches_configured_chat() {
    let config = notegram_config::load_and_validate_str(CONFIG).unwrap();
    let settings = ApiSettings::from(&config.telegram);
    let target = &config.targets()[1];

    let vault = vault_with(
        "Trip.md",
        Document {
            title: "Trip (day 1)".into(),
            body: "Arrived! ![[beach.jpg]]\nSee [map](https://maps.example/x?a=1).".into(),
            attachments: vec![fixtures::attachment("beach.jpg"), fixtures::attachment("clip.mp4")],
        },
    )
    .await;
    let transport = MockTransport::new();

    let document = vault.load("Trip.md").await.unwrap();
    let mut orchestrator = DeliveryOrchestrator::new(&transport, &settings, target);
    orchestrator.deliver(document).await.unwrap();

    assert_eq!(orchestrator.state(), DeliveryState::Succeeded);
    let requests = transport.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://bot-api.local/bot222:bbb/sendMediaGroup");
    assert_eq!(requests[0].field("chat_id").as_deref(), Some("@team"));

    let media: serde_json::Value =
        serde_json::from_str(&requests[0].field("media").unwrap()).unwrap();
    assert_eq!(
        media[0]["caption"],
        "*Trip \\(day 1\\)*\n\nArrived\\! \nSee [map](https://maps.example/x?a=1)\\."
    );
}

// ---- Test 2: Concurrent sends to every bot ----

#[tokio::test]
async fn all_bots_receive_the_note_independently() {
    let config = notegram_config::load_and_validate_str(CONFIG).unwrap();
    let settings = ApiSettings::from(&config.telegram);
    let targets = config.enabled_targets();
    let transport = MockTransport::new();
    let document = Document {
        title: "Status".into(),
        body: "All good.".into(),
        attachments: Vec::new(),
    };

    let results = join_all(targets.iter().map(|target| {
        let document = document.clone();
        let transport = &transport;
        let settings = &settings;
        async move {
            DeliveryOrchestrator::new(transport, settings, target)
                .deliver(document)
                .await
        }
    }))
    .await;

    assert!(results.iter().all(Result::is_ok));
    let mut urls: Vec<String> = transport.requests().await.into_iter().map(|r| r.url).collect();
    urls.sort();
    assert_eq!(
        urls,
        [
            "http://bot-api.local/bot111:aaa/sendMessage",
            "http://bot-api.local/bot222:bbb/sendMessage",
        ]
    );
}

// ---- Test 3: Disabled bots ----

#[tokio::test]
async fn disabled_bot_from_config_is_never_contacted() {
    let toml = format!("{CONFIG}\n[[bots]]\nid = \"old\"\ntoken = \"333:ccc\"\nchat_id = \"30\"\nenabled = false\n");
    let config = notegram_config::load_and_validate_str(&toml).unwrap();
    let settings = ApiSettings::from(&config.telegram);
    let transport = MockTransport::new();

    assert_eq!(config.enabled_targets().len(), 2);
    let disabled = config.targets().into_iter().find(|t| t.id == "old").unwrap();

    let err = DeliveryOrchestrator::new(&transport, &settings, &disabled)
        .deliver(Document::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("disabled"));
    assert_eq!(transport.request_count().await, 0);
}
