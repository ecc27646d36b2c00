use mackerel_client::{Channel, ChannelValue, Client, Error, Mentions, NewChannel};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "dummy-key";

async fn test_client(server: &MockServer) -> Client {
    Client::with_base_url(API_KEY, &server.uri()).unwrap()
}

fn slack_channel_body() -> serde_json::Value {
    json!({
        "id": "abcdefabc",
        "name": "slack channel",
        "type": "slack",
        "url": "https://hooks.slack.com/services/TAAAA/BBBB/XXXXX",
        "mentions": {"ok": "ok message", "warning": "warning message"},
        "enabledGraphImage": true,
        "events": ["alert"],
    })
}

fn assert_slack_fixture(channel: &Channel) {
    assert_eq!(channel.id, "abcdefabc");
    assert_eq!(channel.name, "slack channel");
    let ChannelValue::Slack {
        url,
        mentions,
        enabled_graph_image,
        events,
    } = &channel.value
    else {
        panic!("expected slack variant, got {:?}", channel.value);
    };
    assert_eq!(url, "https://hooks.slack.com/services/TAAAA/BBBB/XXXXX");
    assert_eq!(
        *mentions,
        Mentions {
            ok: "ok message".to_string(),
            warning: "warning message".to_string(),
            critical: String::new(),
        }
    );
    assert!(*enabled_graph_image);
    assert_eq!(*events, ["alert"]);
}

#[tokio::test]
async fn list_channels_decodes_heterogeneous_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/channels"))
        .and(header("X-Api-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "channels": [
                {
                    "id": "abcdefabc",
                    "name": "email channel",
                    "type": "email",
                    "emails": ["test@example.com", "test2@example.com"],
                    "userIds": ["1234", "2345"],
                    "events": ["alert"],
                },
                slack_channel_body(),
                {
                    "id": "cdefabcde",
                    "name": "webhook channel",
                    "type": "webhook",
                    "url": "http://example.com/webhook",
                    "events": ["alert"],
                },
                {
                    "id": "defabcdef",
                    "name": "line channel",
                    "type": "line",
                },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let channels = test_client(&server).await.list_channels().await.unwrap();

    assert_eq!(channels.len(), 4);
    assert_eq!(
        channels[0].value.emails(),
        ["test@example.com", "test2@example.com"]
    );
    assert_eq!(channels[0].value.user_ids(), ["1234", "2345"]);
    assert_eq!(channels[0].value.url(), "");
    assert_eq!(
        channels[1].value.url(),
        "https://hooks.slack.com/services/TAAAA/BBBB/XXXXX"
    );
    assert_eq!(channels[2].value.url(), "http://example.com/webhook");
    assert_eq!(channels[3].value, ChannelValue::Line);
    assert_eq!(channels[3].value.url(), "");
}

#[tokio::test]
async fn create_channel_posts_only_variant_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/channels"))
        .and(header("X-Api-Key", API_KEY))
        .and(body_json(json!({
            "name": "slack channel",
            "type": "slack",
            "url": "https://hooks.slack.com/services/TAAAA/BBBB/XXXXX",
            "mentions": {"ok": "ok message", "warning": "warning message"},
            "enabledGraphImage": true,
            "events": ["alert"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(slack_channel_body()))
        .expect(1)
        .mount(&server)
        .await;

    let channel = test_client(&server)
        .await
        .create_channel(&NewChannel {
            name: "slack channel".to_string(),
            value: ChannelValue::Slack {
                url: "https://hooks.slack.com/services/TAAAA/BBBB/XXXXX".to_string(),
                mentions: Mentions {
                    ok: "ok message".to_string(),
                    warning: "warning message".to_string(),
                    critical: String::new(),
                },
                enabled_graph_image: true,
                events: vec!["alert".to_string()],
            },
        })
        .await
        .unwrap();

    assert_slack_fixture(&channel);
}

#[tokio::test]
async fn delete_channel_echoes_the_deleted_record() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v0/channels/abcdefabc"))
        .and(header("X-Api-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(slack_channel_body()))
        .expect(1)
        .mount(&server)
        .await;

    let channel = test_client(&server)
        .await
        .delete_channel("abcdefabc")
        .await
        .unwrap();

    assert_slack_fixture(&channel);
}

#[tokio::test]
async fn non_2xx_response_surfaces_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v0/channels/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": {"message": "channel not found"}})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .await
        .delete_channel("missing")
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "channel not found");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_response_body_surfaces_as_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"channels": [{"id""#))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .await
        .list_channels()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}
