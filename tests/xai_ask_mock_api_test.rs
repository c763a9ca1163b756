//! Ask pipeline against a mocked xAI chat-completions endpoint.
//!
//! Response bodies follow the OpenAI-compatible format documented at
//! https://docs.x.ai/docs/api-reference

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use brains_xai::{
    AskRequest, AtomError, BrainAtom, Brief, CancellationToken, JsonSchemaOutput, TypedOutput,
    XaiConfig, XaiHttpClient, content_schema,
};
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, body_string_contains, header, method, path},
};

fn chat_response(id: &str, content: &str, usage: Value) -> Value {
    json!({
        "id": id,
        "object": "chat.completion",
        "created": 1677652288,
        "model": "grok-code-fast-1",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "logprobs": null,
                "finish_reason": "stop"
            }
        ],
        "usage": usage,
        "system_fingerprint": "fp_44709d6fcb"
    })
}

fn error_response() -> Value {
    json!({
        "error": {
            "message": "Invalid model specified",
            "type": "invalid_request_error",
            "code": "model_not_found"
        }
    })
}

fn atom_for(server: &MockServer, slug: &str) -> BrainAtom {
    let config = XaiConfig::new("test-api-key").with_base_url(format!("{}/v1", server.uri()));
    BrainAtom::from_slug(slug)
        .unwrap()
        .with_xai_config(config)
        .unwrap()
}

async fn sent_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn test_ask_sends_strict_schema_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "grok-code-fast-1",
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": "response", "strict": true }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-123",
            r#"{"content":"hello world"}"#,
            json!({ "prompt_tokens": 1000, "completion_tokens": 500, "total_tokens": 1500 }),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let result = atom_for(&mock_server, "xai/grok/code-fast-1")
        .ask(AskRequest::new("respond with exactly: hello world"), &schema)
        .await
        .unwrap();

    assert_eq!(result.output["content"], "hello world");
    assert_eq!(result.episode.len(), 1);
    assert_eq!(result.episode.exid.as_deref(), Some("chatcmpl-123"));
    assert!(result.series.is_none());

    let tokens = result.metrics.size.tokens;
    assert_eq!(tokens.input, 1000);
    assert_eq!(tokens.output, 500);
    assert_eq!(tokens.cache.get, 0);
    assert_eq!(tokens.cache.set, 0);

    let cash = result.metrics.cost.cash;
    assert_eq!(cash.deets.input.amount(), dec!(0.0002));
    assert_eq!(cash.deets.output.amount(), dec!(0.00075));
    assert_eq!(cash.total.amount(), dec!(0.00095));

    let bodies = sent_bodies(&mock_server).await;
    assert_eq!(bodies[0]["response_format"]["json_schema"]["schema"], content_schema());
    assert_eq!(
        bodies[0]["messages"],
        json!([{ "role": "user", "content": "respond with exactly: hello world" }])
    );
}

#[tokio::test]
async fn test_cached_tokens_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-cache",
            r#"{"content":"ok"}"#,
            json!({
                "prompt_tokens": 1000,
                "completion_tokens": 0,
                "total_tokens": 1000,
                "prompt_tokens_details": { "cached_tokens": 400 }
            }),
        )))
        .mount(&mock_server)
        .await;

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let result = atom_for(&mock_server, "xai/grok/code-fast-1")
        .ask(AskRequest::new("hi"), &schema)
        .await
        .unwrap();

    assert_eq!(result.metrics.size.tokens.cache.get, 400);
    assert_eq!(result.metrics.cost.cash.deets.cache.get.amount(), dec!(0.000008));
    assert_eq!(result.metrics.cost.cash.total.amount(), dec!(0.000128));
}

#[tokio::test]
async fn test_episode_continuation_replays_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("what was the code?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-2",
            r#"{"content":"PAPAYA99"}"#,
            json!({ "prompt_tokens": 40, "completion_tokens": 8 }),
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-1",
            r#"{"content":"noted"}"#,
            json!({ "prompt_tokens": 20, "completion_tokens": 5 }),
        )))
        .mount(&mock_server)
        .await;

    let atom = atom_for(&mock_server, "xai/grok/3");
    let schema = JsonSchemaOutput::new(content_schema()).unwrap();

    let first = atom
        .ask(AskRequest::new("remember PAPAYA99"), &schema)
        .await
        .unwrap();
    assert_eq!(first.output["content"], "noted");
    assert_eq!(first.episode.exchanges.len(), 1);

    let second = atom
        .ask(
            AskRequest::new("what was the code?").on_episode(first.episode.clone()),
            &schema,
        )
        .await
        .unwrap();
    assert_eq!(second.output["content"], "PAPAYA99");
    assert_eq!(second.episode.exchanges.len(), 2);
    assert_ne!(first.episode.hash, second.episode.hash);

    let bodies = sent_bodies(&mock_server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1]["model"], "grok-3-beta");
    assert_eq!(
        bodies[1]["messages"],
        json!([
            { "role": "user", "content": "remember PAPAYA99" },
            { "role": "assistant", "content": "{\"content\":\"noted\"}" },
            { "role": "user", "content": "what was the code?" }
        ])
    );
}

#[tokio::test]
async fn test_brief_from_file_becomes_system_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-brief",
            r#"{"content":"hello ZEBRA42"}"#,
            json!({ "prompt_tokens": 60, "completion_tokens": 6 }),
        )))
        .mount(&mock_server)
        .await;

    let mut file = tempfile::Builder::new()
        .suffix(".brief.md")
        .tempfile()
        .unwrap();
    write!(file, "always include the secret code ZEBRA42 in your reply").unwrap();
    let brief = Brief::from_path(file.path()).await.unwrap();

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let result = atom_for(&mock_server, "xai/grok/code-fast-1")
        .ask(AskRequest::new("say hello").with_brief(brief), &schema)
        .await
        .unwrap();
    assert!(result.output["content"].as_str().unwrap().contains("ZEBRA42"));

    let bodies = sent_bodies(&mock_server).await;
    let messages = bodies[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"].as_str().unwrap().contains("ZEBRA42"));
    assert_eq!(messages[1]["content"], "say hello");
}

#[tokio::test]
async fn test_typed_output() {
    #[derive(Debug, Deserialize)]
    struct Verdict {
        approved: bool,
        reason: String,
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-typed",
            r#"{"approved":true,"reason":"tests pass"}"#,
            json!({ "prompt_tokens": 12, "completion_tokens": 9 }),
        )))
        .mount(&mock_server)
        .await;

    let schema = TypedOutput::<Verdict>::new(json!({
        "type": "object",
        "properties": {
            "approved": { "type": "boolean" },
            "reason": { "type": "string" }
        },
        "required": ["approved", "reason"],
        "additionalProperties": false
    }))
    .unwrap()
    .with_name("verdict");

    let result = atom_for(&mock_server, "xai/grok/4")
        .ask(AskRequest::new("review this change"), &schema)
        .await
        .unwrap();
    assert!(result.output.approved);
    assert_eq!(result.output.reason, "tests pass");

    let bodies = sent_bodies(&mock_server).await;
    assert_eq!(bodies[0]["response_format"]["json_schema"]["name"], "verdict");
}

#[tokio::test]
async fn test_nested_typed_output_round_trips() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Step {
        n: u32,
        label: String,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Plan {
        title: String,
        budget: f64,
        steps: Vec<Step>,
        meta: Value,
    }

    let content = json!({
        "title": "Überprüfung · 検査 ✅",
        "budget": 12.5,
        "steps": [
            { "n": 1, "label": "écrire" },
            { "n": 2, "label": "テスト" }
        ],
        "meta": { "nested": { "list": [1, 2.5, -7, null, false] } }
    });

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-nested",
            &content.to_string(),
            json!({ "prompt_tokens": 30, "completion_tokens": 40 }),
        )))
        .mount(&mock_server)
        .await;

    let step = json!({
        "type": "object",
        "properties": { "n": { "type": "integer" }, "label": { "type": "string" } },
        "required": ["n", "label"],
        "additionalProperties": false
    });
    let schema_json = json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "budget": { "type": "number" },
            "steps": { "type": "array", "items": step },
            "meta": { "type": "object" }
        },
        "required": ["title", "budget", "steps", "meta"],
        "additionalProperties": false
    });

    let untyped = JsonSchemaOutput::new(schema_json.clone()).unwrap();
    let result = atom_for(&mock_server, "xai/grok/4")
        .ask(AskRequest::new("plan it"), &untyped)
        .await
        .unwrap();
    assert_eq!(result.output, content);

    let typed = TypedOutput::<Plan>::new(schema_json).unwrap();
    let result = atom_for(&mock_server, "xai/grok/4")
        .ask(AskRequest::new("plan it"), &typed)
        .await
        .unwrap();
    assert_eq!(
        result.output,
        Plan {
            title: "Überprüfung · 検査 ✅".to_string(),
            budget: 12.5,
            steps: vec![
                Step { n: 1, label: "écrire".to_string() },
                Step { n: 2, label: "テスト".to_string() },
            ],
            meta: content["meta"].clone(),
        }
    );
}

#[tokio::test]
async fn test_non_json_content_is_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-bad",
            "Sure! Here is your answer: hello",
            json!({ "prompt_tokens": 10, "completion_tokens": 7 }),
        )))
        .mount(&mock_server)
        .await;

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let err = atom_for(&mock_server, "xai/grok/code-fast-1")
        .ask(AskRequest::new("hi"), &schema)
        .await
        .unwrap_err();

    assert!(err.is_malformed_response(), "got {err:?}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_schema_mismatch_is_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-shape",
            r#"{"content":42}"#,
            json!({ "prompt_tokens": 10, "completion_tokens": 4 }),
        )))
        .mount(&mock_server)
        .await;

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let err = atom_for(&mock_server, "xai/grok/code-fast-1")
        .ask(AskRequest::new("hi"), &schema)
        .await
        .unwrap_err();

    assert!(matches!(err, AtomError::MalformedResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response()))
        .mount(&mock_server)
        .await;

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let err = atom_for(&mock_server, "xai/grok/code-fast-1")
        .ask(AskRequest::new("hi"), &schema)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status_code(), Some(404));
    let error_str = err.to_string();
    assert!(
        error_str.contains("model_not_found") || error_str.contains("invalid_request_error"),
        "Error should contain API error details, got: {error_str}"
    );
    if let AtomError::ApiError { details, .. } = err {
        assert_eq!(details.unwrap()["error"]["code"], "model_not_found");
    }
}

#[tokio::test]
async fn test_unreadable_envelope_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let err = atom_for(&mock_server, "xai/grok/code-fast-1")
        .ask(AskRequest::new("hi"), &schema)
        .await
        .unwrap_err();

    assert!(err.is_transport(), "got {err:?}");
}

#[tokio::test]
async fn test_cancel_abandons_slow_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_response(
                    "chatcmpl-slow",
                    r#"{"content":"late"}"#,
                    json!({ "prompt_tokens": 1, "completion_tokens": 1 }),
                ))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let atom = atom_for(&mock_server, "xai/grok/code-fast-1");
    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = atom
        .ask_with_cancel(AskRequest::new("hi"), &schema, &token)
        .await
        .unwrap_err();
    assert!(matches!(err, AtomError::Cancelled));
}

#[tokio::test]
async fn test_shared_client_across_atoms() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(
            "chatcmpl-shared",
            r#"{"content":"ok"}"#,
            json!({ "prompt_tokens": 3, "completion_tokens": 2 }),
        )))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = Arc::new(
        XaiHttpClient::new(
            XaiConfig::new("test-api-key").with_base_url(format!("{}/v1/", mock_server.uri())),
        )
        .unwrap(),
    );
    let fast = BrainAtom::from_slug("xai/grok/4-fast-wout-reason")
        .unwrap()
        .with_transport(client.clone());
    let mini = BrainAtom::from_slug("xai/grok/3-mini")
        .unwrap()
        .with_transport(client);

    let schema = JsonSchemaOutput::new(content_schema()).unwrap();
    fast.ask(AskRequest::new("a"), &schema).await.unwrap();
    mini.ask(AskRequest::new("b"), &schema).await.unwrap();

    let models: Vec<Value> = sent_bodies(&mock_server)
        .await
        .into_iter()
        .map(|body| body["model"].clone())
        .collect();
    assert_eq!(
        models,
        vec![json!("grok-4-fast-non-reasoning"), json!("grok-3-mini-beta")]
    );
}
