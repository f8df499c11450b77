use genai_relay::utils::test_support::mock_upstream_unavailable;
use genai_relay::{
    Dispatcher, Generation, GenerationKind, ProviderError, ProviderIdentity, RawGenerationRequest,
    RelayConfig, RelayError,
};
use httpmock::{Method::POST, MockServer};
use serde_json::json;

fn dispatcher(server: &MockServer) -> Dispatcher {
    let config = RelayConfig::default()
        .with_openai_base_url(server.url("/v1"))
        .with_gemini_base_url(server.url("/v1beta"));
    Dispatcher::new(config)
}

fn openai_chat_body(text: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn absent_empty_and_unknown_providers_route_to_openai() -> genai_relay::Result<()> {
    if mock_upstream_unavailable() {
        return Ok(());
    }
    let server = MockServer::start_async().await;
    let openai = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer k");
            then.status(200)
                .header("content-type", "application/json")
                .body(openai_chat_body("from openai"));
        })
        .await;
    let gemini = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-pro:generateContent");
            then.status(500);
        })
        .await;

    let dispatcher = dispatcher(&server);
    let requests = [
        RawGenerationRequest::new("Hi", "k"),
        RawGenerationRequest::new("Hi", "k").with_provider(""),
        RawGenerationRequest::new("Hi", "k").with_provider("anthropic"),
        RawGenerationRequest::new("Hi", "k").with_provider("OPENAI"),
    ];
    for raw in requests {
        let request = raw.normalize(GenerationKind::Chat)?;
        assert_eq!(request.provider(), ProviderIdentity::OpenAi);
        let generation = dispatcher.dispatch(request).await?;
        assert_eq!(generation, Generation::Text("from openai".to_string()));
    }

    openai.assert_calls_async(4).await;
    gemini.assert_calls_async(0).await;
    Ok(())
}

#[tokio::test]
async fn provider_case_does_not_change_routing() -> genai_relay::Result<()> {
    if mock_upstream_unavailable() {
        return Ok(());
    }
    let server = MockServer::start_async().await;
    let gemini = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-pro:generateContent")
                .query_param("key", "k");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"candidates":[{"content":{"parts":[{"text":"from gemini"}]}}]}"#);
        })
        .await;

    let dispatcher = dispatcher(&server);
    for provider in ["gemini", "Gemini", "GEMINI"] {
        let request = RawGenerationRequest::new("Hi", "k")
            .with_provider(provider)
            .normalize(GenerationKind::Chat)?;
        assert_eq!(dispatcher.chat(&request).await?, "from gemini");
    }

    gemini.assert_calls_async(3).await;
    Ok(())
}

#[tokio::test]
async fn gemini_request_model_overrides_default() -> genai_relay::Result<()> {
    if mock_upstream_unavailable() {
        return Ok(());
    }
    let server = MockServer::start_async().await;
    let gemini = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-1.5-flash:generateContent")
                .query_param("key", "k");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"candidates":[{"content":{"parts":[{"text":"flash"}]}}]}"#);
        })
        .await;

    let request = RawGenerationRequest::new("Hi", "k")
        .with_provider("gemini")
        .with_model("gemini-1.5-flash")
        .normalize(GenerationKind::Chat)?;
    assert_eq!(dispatcher(&server).chat(&request).await?, "flash");
    gemini.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn malformed_gemini_response_is_a_tagged_provider_error() -> genai_relay::Result<()> {
    if mock_upstream_unavailable() {
        return Ok(());
    }
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1beta/models/gemini-pro:generateContent");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"candidates":[]}"#);
        })
        .await;

    let request = RawGenerationRequest::new("Hi", "k")
        .with_provider("gemini")
        .normalize(GenerationKind::Chat)?;
    let err = dispatcher(&server).chat(&request).await.unwrap_err();
    match &err {
        RelayError::Provider {
            provider: ProviderIdentity::Gemini,
            source: ProviderError::MissingField { .. },
        } => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("gemini"));
    assert!(!err.is_client_error());
    Ok(())
}

#[tokio::test]
async fn upstream_rejection_keeps_status_and_provider() -> genai_relay::Result<()> {
    if mock_upstream_unavailable() {
        return Ok(());
    }
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401)
                .header("content-type", "application/json")
                .body(r#"{"error":{"message":"Incorrect API key provided"}}"#);
        })
        .await;

    let request = RawGenerationRequest::new("Hi", "bad").normalize(GenerationKind::Chat)?;
    let err = dispatcher(&server).dispatch(request).await.unwrap_err();
    match err {
        RelayError::Provider {
            provider: ProviderIdentity::OpenAi,
            source: ProviderError::Api { status, body },
        } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn gemini_rejection_keeps_status_and_hides_key() -> genai_relay::Result<()> {
    if mock_upstream_unavailable() {
        return Ok(());
    }
    let server = MockServer::start_async().await;
    let gemini = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-pro:generateContent")
                .query_param("key", "AIza-secret");
            then.status(403)
                .header("content-type", "application/json")
                .body(r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#);
        })
        .await;

    let request = RawGenerationRequest::new("Hi", "AIza-secret")
        .with_provider("gemini")
        .normalize(GenerationKind::Chat)?;
    let err = dispatcher(&server).dispatch(request).await.unwrap_err();
    gemini.assert_async().await;

    assert!(!err.is_client_error());
    assert!(!err.to_string().contains("AIza-secret"));
    match err {
        RelayError::Provider {
            provider: ProviderIdentity::Gemini,
            source: ProviderError::Api { status, body },
        } => {
            assert_eq!(status.as_u16(), 403);
            assert!(body.contains("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn image_dispatch_returns_urls_and_tolerates_zero_results() -> genai_relay::Result<()> {
    if mock_upstream_unavailable() {
        return Ok(());
    }
    let server = MockServer::start_async().await;
    let cats = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/images/generations")
                .header("authorization", "Bearer k")
                .body_includes("\"model\":\"dall-e-3\"")
                .body_includes("\"prompt\":\"Draw a cat\"");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    json!({
                        "created": 1,
                        "data": [
                            {"url": "https://img.example/a.png"},
                            {"url": "https://img.example/b.png"}
                        ]
                    })
                    .to_string(),
                );
        })
        .await;
    let nothing = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/images/generations")
                .body_includes("\"prompt\":\"Draw nothing\"");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"created":1}"#);
        })
        .await;

    let dispatcher = dispatcher(&server);

    let request = RawGenerationRequest::new("Draw a cat", "k").normalize(GenerationKind::Image)?;
    assert_eq!(
        dispatcher.dispatch(request).await?,
        Generation::Images(vec![
            "https://img.example/a.png".to_string(),
            "https://img.example/b.png".to_string(),
        ])
    );

    let request = RawGenerationRequest::new("Draw nothing", "k").normalize(GenerationKind::Image)?;
    assert_eq!(dispatcher.images(&request).await?, Vec::<String>::new());

    cats.assert_async().await;
    nothing.assert_async().await;
    Ok(())
}
