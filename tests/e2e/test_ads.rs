use crate::e2e::helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::google_mocks::{self, mock_audio_bytes};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

fn words(n: usize) -> String {
    vec!["refresh"; n].join(" ")
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_catalog_choices(ctx: &TestContext) {
    let response = ctx.client.get("/api/catalog").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json_field("products"),
        &json!(["Pepsi", "Gatorade", "Lay's", "Doritos"])
    );
    assert_eq!(
        response.json_field("audio_formats"),
        &json!([
            "Radio 15s",
            "Radio 30s",
            "Spotify Ad 30s",
            "Spotify Ad 60s",
            "Podcast Mid-roll 45s"
        ])
    );
    assert_eq!(
        response.json_field("languages"),
        &json!(["English (US)", "Spanish (LATAM)", "Portuguese (BR)"])
    );
    assert_eq!(response.json_field("story_modes").as_array().unwrap().len(), 6);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_pepsi_radio_spot(ctx: &TestContext) {
    google_mocks::mount_token_endpoint(&ctx.google).await;
    google_mocks::mount_gemini_script(
        &ctx.google,
        "Since 1893, Pepsi has poured pure refreshment. Grab one today.",
    )
    .await;
    google_mocks::mount_tts_audio(&ctx.google, "en-US", "en-US-Neural2-D").await;

    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Pepsi",
                "story_mode": "",
                "audio_format": "Radio 15s",
                "language": "English (US)",
                "campaign_context": ""
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    assert_eq!(
        response.json_field("script").as_str(),
        Some("Since 1893, Pepsi has poured pure refreshment. Grab one today.")
    );
    assert_eq!(response.json_field("duration_seconds"), &json!(15));
    assert_eq!(response.json_field("truncated"), &json!(false));

    let audio_path = response.json_field("audio_path").as_str().unwrap();
    assert_eq!(audio_path, ctx.audio_path().display().to_string());
    let written = std::fs::read(audio_path).unwrap();
    assert!(!written.is_empty());
    assert_eq!(written, mock_audio_bytes());

    let inline = STANDARD
        .decode(response.json_field("audio_base64").as_str().unwrap())
        .unwrap();
    assert_eq!(inline, written);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_brand_safe_prompt_to_gemini(ctx: &TestContext) {
    google_mocks::mount_token_endpoint(&ctx.google).await;
    google_mocks::mount_gemini_script(&ctx.google, "Game on.").await;
    google_mocks::mount_tts_audio(&ctx.google, "es-US", "es-US-Neural2-B").await;

    ctx.client
        .post(
            "/api/ads",
            &json!({
                "product": "Gatorade",
                "story_mode": "Sports & Performance",
                "audio_format": "Spotify Ad 30s",
                "language": "Spanish (LATAM)",
                "campaign_context": "Copa weekend\npromo"
            }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let requests = ctx.google.received_requests().await.unwrap();
    let gemini = requests
        .iter()
        .find(|r| r.url.path() == google_mocks::gemini_path())
        .expect("Gemini was not called");
    let body: serde_json::Value = serde_json::from_slice(&gemini.body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

    assert!(prompt.contains("Product: Gatorade"));
    assert!(prompt.contains("Story type: Sports & Performance"));
    assert!(prompt.contains("Target duration: 30 seconds"));
    assert!(prompt.contains("Target adult consumers only"));
    assert!(prompt.contains("No health, medical, or nutritional claims"));
    assert!(prompt.contains("Do NOT use emojis"));
    assert!(prompt.contains("Campaign context: Copa weekend promo"));
    assert!(prompt.ends_with("Output only the final script text, with no preamble and no markdown."));

    assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_truncate_long_scripts_to_the_format(ctx: &TestContext) {
    google_mocks::mount_token_endpoint(&ctx.google).await;
    google_mocks::mount_gemini_script(&ctx.google, &words(250)).await;
    google_mocks::mount_tts_audio(&ctx.google, "pt-BR", "pt-BR-Neural2-B").await;

    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Lay's",
                "audio_format": "Radio 15s",
                "language": "Portuguese (BR)"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_field("word_count"), &json!(37));
    assert_eq!(response.json_field("truncated"), &json!(true));
    assert_eq!(response.json_field("script").as_str(), Some(words(37).as_str()));

    let requests = ctx.google.received_requests().await.unwrap();
    let tts = requests
        .iter()
        .find(|r| r.url.path() == google_mocks::TTS_PATH)
        .expect("TTS was not called");
    let body: serde_json::Value = serde_json::from_slice(&tts.body).unwrap();
    assert_eq!(body["input"]["text"].as_str(), Some(words(37).as_str()));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_the_latest_audio(ctx: &TestContext) {
    google_mocks::mount_token_endpoint(&ctx.google).await;
    google_mocks::mount_gemini_script(&ctx.google, "Bold. Playful. Doritos.").await;
    google_mocks::mount_tts_audio(&ctx.google, "en-US", "en-US-Neural2-D").await;

    ctx.client
        .get("/api/ads/audio")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);

    ctx.client
        .post(
            "/api/ads",
            &json!({
                "product": "Doritos",
                "audio_format": "Podcast Mid-roll 45s",
                "language": "English (US)"
            }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get("/api/ads/audio").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("content-type").map(String::as_str),
        Some("audio/mpeg")
    );
    assert_eq!(response.body_bytes, mock_audio_bytes());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reuse_the_access_token(ctx: &TestContext) {
    google_mocks::mount_token_endpoint(&ctx.google).await;
    google_mocks::mount_gemini_script(&ctx.google, "Pepsi.").await;
    google_mocks::mount_tts_audio(&ctx.google, "en-US", "en-US-Neural2-D").await;

    let request = json!({
        "product": "Pepsi",
        "audio_format": "Radio 30s",
        "language": "English (US)"
    });
    for _ in 0..2 {
        ctx.client
            .post("/api/ads", &request)
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    let requests = ctx.google.received_requests().await.unwrap();
    let token_calls = requests
        .iter()
        .filter(|r| r.url.path() == google_mocks::TOKEN_PATH)
        .count();
    assert_eq!(token_calls, 1);

    let token_call = requests
        .iter()
        .find(|r| r.url.path() == google_mocks::TOKEN_PATH)
        .unwrap();
    let form = String::from_utf8(token_call.body.clone()).unwrap();
    assert!(form.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"));
    assert!(form.contains("assertion="));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_catalog_labels(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Pepsi",
                "audio_format": "Radio 90s",
                "language": "English (US)"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input: unknown audio format \"Radio 90s\"");

    // Nothing reached Google
    assert!(ctx.google.received_requests().await.unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_gemini_outages_as_bad_gateway(ctx: &TestContext) {
    google_mocks::mount_gemini_error(&ctx.google, 503, "The model is overloaded").await;

    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Pepsi",
                "audio_format": "Radio 15s",
                "language": "English (US)"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("script generation failed");
    assert!(!ctx.audio_path().exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_rejected_api_key_as_unavailable(ctx: &TestContext) {
    google_mocks::mount_gemini_error(&ctx.google, 403, "API key not valid").await;

    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Pepsi",
                "audio_format": "Radio 15s",
                "language": "English (US)"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_message("API key not valid");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_without_output_when_synthesis_is_denied(ctx: &TestContext) {
    google_mocks::mount_token_endpoint(&ctx.google).await;
    google_mocks::mount_gemini_script(&ctx.google, "Pepsi.").await;
    google_mocks::mount_tts_error(&ctx.google, 403).await;

    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Pepsi",
                "audio_format": "Radio 15s",
                "language": "English (US)"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_message("speech synthesis failed");
    assert!(response.body.as_ref().unwrap().get("script").is_none());
    assert!(!ctx.audio_path().exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_rejected_service_account_as_unavailable(ctx: &TestContext) {
    google_mocks::mount_token_error(&ctx.google, 400, "invalid_grant").await;
    google_mocks::mount_gemini_script(&ctx.google, "Pepsi.").await;
    google_mocks::mount_tts_audio(&ctx.google, "en-US", "en-US-Neural2-D").await;

    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Pepsi",
                "audio_format": "Radio 15s",
                "language": "English (US)"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_message("invalid_grant");
    assert!(!ctx.audio_path().exists());

    let requests = ctx.google.received_requests().await.unwrap();
    assert!(!requests.iter().any(|r| r.url.path() == google_mocks::TTS_PATH));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_token_endpoint_outages_as_bad_gateway(ctx: &TestContext) {
    google_mocks::mount_token_error(&ctx.google, 503, "backend_error").await;
    google_mocks::mount_gemini_script(&ctx.google, "Pepsi.").await;

    let response = ctx
        .client
        .post(
            "/api/ads",
            &json!({
                "product": "Pepsi",
                "audio_format": "Radio 15s",
                "language": "English (US)"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("speech synthesis failed");
    assert!(!ctx.audio_path().exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_mint_a_new_token_after_unauthorized(ctx: &TestContext) {
    google_mocks::mount_token_endpoint(&ctx.google).await;
    google_mocks::mount_gemini_script(&ctx.google, "Pepsi.").await;
    google_mocks::mount_tts_unauthorized_once(&ctx.google).await;
    google_mocks::mount_tts_audio(&ctx.google, "en-US", "en-US-Neural2-D").await;

    let request = json!({
        "product": "Pepsi",
        "audio_format": "Radio 15s",
        "language": "English (US)"
    });

    ctx.client
        .post("/api/ads", &request)
        .await
        .unwrap()
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    ctx.client
        .post("/api/ads", &request)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let requests = ctx.google.received_requests().await.unwrap();
    let token_calls = requests
        .iter()
        .filter(|r| r.url.path() == google_mocks::TOKEN_PATH)
        .count();
    assert_eq!(token_calls, 2);
}
