use company_screener::*;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

/// Replays canned replies in order and records every request it receives.
struct ScriptedModel {
    replies: Mutex<VecDeque<std::result::Result<String, ModelError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    fn new(replies: Vec<std::result::Result<String, ModelError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn text(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> GenerationRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl GenerativeModel for ScriptedModel {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, ModelError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Transport("no scripted reply".to_string())))
    }
}

fn invalid_key() -> ModelError {
    ModelError::Api {
        status: 400,
        message: "API key not valid. Please pass a valid API key.".to_string(),
    }
}

#[tokio::test]
async fn test_fetch_company_info_from_fenced_block() {
    let gateway = CompanyGateway::new(ScriptedModel::text(
        "```json\n{\"company_name\":\"Acme\"}\n```",
    ));
    let profile = gateway.fetch_company_info("Acme", "").await.unwrap();

    assert_eq!(profile.company_name.as_deref(), Some("Acme"));
    assert_eq!(profile.present_fields().len(), 1);
    assert_eq!(profile.url, None);

    let request = gateway.model().last_request();
    assert!(request.web_search);
    assert!(request.response_schema.is_none());
    assert!(request.prompt_text().contains("\"Acme\""));
    assert!(!request.prompt_text().contains("located at"));
}

#[tokio::test]
async fn test_fetch_company_info_with_prose_and_sentinels() {
    let reply = "I found the company on its official homepage.\n\n```json\n{\n  \"company_name\": \"株式会社サンプル\",\n  \"furigana\": \"カブシキガイシャサンプル\",\n  \"stock_code\": \"-\",\n  \"listing_status\": null,\n  \"employee_count\": 250\n}\n```\n";
    let gateway = CompanyGateway::new(ScriptedModel::text(reply));
    let profile = gateway
        .fetch_company_info("株式会社サンプル", "大阪府大阪市")
        .await
        .unwrap();

    assert_eq!(profile.furigana.as_deref(), Some("カブシキガイシャサンプル"));
    assert_eq!(profile.stock_code, None);
    assert_eq!(profile.listing_status, None);
    assert_eq!(profile.employee_count.as_deref(), Some("250"));
    assert!(gateway
        .model()
        .last_request()
        .prompt_text()
        .contains("located at \"大阪府大阪市\""));
}

#[tokio::test]
async fn test_fetch_company_info_raw_json_fallback() {
    let gateway = CompanyGateway::new(ScriptedModel::text(
        "\n  {\"company_name\":\"Acme\",\"capital\":\"10M JPY\"}  \n",
    ));
    let profile = gateway.fetch_company_info("Acme", "").await.unwrap();
    assert_eq!(profile.capital.as_deref(), Some("10M JPY"));
}

#[tokio::test]
async fn test_fetch_company_info_errors() {
    let gateway = CompanyGateway::new(ScriptedModel::text(""));
    assert!(matches!(
        gateway.fetch_company_info("Acme", "").await,
        Err(ScreenerError::EmptyResponse)
    ));

    let gateway = CompanyGateway::new(ScriptedModel::text("not json at all"));
    let err = gateway.fetch_company_info("Acme", "").await.unwrap_err();
    assert!(matches!(err, ScreenerError::ResponseFormat(_)));
    assert_eq!(
        err.to_string(),
        "Failed to parse the response from the AI model. It may have returned an invalid format."
    );

    let gateway = CompanyGateway::new(ScriptedModel::new(vec![Err(invalid_key())]));
    let err = gateway.fetch_company_info("Acme", "").await.unwrap_err();
    assert!(matches!(err, ScreenerError::Authentication(_)));
    assert_eq!(
        err.to_string(),
        "Invalid API Key. Please check your configuration."
    );

    let gateway = CompanyGateway::new(ScriptedModel::new(vec![Err(ModelError::Api {
        status: 500,
        message: "Internal error encountered.".to_string(),
    })]));
    let err = gateway.fetch_company_info("Acme", "").await.unwrap_err();
    assert!(matches!(err, ScreenerError::FetchFailed(_)));
}

#[tokio::test]
async fn test_each_lookup_is_a_separate_call() {
    let gateway = CompanyGateway::new(ScriptedModel::new(vec![
        Ok("{\"company_name\":\"Acme\"}".to_string()),
        Ok("{\"company_name\":\"Acme\"}".to_string()),
    ]));
    gateway.fetch_company_info("Acme", "").await.unwrap();
    gateway.fetch_company_info("Acme", "").await.unwrap();
    assert_eq!(gateway.model().calls(), 2);
}

#[tokio::test]
async fn test_extract_info_from_image() {
    let gateway = CompanyGateway::new(ScriptedModel::text(
        "{\"company_name\":\"株式会社サンプル\",\"company_address\":\"東京都渋谷区\"}",
    ));
    let contact = gateway
        .extract_info_from_image("/9j/4AAQ", "image/jpeg")
        .await
        .unwrap();
    assert_eq!(contact.company_name, "株式会社サンプル");
    assert_eq!(contact.company_address, "東京都渋谷区");

    let request = gateway.model().last_request();
    assert!(!request.web_search);
    assert_eq!(
        request.parts[0],
        RequestPart::Image(InlineImage::new("/9j/4AAQ", "image/jpeg"))
    );
    assert_eq!(request.prompt_text(), CARD_EXTRACTION_PROMPT);
    let schema = request.response_schema.unwrap();
    assert_eq!(schema["properties"].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_extract_info_from_image_errors() {
    let gateway = CompanyGateway::new(ScriptedModel::text(""));
    assert!(matches!(
        gateway.extract_info_from_image("AAAA", "image/png").await,
        Err(ScreenerError::EmptyResponse)
    ));

    let gateway = CompanyGateway::new(ScriptedModel::text("  \n"));
    assert!(matches!(
        gateway.extract_info_from_image("AAAA", "image/png").await,
        Err(ScreenerError::ExtractionFailed(_))
    ));

    let gateway = CompanyGateway::new(ScriptedModel::new(vec![Err(invalid_key())]));
    assert!(matches!(
        gateway.extract_info_from_image("AAAA", "image/png").await,
        Err(ScreenerError::Authentication(_))
    ));

    let gateway = CompanyGateway::new(ScriptedModel::text("{broken"));
    let err = gateway
        .extract_info_from_image("AAAA", "image/png")
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenerError::ExtractionFailed(_)));
    assert_eq!(
        err.to_string(),
        "Failed to extract company information from the image."
    );

    let gateway = CompanyGateway::new(ScriptedModel::text("{}"));
    assert!(matches!(
        gateway.extract_info_from_image("AAAA", "application/pdf").await,
        Err(ScreenerError::Validation(_))
    ));
    assert_eq!(gateway.model().calls(), 0);
}

#[tokio::test]
async fn test_empty_name_never_reaches_the_model() {
    let gateway = CompanyGateway::new(ScriptedModel::text("{\"company_name\":\"Acme\"}"));
    let mut screener = Screener::new();

    let state = screener.search(&gateway).await;
    assert_eq!(
        state,
        &SearchState::Error("Company name is required.".to_string())
    );
    assert_eq!(gateway.model().calls(), 0);
}

#[tokio::test]
async fn test_second_search_replaces_first() {
    let gateway = CompanyGateway::new(ScriptedModel::new(vec![
        Ok("```json\n{\"company_name\":\"Acme\",\"industry\":\"Anvils\"}\n```".to_string()),
        Ok("```json\n{\"company_name\":\"Globex\"}\n```".to_string()),
    ]));
    let mut screener = Screener::new();

    screener.set_company_name("Acme");
    screener.search(&gateway).await;
    assert_eq!(
        screener.result().and_then(|p| p.industry.as_deref()),
        Some("Anvils")
    );

    screener.set_company_name("Globex");
    screener.search(&gateway).await;
    let profile = screener.result().unwrap();
    assert_eq!(profile.company_name.as_deref(), Some("Globex"));
    assert_eq!(profile.industry, None);
}

#[tokio::test]
async fn test_search_failure_shows_message() {
    let gateway = CompanyGateway::new(ScriptedModel::new(vec![Err(invalid_key())]));
    let mut screener = Screener::new();
    screener.set_company_name("Acme");
    screener.search(&gateway).await;

    assert_eq!(
        screener.error_message(),
        Some("Invalid API Key. Please check your configuration.")
    );
    let rendered = render_search_state(screener.search_state());
    assert!(rendered.starts_with("Query Failed\n"));
}

#[tokio::test]
async fn test_scan_card_prefills_form_then_search() {
    let gateway = CompanyGateway::new(ScriptedModel::new(vec![
        Ok("{\"company_name\":\"株式会社サンプル\",\"company_address\":\"福岡県福岡市\"}".to_string()),
        Ok("```json\n{\"company_name\":\"株式会社サンプル\"}\n```".to_string()),
    ]));
    let mut screener = Screener::new();

    screener
        .scan_card(&gateway, &InlineImage::new("AAAA", "image/png"))
        .await
        .unwrap();
    assert_eq!(screener.scan_state(), ScanState::Ready);
    assert_eq!(screener.form.company_address, "福岡県福岡市");

    screener.search(&gateway).await;
    assert!(gateway
        .model()
        .last_request()
        .prompt_text()
        .contains("\"株式会社サンプル\" located at \"福岡県福岡市\""));
    assert!(screener.result().is_some());
}

#[tokio::test]
async fn test_scan_failure_leaves_search_state_alone() {
    let gateway = CompanyGateway::new(ScriptedModel::new(vec![
        Ok("{\"company_name\":\"Acme\"}".to_string()),
        Err(ModelError::Transport("connection reset".to_string())),
    ]));
    let mut screener = Screener::new();
    screener.set_company_name("Acme");
    screener.search(&gateway).await;

    screener
        .scan_card(&gateway, &InlineImage::new("AAAA", "image/png"))
        .await
        .unwrap();

    assert!(screener.result().is_some());
    assert_eq!(screener.form.company_name, "Acme");
    assert_eq!(
        screener.banner(Instant::now()),
        Some("Failed to extract company information from the image.")
    );
}
