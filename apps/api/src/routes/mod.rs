pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::{handle_analyze, MAX_RESUME_BYTES};
use crate::state::AppState;
use crate::website::handlers::handle_website_summary;

/// Room for the job description and multipart framing on top of the resume itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/analyze",
            post(handle_analyze).layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + FORM_OVERHEAD_BYTES)),
        )
        .route("/website-summary", post(handle_website_summary))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::analysis::pipeline::StageMode;
    use crate::llm_client::testing::ScriptedModel;
    use crate::resume::{convert_with, ResumeParser, ResumeParsingError};
    use crate::website::extractor::{ExtractionError, PageExtractor};

    const BOUNDARY: &str = "analyzer-test-boundary";

    /// Pretends every non-empty upload decodes to the same text.
    struct FixedTextParser(&'static str);

    impl ResumeParser for FixedTextParser {
        fn convert_pdf_bytes(
            &self,
            data: &[u8],
            file_name: Option<&str>,
        ) -> Result<String, ResumeParsingError> {
            convert_with(data, file_name, |_| Ok(self.0.to_string()))
        }
    }

    struct FixedPage(&'static str);

    #[async_trait]
    impl PageExtractor for FixedPage {
        async fn extract(&self, _url: &Url) -> Result<String, ExtractionError> {
            Ok(self.0.to_string())
        }
    }

    fn scripted_model() -> ScriptedModel {
        ScriptedModel::new()
            .reply(
                "impressive overlaps",
                r#"{"summary": "Python experience lines up", "highlights": ["5 years Python"]}"#,
            )
            .reply(
                "missing skills",
                r#"{"summary": "No mention of testing", "highlights": ["pytest"]}"#,
            )
            .reply(
                "decision making agent",
                r#"Verdict: {"summary": "Strong candidate", "highlights": ["Python", "", "Add testing"]}"#,
            )
            .reply("extracts key information", "Acme builds Python tooling.")
    }

    fn app_with(model: Arc<ScriptedModel>) -> Router {
        build_router(AppState {
            llm: model,
            resume_parser: Arc::new(FixedTextParser("Senior Engineer with 5 years Python")),
            page_extractor: Arc::new(FixedPage("Acme Corp. We build Python tooling.")),
            stage_mode: StageMode::Sequential,
        })
    }

    fn multipart_body(job_description: Option<&str>, resume: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(jd) = job_description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{jd}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((content_type, data)) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn analyze_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(scripted_model()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["detail"], "Resume analyzer is running.");
    }

    #[tokio::test]
    async fn test_analyze_returns_three_agent_results() {
        let model = Arc::new(scripted_model());
        let app = app_with(model.clone());

        let body = multipart_body(
            Some("Looking for Python engineer"),
            Some(("application/pdf", b"%PDF-1.4 fake".as_slice())),
        );
        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let results = body["agent_results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["name"], "Similarity & strengths agent");
        assert_eq!(results[1]["name"], "Gap analysis agent");
        assert_eq!(results[2]["name"], "Compilation agent");
        assert_eq!(results[2]["summary"], "Strong candidate");
        assert_eq!(
            results[2]["highlights"],
            serde_json::json!(["Python", "Add testing"])
        );
        assert_eq!(body["combined_summary"], "Strong candidate");
        assert_eq!(body["resume_character_count"], 35);
        assert_eq!(body["job_description_character_count"], 27);
        assert_eq!(body["resume_excerpt"], "Senior Engineer with 5 years Python");
        assert_eq!(model.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_analyze_empty_resume_makes_no_llm_calls() {
        let model = Arc::new(scripted_model());
        let app = app_with(model.clone());

        let body = multipart_body(Some("Looking for Python engineer"), Some(("application/pdf", b"".as_slice())));
        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "RESUME_PARSING_ERROR");
        assert_eq!(body["error"]["message"], "Uploaded resume is empty.");
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_pdf() {
        let model = Arc::new(scripted_model());
        let app = app_with(model.clone());

        let body = multipart_body(Some("Looking for Python engineer"), Some(("text/plain", b"hello".as_slice())));
        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Unsupported resume content type text/plain. Only PDF files are accepted."
        );
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_resume() {
        let model = Arc::new(scripted_model());
        let app = app_with(model.clone());

        let big = vec![b'%'; MAX_RESUME_BYTES + 1];
        let body = multipart_body(Some("Looking for Python engineer"), Some(("application/pdf", big.as_slice())));
        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_missing_fields() {
        let app = app_with(Arc::new(scripted_model()));
        let response = app
            .clone()
            .oneshot(analyze_request(multipart_body(
                None,
                Some(("application/pdf", b"%PDF".as_slice())),
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .oneshot(analyze_request(multipart_body(Some("Python role"), None)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_analyze_gap_failure_is_bad_gateway_naming_stage() {
        let model = Arc::new(
            ScriptedModel::new()
                .reply("impressive overlaps", r#"{"summary": "ok", "highlights": []}"#)
                .fail("missing skills", 503)
                .reply("decision making agent", "unused"),
        );
        let app = app_with(model.clone());

        let body = multipart_body(Some("Python role"), Some(("application/pdf", b"%PDF".as_slice())));
        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Agent 2 (gap analysis) could not complete due to an upstream error"
        );
        assert_eq!(model.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_website_summary() {
        let app = app_with(Arc::new(scripted_model()));
        let request = Request::builder()
            .method("POST")
            .uri("/website-summary")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("website_url=https%3A%2F%2Facme.example%2Fabout"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["website_url"], "https://acme.example/about");
        assert_eq!(body["website_details"], "Acme Corp. We build Python tooling.");
        assert_eq!(body["summary"], "Acme builds Python tooling.");
    }

    #[tokio::test]
    async fn test_website_summary_rejects_bad_url() {
        let app = app_with(Arc::new(scripted_model()));
        let request = Request::builder()
            .method("POST")
            .uri("/website-summary")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("website_url=not-a-url"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
