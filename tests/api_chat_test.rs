//! Integration tests for the chat API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use mockito::Matcher;
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    use nova::ai::prompt::system_directive;
    use nova::core::Location;

    use crate::test_utils::{body_to_string, completion_body, test_app};

    fn chat_request(body: Value) -> Request<Body> {
        Request::builder()
            .uri("/api/chat")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Tests a first message is sent with only the system directive
    #[tokio::test]
    async fn it_answers_a_first_message() {
        let mut server = mockito::Server::new_async().await;
        let system = system_directive(&Location::default()).unwrap();
        let upstream = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-api-key")
            .match_body(Matcher::Json(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.7,
                "max_tokens": 1000,
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": "What are flood risks?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Low lying areas flood first."))
            .create_async()
            .await;

        let app = test_app(&server.url());
        let response = app
            .oneshot(chat_request(json!({"message": "What are flood risks?"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        upstream.assert_async().await;

        let body: Value = serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(
            body,
            json!({
                "role": "bot",
                "content": "Low lying areas flood first.",
                "options": ["How can I prepare?", "Show emergency contacts", "Get local alerts"]
            })
        );
    }

    /// Tests prior turns are mapped to user/assistant without options
    #[tokio::test]
    async fn it_forwards_history_in_order() {
        let mut server = mockito::Server::new_async().await;
        let system = system_directive(&Location::default()).unwrap();
        let upstream = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": "Hello! How can I help?"},
                    {"role": "user", "content": "This is an EMERGENCY"}
                ]
            })))
            .with_status(200)
            .with_body(completion_body("Call 112 now."))
            .create_async()
            .await;

        let app = test_app(&server.url());
        let response = app
            .oneshot(chat_request(json!({
                "message": "This is an EMERGENCY",
                "history": [
                    {"role": "user", "content": "Hi"},
                    {
                        "role": "bot",
                        "content": "Hello! How can I help?",
                        "options": ["Tell me more", "What should I do next?", "Back to main menu"]
                    }
                ]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        upstream.assert_async().await;

        let body: Value = serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(
            body["options"],
            json!(["Call emergency services", "Evacuation guidelines", "Find shelter"])
        );
    }

    /// Tests the location in the request is used for the system directive
    #[tokio::test]
    async fn it_uses_the_requested_location() {
        let mut server = mockito::Server::new_async().await;
        let upstream = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Regex("Porto Alegre".into()))
            .with_status(200)
            .with_body(completion_body("Stay away from the Guaíba."))
            .create_async()
            .await;

        let location = Location {
            city: String::from("Porto Alegre"),
            state: String::from("Rio Grande do Sul"),
            country: String::from("Brazil"),
            ..Location::default()
        };
        let app = test_app(&server.url());
        let response = app
            .oneshot(chat_request(json!({
                "message": "hello",
                "location": location
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        upstream.assert_async().await;
    }

    /// Tests upstream failures become a generic 500
    #[tokio::test]
    async fn it_hides_upstream_errors() {
        let mut server = mockito::Server::new_async().await;
        let upstream = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key provided: test-api-key"}}"#)
            .expect(1)
            .create_async()
            .await;

        let app = test_app(&server.url());
        let response = app
            .oneshot(chat_request(json!({"message": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        upstream.assert_async().await;

        let body = body_to_string(response.into_body()).await;
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            body,
            json!({"error": "Failed to get response. Please try again."})
        );
    }

    /// Tests a success status with an unexpected body is a 500
    #[tokio::test]
    async fn it_fails_on_malformed_completions() {
        let mut server = mockito::Server::new_async().await;
        let _upstream = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"role": "assistant"}}]}"#)
            .create_async()
            .await;

        let app = test_app(&server.url());
        let response = app
            .oneshot(chat_request(json!({"message": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_to_string(response.into_body()).await;
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            body,
            json!({"error": "Failed to get response. Please try again."})
        );
    }

    /// Tests a blank message is rejected without calling the model
    #[tokio::test]
    async fn it_rejects_blank_messages() {
        let mut server = mockito::Server::new_async().await;
        let upstream = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let app = test_app(&server.url());
        let response = app
            .oneshot(chat_request(json!({"message": "   "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        upstream.assert_async().await;
    }

    /// Tests CORS preflight requests get an empty permissive response
    #[tokio::test]
    async fn it_answers_cors_preflight() {
        let mut server = mockito::Server::new_async().await;
        let upstream = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let app = test_app(&server.url());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("OPTIONS")
                    .header("origin", "https://example.com")
                    .header("access-control-request-method", "POST")
                    .header(
                        "access-control-request-headers",
                        "authorization,x-client-info,apikey,content-type",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let allowed = headers["access-control-allow-headers"].to_str().unwrap();
        for header in ["authorization", "x-client-info", "apikey", "content-type"] {
            assert!(allowed.contains(header), "missing {}", header);
        }
        assert_eq!(body_to_string(response.into_body()).await, "");
        upstream.assert_async().await;
    }

    /// Tests a bare OPTIONS request is answered without processing
    #[tokio::test]
    async fn it_answers_bare_options_requests() {
        let app = test_app("http://127.0.0.1:9");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("OPTIONS")
                    .header("origin", "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(body_to_string(response.into_body()).await, "");
    }

    #[tokio::test]
    async fn it_reports_health() {
        let app = test_app("http://127.0.0.1:9");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, r#"{"status":"ok"}"#);
    }
}
