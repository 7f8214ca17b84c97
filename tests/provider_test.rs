//! Integration tests for the chat-completion provider client
//!
//! Tests HTTP client behavior using wiremock for request/response mocking.

use std::time::Duration;

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use askdiary::config::{ProviderConfig, RequestConfig};
use askdiary::error::GenerationError;
use askdiary::provider::{DiaryGenerator, ProviderClient};
use askdiary::session::Answers;
use askdiary::templates::{Question, Template};

/// Create a test client pointing to mock server
fn create_test_client(base_url: &str) -> ProviderClient {
    let provider = ProviderConfig {
        base_url: base_url.to_string(),
        ..ProviderConfig::default()
    };

    let request_config = RequestConfig {
        generate_timeout_ms: 500,
        validate_timeout_ms: 500,
    };

    ProviderClient::new(&provider, request_config).expect("Failed to create client")
}

fn test_template() -> Template {
    Template {
        id: "t".to_string(),
        name: "Standup".to_string(),
        description: "Daily standup".to_string(),
        category: "Test".to_string(),
        questions: vec![
            Question::new("q1", "What did you do?", ""),
            Question::new("q2", "What is next?", ""),
        ],
    }
}

fn test_answers() -> Answers {
    let mut answers = Answers::new();
    answers.insert("q1".to_string(), "fixed the bug".to_string());
    answers.insert("q2".to_string(), "done".to_string());
    answers
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
    })
}

#[cfg(test)]
mod generate_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_generation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(header("Content-Type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("  Today I fixed the bug.  ")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        assert_eq!(result, Ok("Today I fixed the bug.".to_string()));
    }

    #[tokio::test]
    async fn test_request_body_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "temperature": 0.7,
                "max_tokens": 2000,
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;
        assert!(result.is_ok(), "{:?}", result);

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");

        let content = messages[0]["content"].as_str().unwrap();
        let first = content.find("Question 1: What did you do?").unwrap();
        let second = content.find("Question 2: What is next?").unwrap();
        assert!(first < second, "questions must follow template order");
        assert!(content.contains("Answer: fixed the bug"));
    }

    #[tokio::test]
    async fn test_unanswered_question_is_marked() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .mount(&mock_server)
            .await;

        let mut answers = Answers::new();
        answers.insert("q1".to_string(), "only one".to_string());

        let client = create_test_client(&mock_server.uri());
        client
            .generate(&test_template(), &answers, "sk-test")
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let content = body["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("Question 2: What is next?\nAnswer: (unanswered)"));
    }

    #[tokio::test]
    async fn test_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Authentication Fails", "type": "authentication_error"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-bad")
            .await;

        assert_eq!(result, Err(GenerationError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_rate_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"error": {"message": "Rate limit reached"}}))
                    .insert_header("Retry-After", "60"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        assert_eq!(result, Err(GenerationError::RateLimited));
    }

    #[tokio::test]
    async fn test_server_errors_mean_provider_unavailable() {
        for status in [500, 502, 503] {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/chat/completions"))
                .respond_with(ResponseTemplate::new(status))
                .expect(1)
                .mount(&mock_server)
                .await;

            let client = create_test_client(&mock_server.uri());
            let result = client
                .generate(&test_template(), &test_answers(), "sk-test")
                .await;

            assert_eq!(
                result,
                Err(GenerationError::ProviderUnavailable),
                "status {}",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_other_status_preserves_provider_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {"message": "Insufficient Balance", "type": "unknown_error"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        match result {
            Err(GenerationError::Unknown { message }) => {
                assert!(message.contains("402"), "{}", message);
                assert!(message.contains("Insufficient Balance"), "{}", message);
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_content_is_a_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        assert!(matches!(result, Err(GenerationError::Unknown { .. })));
    }

    #[tokio::test]
    async fn test_malformed_body_is_unknown() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        assert!(matches!(result, Err(GenerationError::Unknown { .. })));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("too late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        assert_eq!(result, Err(GenerationError::Timeout));
    }

    #[tokio::test]
    async fn test_network_unreachable() {
        // Nothing listens on port 1
        let client = create_test_client("http://127.0.0.1:1");
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        assert_eq!(result, Err(GenerationError::NetworkUnreachable));
    }

    #[tokio::test]
    async fn test_connection_closed_without_response() {
        use tokio::io::AsyncReadExt;
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept, read the request, then hang up without replying
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 8192];
                let _ = socket.read(&mut buf).await;
            }
        });

        let client = create_test_client(&format!("http://{}", addr));
        let result = client
            .generate(&test_template(), &test_answers(), "sk-test")
            .await;

        assert_eq!(result, Err(GenerationError::NetworkUnreachable));
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client.generate(&test_template(), &test_answers(), "").await;

        assert_eq!(result, Err(GenerationError::MissingCredential));
    }
}

#[cfg(test)]
mod validate_tests {
    use super::*;

    #[tokio::test]
    async fn test_valid_credential() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-good"))
            .and(body_partial_json(json!({"max_tokens": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("p")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert!(client.validate_credential("sk-good").await);
    }

    #[tokio::test]
    async fn test_validation_ignores_response_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert!(client.validate_credential("sk-good").await);
    }

    #[tokio::test]
    async fn test_rejected_credential() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert!(!client.validate_credential("sk-bad").await);
    }

    #[tokio::test]
    async fn test_non_200_success_is_not_valid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert!(!client.validate_credential("sk-good").await);
    }

    #[tokio::test]
    async fn test_validation_timeout_is_false() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert!(!client.validate_credential("sk-good").await);
    }

    #[tokio::test]
    async fn test_unreachable_is_false() {
        let client = create_test_client("http://127.0.0.1:1");
        assert!(!client.validate_credential("sk-good").await);
    }
}
