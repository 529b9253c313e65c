//! Integration tests for gateway-client.
//!
//! Each test serves one canned HTTP response from a local socket and checks
//! both the request the client sent and how the reply was decoded.
//!
//! Run with:
//!   cargo test -p gateway-client --test integration_tests

use std::time::Duration;

use gateway_client::{GatewayClient, GatewayConfig, GatewayError, HttpGatewayClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wellness_core::{ChatMessage, ChatRole, CheckIn, ResponseMap, UserIntake};

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Accept one connection, reply with `status` and `body`, and hand back the
/// raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(end) = header_end(&request) {
                let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}", addr), handle)
}

fn client(base_url: &str) -> HttpGatewayClient {
    let config = GatewayConfig::new(base_url).with_timeout(Duration::from_secs(5));
    HttpGatewayClient::new(config).unwrap()
}

// ============================================================================
// Successful replies
// ============================================================================

mod success_tests {
    use super::*;

    #[tokio::test]
    async fn test_check_in_posts_form_and_decodes_plans() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"checkin_id": 3, "plans": {"yoga": null, "nutrition": [
                {"meal_type": "lunch", "recipe_name": "Khichdi", "ingredients": ["rice", "lentils"],
                 "nutrients": {"calories": 410, "protein": 15.5, "fiber": 6}}
            ]}}"#,
        )
        .await;

        let mut check_in = CheckIn::default();
        check_in.ingredients = "rice,lentils".to_string();
        let result = client(&url).submit_check_in(12, &check_in).await.unwrap();

        assert_eq!(result.checkin_id, Some(3));
        assert!(result.yoga_plan().is_none());
        assert_eq!(result.nutrition_meals()[0].recipe_name, "Khichdi");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/checkin/12 HTTP/1.1"));
        assert!(request.contains(r#""ingredients":"rice,lentils""#));
    }

    #[tokio::test]
    async fn test_quiz_submission_body() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"id": 8, "scores": {"stress": 6, "sleep": 4}, "date": "2025-03-04T10:00:00"}"#,
        )
        .await;

        let mut responses = ResponseMap::new();
        responses.insert("stress".to_string(), 6);
        responses.insert("sleep".to_string(), 4);
        let result = client(&url).submit_quiz(12, &responses).await.unwrap();

        assert_eq!(result.score_lines(), vec!["stress: 6/10", "sleep: 4/10"]);
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/quiz/12 HTTP/1.1"));
        assert!(request.contains(r#"{"responses":{"stress":6,"sleep":4}}"#));
    }

    #[tokio::test]
    async fn test_no_yoga_today() {
        let (url, server) = serve_once("200 OK", r#"{"message": "No yoga plan for today"}"#).await;

        let plan = client(&url).today_yoga_plan(4).await.unwrap();
        assert!(plan.is_none());
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/yoga/plans/4/today HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_chat_sends_whole_history() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"message": "Warm water with ginger helps.", "role": "assistant"}"#,
        )
        .await;

        let history = vec![
            ChatMessage::assistant("Namaste!"),
            ChatMessage::user("Help my digestion"),
        ];
        let reply = client(&url).send_chat_message(5, &history).await.unwrap();

        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, "Warm water with ginger helps.");
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/chatbot/chat HTTP/1.1"));
        assert!(request.contains(
            r#"{"user_id":5,"messages":[{"role":"assistant","content":"Namaste!"},{"role":"user","content":"Help my digestion"}]}"#
        ));
    }

    #[tokio::test]
    async fn test_recent_traces_skip_malformed_entries() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"id": 1, "agent_name": "Planner"}, "garbage", {"id": 2}]"#,
        )
        .await;

        let traces = client(&url).recent_traces(4, 10).await.unwrap();
        assert_eq!(traces.len(), 2);
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/trace/4/recent?limit=10 HTTP/1.1"));
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_detail_is_surfaced() {
        let (url, server) =
            serve_once("400 Bad Request", r#"{"detail": "Email already registered"}"#).await;

        let err = client(&url)
            .register(&UserIntake::default())
            .await
            .unwrap_err();

        match &err {
            GatewayError::Status { status, detail } => {
                assert_eq!(*status, 400);
                assert_eq!(detail.as_deref(), Some("Email already registered"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.user_message(), "Email already registered");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_status_without_detail() {
        let (url, server) = serve_once("500 Internal Server Error", "oops").await;

        let err = client(&url).quiz_questions().await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Status {
                status: 500,
                detail: None
            }
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let (url, server) = serve_once("200 OK", "{not json").await;

        let err = client(&url).dashboard_overview(1).await.unwrap_err();
        assert!(matches!(err, GatewayError::Json(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .top_items(1)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Http(_)));
    }
}
