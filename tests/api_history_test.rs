//! Integration tests for the chat history and dashboard endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    use agentdash::chat::{Message, SessionId};

    use crate::test_utils::{body_to_string, test_app};

    /// Tests an unknown session has an empty history
    #[tokio::test]
    async fn it_returns_empty_history_for_new_session() {
        let (app, _) = test_app("http://127.0.0.1:1").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/history/brand-new-session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(body["session_id"], "brand-new-session");
        assert_eq!(body["messages"], json!([]));
    }

    /// Tests history is returned oldest first for the requested session only
    #[tokio::test]
    async fn it_returns_history_in_order() {
        let (app, chat_log) = test_app("http://127.0.0.1:1").await;
        let session_id = SessionId::new("history-order");
        chat_log.append(&session_id, &Message::user("Halo")).await.unwrap();
        chat_log.append(&session_id, &Message::ai("Halo juga!")).await.unwrap();
        chat_log
            .append(&SessionId::new("someone-else"), &Message::user("Bukan punyamu"))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/history/history-order")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["sender"], "user");
        assert_eq!(messages[0]["text"], "Halo");
        assert_eq!(messages[1]["sender"], "ai");
        assert_eq!(messages[1]["id"]["kind"], "stored");
    }

    /// Tests appending through the API then reading it back
    #[tokio::test]
    async fn it_appends_and_reads_back() {
        let (app, chat_log) = test_app("http://127.0.0.1:1").await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/history/append-session")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"sender": "user", "text": "Simpan ini"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let history = chat_log
            .load_history(&SessionId::new("append-session"))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "Simpan ini");
    }

    /// Tests appending rejects unknown senders
    #[tokio::test]
    async fn it_rejects_unknown_sender() {
        let (app, _) = test_app("http://127.0.0.1:1").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/history/append-session")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"sender": "system", "text": "nope"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    /// Tests the status endpoint
    #[tokio::test]
    async fn it_reports_status() {
        let (app, _) = test_app("http://127.0.0.1:1").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("Backend running"));
    }

    /// Tests quick stats are served as static data
    #[tokio::test]
    async fn it_serves_quick_stats() {
        let (app, _) = test_app("http://127.0.0.1:1").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(
            body,
            json!({"active_chats": 24, "avg_response_time": "8s", "satisfaction": "4.9/5"})
        );
    }
}
