use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{livez, readyz},
        priorities::{get_priority, list_priorities},
        tickets::{
            create_ticket, delete_ticket, finalize_ticket, get_ticket, list_tickets,
            update_ticket,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // The API is consumed by a browser front end on another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        // Ticket routes
        .route("/chamados", get(list_tickets).post(create_ticket))
        .route(
            "/chamados/{id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/chamados/{id}/Finalizar", post(finalize_ticket))
        // Priority routes
        .route("/Prioridade", get(list_priorities))
        .route("/Prioridade/{id}", get(get_priority))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use async_trait::async_trait;
    use chamados_core::storage::{Result as RepoResult, TicketFilter, TicketRepository};
    use chamados_core::ticket::{NewTicket, Ticket, TicketChanges};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn seeded_app() -> Router {
        let state = AppState::default();
        state.seed(false).await.unwrap();
        create_app(state, Duration::from_secs(10))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create(app: &Router, title: &str, description: &str, priority_id: i64) -> Value {
        let response = send(
            app,
            "POST",
            "/chamados",
            Some(json!({
                "titulo": title,
                "Descricao": description,
                "PrioridadeId": priority_id,
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/livez", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "GET", "/readyz", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["healthy"], true);
    }

    #[tokio::test]
    async fn test_list_tickets_empty() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/chamados", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_ticket_lifecycle() {
        let app = seeded_app().await;

        // Create
        let response = send(
            &app,
            "POST",
            "/chamados",
            Some(json!({
                "titulo": "Access badge error",
                "Descricao": "User could not enter",
                "PrioridadeId": 3,
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/chamados/1"
        );
        let created = body_json(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["status"], "Open");
        assert_eq!(created["priorityId"], 3);
        assert!(created["closedAt"].is_null());

        // List includes the priority
        let response = send(&app, "GET", "/chamados", None).await;
        let list = body_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["title"], "Access badge error");
        assert_eq!(list[0]["priority"]["name"], "High");

        // Get
        let response = send(&app, "GET", "/chamados/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["priority"]["id"], 3);
        assert_eq!(fetched["openedAt"], created["openedAt"]);

        // Finalize, twice
        for _ in 0..2 {
            let response = send(&app, "POST", "/chamados/1/Finalizar", None).await;
            assert_eq!(response.status(), StatusCode::OK);
            let finalized = body_json(response).await;
            assert_eq!(finalized["status"], "Finished");
            assert_eq!(finalized["title"], "Access badge error");
        }

        // Delete
        let response = send(&app, "DELETE", "/chamados/1", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, "GET", "/chamados/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "DELETE", "/chamados/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let app = seeded_app().await;

        create(&app, "First ticket here", "a", 1).await;
        send(&app, "DELETE", "/chamados/1", None).await;
        let second = create(&app, "Second ticket here", "b", 1).await;

        assert_eq!(second["id"], 2);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let app = seeded_app().await;
        create(&app, "Printer out of paper", "Floor 2", 1).await;
        create(&app, "Network is down again", "Floor 3", 3).await;
        send(&app, "POST", "/chamados/2/Finalizar", None).await;

        let response = send(&app, "GET", "/chamados?search=Printer", None).await;
        let list = body_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], 1);

        let response = send(&app, "GET", "/chamados?situacao=Finished", None).await;
        let list = body_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], 2);

        let response = send(&app, "GET", "/chamados?search=Printer&situacao=Finished", None).await;
        assert_eq!(body_json(response).await, json!([]));

        // Empty values mean no filter
        let response = send(&app, "GET", "/chamados?search=&situacao=", None).await;
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let app = seeded_app().await;

        let response = send(&app, "POST", "/chamados", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        let fields: Vec<&str> = json["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"titulo"));
        assert!(fields.contains(&"Descricao"));

        let response = send(
            &app,
            "POST",
            "/chamados",
            Some(json!({ "titulo": "Too short", "Descricao": "x" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            "POST",
            "/chamados",
            Some(json!({ "titulo": "a".repeat(101), "Descricao": "x" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Nothing was stored
        let response = send(&app, "GET", "/chamados", None).await;
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let app = seeded_app().await;

        let request = Request::builder()
            .method("POST")
            .uri("/chamados")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["errors"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_create_with_unknown_priority() {
        let app = seeded_app().await;
        create(&app, "Ticket with odd priority", "x", 42).await;

        let response = send(&app, "GET", "/chamados/1", None).await;
        let fetched = body_json(response).await;

        assert_eq!(fetched["priorityId"], 42);
        assert!(fetched["priority"].is_null());
    }

    #[tokio::test]
    async fn test_update_keeps_other_fields() {
        let app = seeded_app().await;
        let created = create(&app, "Original title text", "Original", 2).await;
        send(&app, "POST", "/chamados/1/Finalizar", None).await;

        let response = send(
            &app,
            "PUT",
            "/chamados/1",
            Some(json!({ "titulo": "Updated title text", "Descricao": "Updated" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;

        assert_eq!(updated["title"], "Updated title text");
        assert_eq!(updated["description"], "Updated");
        assert_eq!(updated["status"], "Finished");
        assert_eq!(updated["priorityId"], 2);
        assert_eq!(updated["openedAt"], created["openedAt"]);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let app = seeded_app().await;
        create(&app, "Original title text", "Original", 2).await;

        let response = send(
            &app,
            "PUT",
            "/chamados/1",
            Some(json!({ "titulo": "short", "Descricao": "x" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            "PUT",
            "/chamados/99",
            Some(json!({ "titulo": "Valid title text", "Descricao": "x" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Validation runs before the existence check
        let response = send(&app, "PUT", "/chamados/99", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_finalize_missing_ticket() {
        let app = seeded_app().await;

        let response = send(&app, "POST", "/chamados/7/Finalizar", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/chamados/abc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_priorities() {
        let app = seeded_app().await;

        let response = send(&app, "GET", "/Prioridade", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([
                { "id": 1, "name": "Low" },
                { "id": 2, "name": "Medium" },
                { "id": 3, "name": "High" },
            ])
        );

        let response = send(&app, "GET", "/Prioridade/2", None).await;
        assert_eq!(body_json(response).await["name"], "Medium");

        let response = send(&app, "GET", "/Prioridade/9", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_sqlite_backend_behaves_the_same() {
        use crate::storage::SqliteRepository;

        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let state = AppState::from_repository(Arc::new(repo));
        state.seed(false).await.unwrap();
        let app = create_app(state, Duration::from_secs(10));

        create(&app, "Printer out of paper", "Floor 2", 1).await;
        send(&app, "POST", "/chamados/1/Finalizar", None).await;

        let response = send(&app, "GET", "/chamados?situacao=Finished", None).await;
        let list = body_json(response).await;
        assert_eq!(list[0]["priority"]["name"], "Low");

        let response = send(&app, "DELETE", "/chamados/1", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app, "DELETE", "/chamados/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_description() {
        let app = seeded_app().await;

        let response = send(
            &app,
            "POST",
            "/chamados",
            Some(json!({ "titulo": "Access badge error", "Descricao": "   " })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["errors"][0]["field"], "Descricao");
    }

    #[tokio::test]
    async fn test_concurrent_update_and_finalize_keep_both_changes() {
        let app = seeded_app().await;
        create(&app, "Original title text", "Original", 2).await;

        let (updated, finalized) = tokio::join!(
            send(
                &app,
                "PUT",
                "/chamados/1",
                Some(json!({ "titulo": "Updated title text", "Descricao": "Updated" })),
            ),
            send(&app, "POST", "/chamados/1/Finalizar", None),
        );
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(finalized.status(), StatusCode::OK);

        let fetched = body_json(send(&app, "GET", "/chamados/1", None).await).await;
        assert_eq!(fetched["status"], "Finished");
        assert_eq!(fetched["title"], "Updated title text");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let app = seeded_app().await;

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/chamados")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap();
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(methods.contains(method), "{methods}");
        }
        assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .eq_ignore_ascii_case("content-type"));
    }

    #[tokio::test]
    async fn test_cors_header_on_simple_request() {
        let app = seeded_app().await;

        let request = Request::builder()
            .uri("/Prioridade")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    /// Ticket store whose calls never complete.
    struct StalledRepository;

    #[async_trait]
    impl TicketRepository for StalledRepository {
        async fn list_tickets(&self, _filter: &TicketFilter) -> RepoResult<Vec<Ticket>> {
            std::future::pending().await
        }

        async fn get_ticket(&self, _id: i64) -> RepoResult<Option<Ticket>> {
            std::future::pending().await
        }

        async fn create_ticket(&self, _ticket: &NewTicket) -> RepoResult<Ticket> {
            std::future::pending().await
        }

        async fn update_ticket(&self, _id: i64, _changes: &TicketChanges) -> RepoResult<Ticket> {
            std::future::pending().await
        }

        async fn finalize_ticket(&self, _id: i64) -> RepoResult<Ticket> {
            std::future::pending().await
        }

        async fn delete_ticket(&self, _id: i64) -> RepoResult<()> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let mut state = AppState::default();
        state.ticket_repo = Arc::new(StalledRepository);
        let app = create_app(state, Duration::from_millis(50));

        let response = send(&app, "GET", "/chamados", None).await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        // Routes that do not touch the stalled store still answer
        let response = send(&app, "GET", "/livez", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
