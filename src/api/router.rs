use axum::{http::HeaderName, middleware, routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::people;
use super::state::AppState;
use super::teams;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Resources
        .merge(teams::routes())
        .merge(people::routes())
        // Add state and middleware
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::account::Account;
    use crate::domain::pagination::PaginationSettings;
    use crate::infrastructure::auth::{hash_token, InMemoryAccountRegistry};
    use crate::infrastructure::roster::InMemoryRosterStore;

    const ADMIN_TOKEN: &str = "admin-token";
    const USER_TOKEN: &str = "user-token";

    fn app() -> Router {
        let accounts = InMemoryAccountRegistry::from_accounts([
            Account::new("admin@test.com", hash_token(ADMIN_TOKEN)).with_staff(true),
            Account::new("user@test.com", hash_token(USER_TOKEN)),
        ]);

        let state = AppState::new(
            Arc::new(InMemoryRosterStore::new()),
            Arc::new(accounts),
            PaginationSettings::default(),
        );

        create_router_with_state(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    async fn admin_post(app: &Router, uri: &str, body: Value) -> Value {
        let (status, value) = send(app, Method::POST, uri, Some(ADMIN_TOKEN), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{value}");
        value
    }

    async fn create_team(app: &Router, name: &str) -> Value {
        admin_post(app, "/teams/", json!({"name": name})).await
    }

    async fn create_person(app: &Router, first: &str, last: &str, email: &str) -> Value {
        admin_post(
            app,
            "/people/",
            json!({"first_name": first, "last_name": last, "email": email}),
        )
        .await
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&app, Method::GET, "/live", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"][0]["name"], "roster_store");
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-42");

        let response = app()
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_create_team_returns_list_shape() {
        let app = app();

        let team = create_team(&app, "Team 1").await;
        assert_eq!(team, json!({"id": 1, "name": "Team 1", "members": []}));
    }

    #[tokio::test]
    async fn test_create_person_returns_summary() {
        let app = app();

        let person = create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        assert_eq!(
            person,
            json!({
                "id": 1,
                "first_name": "John",
                "last_name": "Doe",
                "email": "john.doe@gmail.com"
            })
        );
    }

    #[tokio::test]
    async fn test_team_list_pagination_and_filter() {
        let app = app();

        for i in 1..=6 {
            create_team(&app, &format!("Team {}", i)).await;
        }
        create_team(&app, "Another").await;

        let (status, body) = send(&app, Method::GET, "/teams/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 7);
        assert_eq!(body["results"].as_array().unwrap().len(), 5);
        assert_eq!(body["next"], "/teams/?page=2");
        assert_eq!(body["previous"], Value::Null);

        let (_, body) = send(&app, Method::GET, "/teams/?page=2", None, None).await;
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
        assert_eq!(body["next"], Value::Null);
        assert_eq!(body["previous"], "/teams/");

        let (_, body) = send(&app, Method::GET, "/teams?name=team", None, None).await;
        assert_eq!(body["count"], 6);
        assert!(body["results"]
            .as_array()
            .unwrap()
            .iter()
            .all(|team| team["name"] != "Another"));

        let (_, body) = send(&app, Method::GET, "/teams/?page_size=100", None, None).await;
        assert_eq!(body["results"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_invalid_page_is_not_found() {
        let app = app();
        create_team(&app, "Team 1").await;

        for uri in ["/teams/?page=2", "/teams/?page=0", "/people/?page=abc"] {
            let (status, body) = send(&app, Method::GET, uri, None, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"]["message"], "Invalid page.");
        }

        let (status, body) = send(&app, Method::GET, "/people/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_person_list_filter_by_last_name() {
        let app = app();

        create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        create_person(&app, "First Name 1", "Last Name 1", "first1@test.com").await;

        let (status, body) = send(&app, Method::GET, "/people/?last_name=doe", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["last_name"], "Doe");
        assert_eq!(body["results"][0]["team_name"], Value::Null);
    }

    #[tokio::test]
    async fn test_non_admin_writes_forbidden_reads_allowed() {
        let app = app();

        let team = create_team(&app, "Team 1").await;
        let person = create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        let team_uri = format!("/teams/{}/", team["id"]);
        let person_uri = format!("/people/{}/", person["id"]);
        let assign_uri = format!("/people/{}/assign-to-team/", person["id"]);

        for token in [None, Some(USER_TOKEN)] {
            let writes = [
                (Method::POST, "/teams/".to_string(), json!({"name": "Team 2"})),
                (Method::PATCH, team_uri.clone(), json!({"name": "Renamed"})),
                (Method::PUT, team_uri.clone(), json!({"name": "Renamed"})),
                (Method::DELETE, team_uri.clone(), json!({})),
                (
                    Method::POST,
                    "/people/".to_string(),
                    json!({"first_name": "A", "last_name": "B", "email": "a@b.com"}),
                ),
                (Method::PATCH, person_uri.clone(), json!({"last_name": "Smith"})),
                (Method::DELETE, person_uri.clone(), json!({})),
                (Method::PUT, assign_uri.clone(), json!({"team": team["id"]})),
            ];

            for (method, uri, body) in writes {
                let (status, response) = send(&app, method.clone(), &uri, token, Some(body)).await;
                assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
                assert_eq!(response["error"]["type"], "permission_error");
            }

            for uri in ["/teams/", team_uri.as_str(), "/people/", person_uri.as_str()] {
                let (status, _) = send(&app, Method::GET, uri, token, None).await;
                assert_eq!(status, StatusCode::OK, "GET {uri}");
            }
        }

        // Nothing was changed by the rejected writes
        let (_, body) = send(&app, Method::GET, &team_uri, None, None).await;
        assert_eq!(body["name"], "Team 1");
        let (_, body) = send(&app, Method::GET, "/teams/", None, None).await;
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_token_is_unauthorized() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/teams/", Some("nope"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "authentication_error");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/teams/")
                    .header(header::AUTHORIZATION, "Token abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_name_and_email_are_rejected() {
        let app = app();

        create_team(&app, "Team 1").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/teams/",
            Some(ADMIN_TOKEN),
            Some(json!({"name": "Team 1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "name");

        create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/people/",
            Some(ADMIN_TOKEN),
            Some(json!({"first_name": "Jane", "last_name": "Doe", "email": "john.doe@gmail.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "email");

        let (_, body) = send(&app, Method::GET, "/people/", None, None).await;
        assert_eq!(body["count"], 1);
        let (_, body) = send(&app, Method::GET, "/teams/", None, None).await;
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/people/",
            Some(ADMIN_TOKEN),
            Some(json!({"first_name": "John", "last_name": "Doe"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "email");
        assert_eq!(body["error"]["message"], "This field is required.");

        let (status, body) = send(
            &app,
            Method::POST,
            "/people/",
            Some(ADMIN_TOKEN),
            Some(json!({"first_name": "John", "last_name": "Doe", "email": "not-an-email"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "email");

        let (status, body) = send(
            &app,
            Method::POST,
            "/teams/",
            Some(ADMIN_TOKEN),
            Some(json!({"name": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "name");
    }

    #[tokio::test]
    async fn test_permission_is_checked_before_validation() {
        let app = app();

        let (status, _) = send(&app, Method::POST, "/teams/", Some(USER_TOKEN), Some(json!({}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, Method::POST, "/people/", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_forbidden_writes_never_read_the_body() {
        let app = app();

        let team = create_team(&app, "Team 1").await;
        let person = create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        let team_uri = format!("/teams/{}/", team["id"]);
        let person_uri = format!("/people/{}/", person["id"]);
        let assign_uri = format!("/people/{}/assign-to-team/", person["id"]);

        let writes = [
            (Method::POST, "/teams/".to_string()),
            (Method::PUT, team_uri.clone()),
            (Method::PATCH, team_uri),
            (Method::POST, "/people/".to_string()),
            (Method::PUT, person_uri.clone()),
            (Method::PATCH, person_uri),
            (Method::PUT, assign_uri),
        ];

        for token in [None, Some(USER_TOKEN)] {
            for (method, uri) in &writes {
                // No body and no content type
                let (status, body) = send(&app, method.clone(), uri, token, None).await;
                assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri} without body");
                assert_eq!(body["error"]["type"], "permission_error");

                // Broken JSON
                let mut builder = Request::builder()
                    .method(method.clone())
                    .uri(uri.as_str())
                    .header(header::CONTENT_TYPE, "application/json");
                if let Some(token) = token {
                    builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
                }
                let response = app
                    .clone()
                    .oneshot(builder.body(Body::from("{not json")).unwrap())
                    .await
                    .unwrap();
                assert_eq!(
                    response.status(),
                    StatusCode::FORBIDDEN,
                    "{method} {uri} with broken body"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_admin_write_without_content_type() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/teams/", Some(ADMIN_TOKEN), None).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let app = app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/teams/")
                    .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let app = app();

        for uri in ["/teams/99/", "/people/99", "/teams/abc/"] {
            let (status, body) = send(&app, Method::GET, uri, None, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"]["type"], "not_found_error");
        }

        let (status, _) = send(&app, Method::DELETE, "/people/99/", Some(ADMIN_TOKEN), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/people/99/assign-to-team/",
            Some(ADMIN_TOKEN),
            Some(json!({"team": null})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_and_patch_updates() {
        let app = app();

        let team = create_team(&app, "Team 1").await;
        let team_uri = format!("/teams/{}/", team["id"]);

        let (status, body) = send(&app, Method::PUT, &team_uri, Some(ADMIN_TOKEN), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "name");

        let (status, body) = send(
            &app,
            Method::PATCH,
            &team_uri,
            Some(ADMIN_TOKEN),
            Some(json!({"name": "Renamed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Renamed", "members": []}));

        let person = create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        let person_uri = format!("/people/{}", person["id"]);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &person_uri,
            Some(ADMIN_TOKEN),
            Some(json!({"first_name": "Jane"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first_name"], "Jane");
        assert_eq!(body["last_name"], "Doe");
        assert!(body.get("team").is_none());

        let (status, body) = send(
            &app,
            Method::PUT,
            &person_uri,
            Some(ADMIN_TOKEN),
            Some(json!({"first_name": "Jane", "last_name": "Smith"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "email");
    }

    #[tokio::test]
    async fn test_assign_to_unknown_team() {
        let app = app();

        let person = create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/people/{}/assign-to-team/", person["id"]),
            Some(ADMIN_TOKEN),
            Some(json!({"team": 42})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "team");
    }

    #[tokio::test]
    async fn test_assign_absent_or_null_team_clears() {
        let app = app();

        let team = create_team(&app, "Team 1").await;
        let person = create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        let assign_uri = format!("/people/{}/assign-to-team", person["id"]);

        for clear in [json!({"team": null}), json!({})] {
            let (status, body) = send(
                &app,
                Method::PUT,
                &assign_uri,
                Some(ADMIN_TOKEN),
                Some(json!({"team": team["id"]})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"id": 1, "team": 1}));

            let (status, body) =
                send(&app, Method::PUT, &assign_uri, Some(ADMIN_TOKEN), Some(clear)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"id": 1, "team": null}));
        }
    }

    #[tokio::test]
    async fn test_full_roster_scenario() {
        let app = app();

        let team = create_team(&app, "Team 1").await;
        let person = create_person(&app, "John", "Doe", "john.doe@gmail.com").await;
        let person_uri = format!("/people/{}/", person["id"]);
        let team_uri = format!("/teams/{}/", team["id"]);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/people/{}/assign-to-team/", person["id"]),
            Some(ADMIN_TOKEN),
            Some(json!({"team": team["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, detail) = send(&app, Method::GET, &person_uri, None, None).await;
        assert_eq!(detail["team"], json!({"id": 1, "name": "Team 1"}));

        let (_, listed) = send(&app, Method::GET, "/people/", None, None).await;
        assert_eq!(listed["results"][0]["team_name"], "Team 1");

        let (_, team_detail) = send(&app, Method::GET, &team_uri, None, None).await;
        assert_eq!(
            team_detail["members"],
            json!([{
                "id": 1,
                "first_name": "John",
                "last_name": "Doe",
                "email": "john.doe@gmail.com"
            }])
        );

        let (_, teams) = send(&app, Method::GET, "/teams/", None, None).await;
        assert_eq!(teams["results"][0]["members"], json!(["John Doe"]));

        let (status, body) = send(&app, Method::DELETE, &team_uri, Some(ADMIN_TOKEN), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, detail) = send(&app, Method::GET, &person_uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["team"], Value::Null);

        let (status, _) = send(&app, Method::GET, &team_uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
