//! Employee API Integration Tests
//!
//! Drives the assembled router with in-process requests against an in-memory
//! SQLite database and the in-memory audit store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tokio_test::assert_ok;
use tower::ServiceExt;

use rh_config::HttpConfig;
use rh_platform::employee::SqliteEmployeeRepository;
use rh_platform::{
    build_app, AuditLogEntry, AuditLogStore, EmployeeRepository, EmployeeService,
    InMemoryAuditLogStore, Result, RhError,
};

struct TestApp {
    router: Router,
    employees: Arc<dyn EmployeeRepository>,
    audit: Arc<InMemoryAuditLogStore>,
}

async fn employee_repo() -> Arc<dyn EmployeeRepository> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let repo = SqliteEmployeeRepository::new(pool);
    repo.init_schema().await.unwrap();
    Arc::new(repo)
}

async fn test_app() -> TestApp {
    let employees = employee_repo().await;
    let audit = Arc::new(InMemoryAuditLogStore::new());
    let service = Arc::new(EmployeeService::new(employees.clone(), audit.clone()));

    TestApp {
        router: build_app(service, &HttpConfig::default()),
        employees,
        audit,
    }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, json)
}

fn ana() -> Value {
    json!({
        "name": "Ana",
        "address": "X",
        "salary": 1000,
        "department": "HR",
        "admissionDate": "2024-01-01"
    })
}

mod employee_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_201_with_location() {
        let app = test_app().await;

        let (status, headers, body) = send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[header::LOCATION], "/Funcionario/1");
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Ana");
    }

    #[tokio::test]
    async fn test_get_after_create_returns_same_fields() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;

        let (status, _, body) = send(&app.router, Method::GET, "/Funcionario/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Ana");
        assert_eq!(body["address"], "X");
        assert_eq!(body["salary"].as_f64(), Some(1000.0));
        assert_eq!(body["department"], "HR");
        assert_eq!(body["admissionDate"], "2024-01-01T00:00:00");
    }

    #[tokio::test]
    async fn test_list_all_returns_every_employee() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;

        let (status, _, body) = send(&app.router, Method::GET, "/Funcionario/ListarTodos", None).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_list_all_on_empty_store_is_404() {
        let app = test_app().await;

        let (status, _, body) = send(&app.router, Method::GET, "/Funcionario/ListarTodos", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_replaces_fields_with_empty_body() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;

        let replacement = json!({
            "name": "Ana Souza",
            "address": "Y",
            "salary": 1500.5,
            "department": "Finance",
            "admissionDate": "2023-06-15T08:30:00"
        });
        let (status, _, body) = send(&app.router, Method::PUT, "/Funcionario/1", Some(replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (_, _, body) = send(&app.router, Method::GET, "/Funcionario/1", None).await;
        assert_eq!(body["name"], "Ana Souza");
        assert_eq!(body["address"], "Y");
        assert_eq!(body["salary"].as_f64(), Some(1500.5));
        assert_eq!(body["department"], "Finance");
        assert_eq!(body["admissionDate"], "2023-06-15T08:30:00");
    }

    #[tokio::test]
    async fn test_delete_returns_204_and_removes_employee() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;

        let (status, _, _) = send(&app.router, Method::DELETE, "/Funcionario/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(&app.router, Method::GET, "/Funcionario/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, _, body) = send(&app.router, Method::GET, "/Funcionario/ListarTodos", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["id"], 2);
    }

    #[tokio::test]
    async fn test_missing_employee_is_404_for_every_operation() {
        let app = test_app().await;

        for (method, uri, body) in [
            (Method::GET, "/Funcionario/999", None),
            (Method::GET, "/Funcionario/999/Log", None),
            (Method::PUT, "/Funcionario/999", Some(ana())),
            (Method::DELETE, "/Funcionario/999", None),
        ] {
            let (status, _, _) = send(&app.router, method.clone(), uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        }
        assert!(app.audit.is_empty());
    }

    #[tokio::test]
    async fn test_salary_is_echoed_with_two_places() {
        let app = test_app().await;
        let mut body = ana();
        body["salary"] = json!(1234.567);

        let (status, _, created) = send(&app.router, Method::POST, "/Funcionario", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let salary = created["salary"].as_f64().unwrap();
        assert!((salary - 1234.57).abs() < 1e-9, "salary = {salary}");

        let (_, _, fetched) = send(&app.router, Method::GET, "/Funcionario/1", None).await;
        assert_eq!(fetched["salary"], created["salary"]);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_rejected() {
        let app = test_app().await;

        let (status, _, _) = send(&app.router, Method::GET, "/Funcionario/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod audit_log_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_produces_single_insertion_entry() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;

        let (status, _, body) = send(&app.router, Method::GET, "/Funcionario/1/Log", None).await;

        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["action"], "Insertion");
        assert_eq!(entries[0]["partitionKey"], "1");
        assert_eq!(entries[0]["employeeId"], 1);
        assert_eq!(entries[0]["name"], "Ana");
        assert!(entries[0]["rowKey"].as_str().is_some_and(|k| !k.is_empty()));
    }

    #[tokio::test]
    async fn test_each_mutation_appends_one_entry() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;

        let mut renamed = ana();
        renamed["name"] = json!("Ana Souza");
        send(&app.router, Method::PUT, "/Funcionario/1", Some(renamed.clone())).await;
        send(&app.router, Method::PUT, "/Funcionario/1", Some(renamed)).await;

        let (_, _, body) = send(&app.router, Method::GET, "/Funcionario/1/Log", None).await;
        let actions: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["action"].as_str().unwrap())
            .collect();
        assert_eq!(actions, vec!["Insertion", "Update", "Update"]);
        assert_eq!(body[1]["name"], "Ana Souza");

        let row_keys: std::collections::HashSet<_> =
            app.audit.all().into_iter().map(|e| e.row_key).collect();
        assert_eq!(row_keys.len(), 3);
    }

    #[tokio::test]
    async fn test_removal_entry_survives_deletion() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/Funcionario", Some(ana())).await;
        send(&app.router, Method::DELETE, "/Funcionario/1", None).await;

        // The endpoint requires a live employee; the entries stay in the store.
        let (status, _, _) = send(&app.router, Method::GET, "/Funcionario/1/Log", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let history = assert_ok!(app.audit.find_by_partition("1").await);
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action.as_str(), "Removal");
        assert_eq!(history[1].name, "Ana");
    }

    #[tokio::test]
    async fn test_log_of_employee_without_entries_is_404() {
        let app = test_app().await;
        let data = serde_json::from_value(ana()).unwrap();
        assert_ok!(app.employees.insert(&data).await);

        let (status, _, _) = send(&app.router, Method::GET, "/Funcionario/1/Log", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod failure_tests {
    use super::*;

    struct FailingAuditLogStore;

    #[async_trait]
    impl AuditLogStore for FailingAuditLogStore {
        async fn ensure_table(&self) -> Result<()> {
            Ok(())
        }

        async fn upsert(&self, _entry: &AuditLogEntry) -> Result<()> {
            Err(RhError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find_by_partition(&self, _partition_key: &str) -> Result<Vec<AuditLogEntry>> {
            Ok(Vec::new())
        }

        async fn ping(&self) -> Result<()> {
            Err(RhError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    async fn failing_app() -> (Router, Arc<dyn EmployeeRepository>) {
        let employees = employee_repo().await;
        let service = Arc::new(EmployeeService::new(
            employees.clone(),
            Arc::new(FailingAuditLogStore),
        ));
        (build_app(service, &HttpConfig::default()), employees)
    }

    #[tokio::test]
    async fn test_audit_failure_is_500_but_employee_is_persisted() {
        let (router, employees) = failing_app().await;

        let (status, _, body) = send(&router, Method::POST, "/Funcionario", Some(ana())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "INTERNAL_ERROR");

        let stored = assert_ok!(employees.find_by_id(1).await);
        assert_eq!(stored.map(|e| e.name), Some("Ana".to_string()));
    }

    #[tokio::test]
    async fn test_readiness_reports_unreachable_audit_store() {
        let (router, _) = failing_app().await;

        let (status, _, body) = send(&router, Method::GET, "/health/ready", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "DOWN");
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoints_report_up() {
        let app = test_app().await;

        let (status, _, body) = send(&app.router, Method::GET, "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");

        let (status, _, body) = send(&app.router, Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");

        let (status, _, body) = send(&app.router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = test_app().await;

        let (status, _, body) = send(&app.router, Method::GET, "/q/openapi", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/Funcionario/{id}/Log"].is_object());
    }
}
