//! Integration tests for the Datagen Worker API.
//!
//! These tests spin up a real server instance and make HTTP requests to verify
//! the complete request/response cycle.

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

use datagen_worker::api::{AppState, create_router};
use datagen_worker::config::{
    AppConfig, DatasetConfig, GeneratorConfig, ObservabilityConfig, ServerConfig,
};
use datagen_worker::locale::Locale;
use datagen_worker::service::catalog::{self, IdentifierKind};

// ============================================================================
// Test Harness
// ============================================================================

/// Test server instance.
struct TestServer {
    addr: SocketAddr,
    client: Client,
    _temp_dir: TempDir,
}

impl TestServer {
    async fn new() -> Self {
        Self::with_metrics(true).await
    }

    async fn with_metrics(metrics_enabled: bool) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let en_dir = temp_dir.path().join("en");
        std::fs::create_dir_all(&en_dir).expect("Failed to create dataset dir");
        std::fs::write(
            en_dir.join("person.json"),
            json!({
                "names": {"male": ["John", "Peter"], "female": ["Mary", "Anna"]},
                "surnames": ["Smith", "Brown"],
                "gender": ["Male", "Female"],
                "occupation": ["Baker"],
                "nationality": ["Danish"]
            })
            .to_string(),
        )
        .expect("Failed to write dataset");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
            },
            generator: GeneratorConfig {
                default_locale: Locale::En,
                max_count: 100,
                checksum_max_attempts: 100,
            },
            dataset: DatasetConfig {
                data_dir: temp_dir.path().to_path_buf(),
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                log_format: "text".to_string(),
                metrics_enabled,
            },
        };

        let state = AppState::new(Arc::new(config));
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr,
            client: Client::new(),
            _temp_dir: temp_dir,
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Response {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }
}

/// API response structure.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    code: i32,
    #[allow(dead_code)]
    message: String,
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    fn is_success(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, Deserialize)]
struct IdentifierData {
    name: String,
    seed: Option<u64>,
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SchemaData {
    records: Vec<Map<String, Value>>,
}

async fn identifiers(server: &TestServer, path: &str) -> IdentifierData {
    let response = server.get(path).await;
    assert_eq!(response.status(), StatusCode::OK, "{path}");
    let body: ApiResponse<IdentifierData> = response.json().await.unwrap();
    assert!(body.is_success());
    body.data.unwrap()
}

// ============================================================================
// Health Endpoint Tests
// ============================================================================

#[derive(Debug, Deserialize)]
struct HealthData {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ReadyData {
    ready: bool,
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<HealthData> = response.json().await.unwrap();
    assert!(body.is_success());
    assert_eq!(body.data.unwrap().status, "healthy");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<ReadyData> = response.json().await.unwrap();
    assert!(body.is_success());
    assert!(body.data.unwrap().ready);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;
    identifiers(&server, "/v1/identifier/brazil.cpf?count=3").await;

    let response = server.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("datagen_up 1"));
    assert!(text.contains("datagen_generated_total{field=\"brazil.cpf\"} 3"));
}

#[tokio::test]
async fn test_metrics_disabled() {
    let server = TestServer::with_metrics(false).await;
    let response = server.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_catalog_lists_identifiers_and_fields() {
    let server = TestServer::new().await;
    let response = server.get("/v1/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<Value> = response.json().await.unwrap();
    let data = body.data.unwrap();
    let identifiers = data["identifiers"].as_array().unwrap();
    assert_eq!(identifiers.len(), catalog::CATALOG.len());
    assert!(
        identifiers
            .iter()
            .any(|entry| entry["name"] == "denmark.cpr" && entry["checksum"].is_string())
    );
    let fields = data["fields"].as_array().unwrap();
    assert!(fields.contains(&json!("person.full_name")));
    assert!(fields.contains(&json!("russia.inn")));
}

// ============================================================================
// Identifier Tests
// ============================================================================

#[tokio::test]
async fn test_generate_identifiers_are_valid() {
    let server = TestServer::new().await;
    for spec in &catalog::CATALOG {
        let data = identifiers(&server, &format!("/v1/identifier/{}?count=20", spec.name)).await;
        assert_eq!(data.name, spec.name);
        assert_eq!(data.values.len(), 20);
        for value in &data.values {
            assert!(catalog::validate(spec.kind, value), "{}: {value}", spec.name);
        }
    }
}

#[tokio::test]
async fn test_same_seed_same_values() {
    let server = TestServer::new().await;
    let path = "/v1/identifier/poland.pesel?count=10&seed=42";
    let first = identifiers(&server, path).await;
    let second = identifiers(&server, path).await;
    assert_eq!(first.seed, Some(42));
    assert_eq!(first.values, second.values);

    let other = identifiers(&server, "/v1/identifier/poland.pesel?count=10&seed=43").await;
    assert_ne!(first.values, other.values);
}

#[tokio::test]
async fn test_identifier_options() {
    let server = TestServer::new().await;

    let data = identifiers(&server, "/v1/identifier/brazil.cpf?mask=false&count=5").await;
    assert!(data.values.iter().all(|v| v.len() == 11));

    let data = identifiers(
        &server,
        "/v1/identifier/payment.credit_card?card_type=american_express&count=5",
    )
    .await;
    assert!(data.values.iter().all(|v| v.len() == 17 && v.starts_with('3')));

    let data = identifiers(&server, "/v1/identifier/code.isbn?format=isbn-13&locale=ru").await;
    assert!(data.values[0].starts_with("978-5-"), "{}", data.values[0]);

    let data = identifiers(
        &server,
        "/v1/identifier/poland.pesel?gender=female&birth_date=2005-03-09&count=5",
    )
    .await;
    for value in &data.values {
        assert!(value.starts_with("052309"), "{value}");
        let gender_digit = value.as_bytes()[9] - b'0';
        assert_eq!(gender_digit % 2, 0);
    }

    // Names are case-insensitive
    let data = identifiers(&server, "/v1/identifier/USA.SSN").await;
    assert!(catalog::validate(IdentifierKind::UsaSsn, &data.values[0]));
}

#[tokio::test]
async fn test_unknown_identifier() {
    let server = TestServer::new().await;
    let response = server.get("/v1/identifier/mars.passport").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 4001);
}

#[tokio::test]
async fn test_bad_enum_value() {
    let server = TestServer::new().await;
    let response = server
        .get("/v1/identifier/payment.credit_card?card_type=discover")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3003);
}

#[tokio::test]
async fn test_unsupported_service() {
    let server = TestServer::new().await;
    let response = server
        .get("/v1/identifier/usa.tracking_number?service=dhl")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3004);
}

#[tokio::test]
async fn test_count_validation_zero() {
    let server = TestServer::new().await;
    let response = server.get("/v1/identifier/brazil.cpf?count=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3001);
}

#[tokio::test]
async fn test_count_validation_too_large() {
    let server = TestServer::new().await;
    let response = server.get("/v1/identifier/brazil.cpf?count=101").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Schema Tests
// ============================================================================

#[tokio::test]
async fn test_schema_records() {
    let server = TestServer::new().await;
    let response = server
        .post(
            "/v1/schema",
            &json!({
                "seed": 7,
                "iterations": 3,
                "fields": [
                    {"name": "owner", "field": "person.full_name"},
                    {"name": "tax_id", "field": "cpf"},
                    {"name": "ip", "field": "internet:ip_v4"},
                    {"name": "phone", "field": "telephone", "null_probability": 1.0}
                ]
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<SchemaData> = response.json().await.unwrap();
    let records = body.data.unwrap().records;
    assert_eq!(records.len(), 3);
    for record in &records {
        assert!(record["owner"].as_str().unwrap().contains(' '));
        assert!(catalog::validate(
            IdentifierKind::BrazilCpf,
            record["tax_id"].as_str().unwrap()
        ));
        assert!(record["ip"].as_str().unwrap().parse::<std::net::Ipv4Addr>().is_ok());
        assert_eq!(record["phone"], Value::Null);
    }
}

#[tokio::test]
async fn test_schema_is_reproducible() {
    let server = TestServer::new().await;
    let request = json!({
        "seed": 11,
        "iterations": 5,
        "fields": [
            {"name": "card", "field": "payment.credit_card"},
            {"name": "price", "field": "finance.price", "null_probability": 0.5}
        ]
    });

    let first: ApiResponse<SchemaData> =
        server.post("/v1/schema", &request).await.json().await.unwrap();
    let second: ApiResponse<SchemaData> =
        server.post("/v1/schema", &request).await.json().await.unwrap();
    assert_eq!(first.data.unwrap().records, second.data.unwrap().records);
}

#[tokio::test]
async fn test_schema_errors() {
    let server = TestServer::new().await;

    let response = server
        .post(
            "/v1/schema",
            &json!({"fields": [{"name": "x", "field": "warp_drive"}]}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3004);

    let response = server
        .post(
            "/v1/schema",
            &json!({"iterations": 0, "fields": [{"name": "x", "field": "cpf"}]}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3002);

    // No person dataset for Japanese
    let response = server
        .post(
            "/v1/schema",
            &json!({"locale": "ja", "fields": [{"name": "x", "field": "person.name"}]}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3005);
}

#[tokio::test]
async fn test_unknown_route() {
    let server = TestServer::new().await;
    let response = server.get("/v1/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
