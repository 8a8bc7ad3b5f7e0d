//! End-to-end HTTP tests.

mod common;

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use resumatch::embedding::{Embedder, MockEmbedder, vector_for_percent};
use resumatch::ranking::RankerConfig;
use resumatch::scoring::Tier;

use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::{TestClient, TestClientError};

const JD: &str = "Site reliability engineer: Kubernetes, Terraform, on-call";

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let health = TestClient::new(server.url())
        .health()
        .await
        .expect("Health check should succeed");
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_ready_endpoint_reports_stub_embedder() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let ready = TestClient::new(server.url()).ready().await.unwrap();
    assert_eq!(ready.status, "ok");
    assert_eq!(ready.embedder_mode, "stub");
    assert_eq!(ready.embedding_dim, resumatch::constants::DEFAULT_EMBEDDING_DIM);
}

#[tokio::test]
async fn test_stub_embedder_ranks_identical_text_first() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let body = serde_json::json!({
        "job_description": JD,
        "documents": [
            {"id": "unrelated", "text": "Pastry chef with ten years of laminated dough"},
            {"id": "verbatim", "text": format!("  {JD}\n")}
        ]
    });

    let (response, status) = client.rank(&body).await.unwrap();
    assert_eq!(status, "ranked");
    assert_eq!(response.summary.count, 2);
    assert_eq!(response.results[0].id, "verbatim");
    assert_eq!(response.results[0].score, 100.0);
    assert_eq!(response.results[0].tier, Tier::StrongFit);
    assert_eq!(response.summary.top_score, 100.0);
}

#[tokio::test]
async fn test_mixed_batch_over_http() {
    let mock = MockEmbedder::new(2)
        .with_vector(JD, vec![1.0, 0.0])
        .with_vector("kubernetes operator author", vector_for_percent(83.4))
        .with_vector("terraform modules", vector_for_percent(57.0))
        .with_delay("hangs forever", Duration::from_millis(500));
    let config = TestServerConfig {
        ranker: RankerConfig::default().with_embed_timeout(Duration::from_millis(100)),
        ..TestServerConfig::default().with_embedder(Arc::new(mock) as Arc<dyn Embedder>)
    };

    let server = spawn_test_server(config).await.expect("Server should start");
    let client = TestClient::new(server.url());

    let body = serde_json::json!({
        "job_description": JD,
        "documents": [
            {"id": "slow.pdf", "text": "hangs forever"},
            {"id": "tf.pdf", "pdf_base64": "data:application/pdf;base64,bm90IGEgcGRm"},
            {"id": "k8s.txt", "text": "kubernetes operator author"},
            {"id": "terraform.txt", "text": "terraform modules"},
            {"id": "junk.pdf", "pdf_base64": STANDARD.encode([0u8, 1, 2, 3])}
        ]
    });

    let (response, _) = client.rank(&body).await.unwrap();
    assert_eq!(response.results.len(), 5);

    let ids: Vec<&str> = response.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(&ids[..2], &["k8s.txt", "terraform.txt"]);
    assert_eq!(response.results[0].recommendation, "Strong Fit");
    assert_eq!(response.results[1].recommendation, "Moderate Fit");

    for failed in &response.results[2..] {
        assert_eq!(failed.score, 0.0);
        assert!(failed.error.is_some());
        assert!(failed.recommendation.starts_with("Error: "));
    }

    let slow = response.results.iter().find(|r| r.id == "slow.pdf").unwrap();
    assert!(slow.error.as_deref().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_empty_batch_is_bad_request() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let err = TestClient::new(server.url())
        .rank(&serde_json::json!({"job_description": JD, "documents": []}))
        .await
        .unwrap_err();
    assert!(matches!(err, TestClientError::BadRequest(_)));
}
