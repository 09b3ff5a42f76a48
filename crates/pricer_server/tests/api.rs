//! End-to-end tests against a server bound to an ephemeral port.

use std::net::SocketAddr;

use pricer_core::types::{ResultSet, ValuationResult};
use pricer_server::config::ServerConfig;
use pricer_server::error::ErrorBody;
use pricer_server::server::Server;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_test_server(config: ServerConfig) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = Server::new(config).unwrap();
    let handle = tokio::spawn(async move {
        server.run_with_listener(listener).await.ok();
    });

    (addr, handle)
}

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        worker_threads: 2,
        binomial_steps: 300,
        monte_carlo_paths: 20_000,
        monte_carlo_seed: Some(99),
        ..Default::default()
    }
}

fn request(model: &str, is_call: bool, is_european: bool) -> Value {
    json!({
        "strike": 100.0,
        "volatility": 20.0,
        "underlyingPrice": 100.0,
        "daysToExpiry": 250.0,
        "interestRate": 5.0,
        "isCall": is_call,
        "isEuropean": is_european,
        "dayCountConvention": 250.0,
        "modelType": model
    })
}

async fn price(client: &reqwest::Client, addr: SocketAddr, body: Value) -> ValuationResult {
    let response = client
        .post(format!("http://{}/pricing/calculate", addr))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_heartbeat_and_health() {
    let (addr, handle) = spawn_test_server(test_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/pricing/heartbeat", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Option Pricing Service"));

    let response = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    handle.abort();
}

#[tokio::test]
async fn test_every_model_prices_the_atm_call() {
    let (addr, handle) = spawn_test_server(test_config()).await;
    let client = reqwest::Client::new();

    for model in ["european", "american_black_scholes", "binomial_tree", "monte_carlo"] {
        let result = price(&client, addr, request(model, true, true)).await;
        assert!(
            (result.price - 10.4506).abs() < 0.35,
            "{}: {}",
            model,
            result.price
        );
    }

    handle.abort();
}

#[tokio::test]
async fn test_put_call_parity_over_http() {
    let (addr, handle) = spawn_test_server(test_config()).await;
    let client = reqwest::Client::new();

    let call = price(&client, addr, request("european", true, true)).await;
    let put = price(&client, addr, request("european", false, true)).await;
    let forward = 100.0 - 100.0 * (-0.05_f64).exp();
    approx::assert_relative_eq!(call.price - put.price, forward, epsilon = 1e-6);

    handle.abort();
}

#[tokio::test]
async fn test_american_put_dominates_european_put() {
    let (addr, handle) = spawn_test_server(test_config()).await;
    let client = reqwest::Client::new();

    for model in ["american", "binomial"] {
        let european = price(&client, addr, request(model, false, true)).await;
        let american = price(&client, addr, request(model, false, false)).await;
        assert!(american.price >= european.price, "{}", model);
    }

    handle.abort();
}

#[tokio::test]
async fn test_range_and_performance_tracking() {
    let (addr, handle) = spawn_test_server(test_config()).await;
    let client = reqwest::Client::new();

    let body = json!({
        "baseRequest": request("binomial", false, false),
        "rangeKey": "strike",
        "startValue": 80.0,
        "endValue": 120.0,
        "increment": 10.0
    });
    let response = client
        .post(format!("http://{}/pricing/range", addr))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let results: ResultSet = response.json().await.unwrap();
    assert_eq!(results.range_variables(), vec![80.0, 90.0, 100.0, 110.0, 120.0]);
    let prices: Vec<f64> = results.iter().map(|r| r.price).collect();
    assert!(prices.windows(2).all(|w| w[0] < w[1]));

    let stats: Value = client
        .get(format!("http://{}/performance/range-calculations", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalRangeCalculations"], 1);
    assert!(stats["modelPerformance"]["binomial"].as_f64().unwrap() >= 0.0);

    let reset = client
        .get(format!("http://{}/performance/range-calculations/reset", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(reset.status(), StatusCode::OK);

    let stats: Value = client
        .get(format!("http://{}/performance/range-calculations", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalRangeCalculations"], 0);
    assert!(stats.get("averageExecutionTimeMs").is_none());

    handle.abort();
}

#[tokio::test]
async fn test_concurrent_range_requests_keep_order() {
    let (addr, handle) = spawn_test_server(test_config()).await;
    let client = reqwest::Client::new();

    let requests = (0..4).map(|_| {
        let client = client.clone();
        async move {
            client
                .post(format!(
                    "http://{}/pricing/range/simple?rangeKey=underlyingPrice&startValue=50&endValue=150&increment=5",
                    addr
                ))
                .json(&request("european", true, true))
                .send()
                .await
                .unwrap()
                .json::<ResultSet>()
                .await
                .unwrap()
        }
    });

    let expected: Vec<f64> = (0..=20).map(|i| 50.0 + 5.0 * i as f64).collect();
    let all = join_all(requests.collect()).await;
    for results in &all {
        assert_eq!(results.range_variables(), expected);
    }
    assert!(all.windows(2).all(|w| w[0] == w[1]));

    handle.abort();
}

async fn join_all<F>(futures: Vec<F>) -> Vec<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
    let mut outputs = Vec::with_capacity(handles.len());
    for handle in handles {
        outputs.push(handle.await.unwrap());
    }
    outputs
}

#[tokio::test]
async fn test_calculation_failure_is_server_error() {
    let (addr, handle) = spawn_test_server(ServerConfig {
        binomial_steps: 10,
        ..test_config()
    })
    .await;
    let client = reqwest::Client::new();

    // Tiny volatility with a large rate leaves the lattice probability outside [0, 1]
    let mut body = request("binomial", true, true);
    body["volatility"] = json!(0.01);
    body["interestRate"] = json!(50.0);

    let response = client
        .post(format!("http://{}/pricing/calculate", addr))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorBody = response.json().await.unwrap();
    assert_eq!(error.error, "calculation_error");
    assert!(error.message.contains("binomial"));

    handle.abort();
}

#[tokio::test]
async fn test_validation_failures_are_bad_requests() {
    let (addr, handle) = spawn_test_server(test_config()).await;
    let client = reqwest::Client::new();

    let mut zero_days = request("european", true, true);
    zero_days["daysToExpiry"] = json!(0.0);
    let mut no_volatility = request("european", true, true);
    no_volatility["volatility"] = json!(0.0);

    for body in [zero_days, no_volatility] {
        let response = client
            .post(format!("http://{}/pricing/calculate", addr))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorBody = response.json().await.unwrap();
        assert_eq!(error.error, "invalid_input");
    }

    handle.abort();
}

#[test]
fn test_server_rejects_invalid_config() {
    tokio_test::assert_ok!(Server::new(test_config()).map(|_| ()));

    let result = Server::new(ServerConfig {
        monte_carlo_paths: 1,
        ..test_config()
    });
    tokio_test::assert_err!(result.map(|_| ()));
}
