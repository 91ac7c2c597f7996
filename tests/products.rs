use httpmock::prelude::*;
use krypto::{CoinbaseClient, Credentials, Error};
use serde_json::json;

const SECRET: &str = "dGVzdHNlY3JldA==";

fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn client(server: &MockServer) -> CoinbaseClient {
    CoinbaseClient::builder()
        .credentials(Credentials::new("my-key", SECRET, "my-passphrase"))
        .executor(http_client())
        .base_http_url(&server.base_url())
        .build()
        .unwrap()
}

fn product(id: &str, base: &str, quote: &str) -> serde_json::Value {
    json!({
        "id": id,
        "display_name": format!("{base}/{quote}"),
        "base_currency": base,
        "quote_currency": quote,
        "base_increment": "0.00000001",
        "quote_increment": "0.01",
        "base_min_size": "0.001",
        "base_max_size": "10000",
        "min_market_funds": "10",
        "max_market_funds": "1000000",
        "cancel_only": false,
        "limit_only": false,
        "post_only": false,
        "trading_disabled": false,
        "status": "online",
        "status_message": ""
    })
}

#[tokio::test]
async fn list_products_sends_signed_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/products")
                .header("cb-access-key", "my-key")
                .header("cb-access-passphrase", "my-passphrase")
                .header("content-type", "application/json")
                .header_exists("cb-access-sign")
                .header_exists("cb-access-timestamp");
            then.status(200).json_body(json!([
                product("BTC-USD", "BTC", "USD"),
                product("ETH-EUR", "ETH", "EUR"),
                product("LTC-BTC", "LTC", "BTC"),
            ]));
        })
        .await;

    let products = client(&server).list_products().await.unwrap();

    mock.assert_async().await;
    assert_eq!(products.len(), 3);
    assert_eq!(products[1].id, "ETH-EUR");
    assert_eq!(products[1].display_name, "ETH/EUR");
    assert_eq!(products[2].min_market_funds, "10");
}

#[tokio::test]
async fn get_product_stats_hits_stats_path() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/products/BTC-USD/stats");
            then.status(200).json_body(json!({
                "open": "5414.18",
                "high": "5542.11",
                "low": "5398.37",
                "last": "5484.53",
                "volume": "8195.12",
                "volume_30day": "402981.60"
            }));
        })
        .await;

    let stats = client(&server).get_product_stats("BTC-USD").await.unwrap();

    mock.assert_async().await;
    assert_eq!(stats.low, "5398.37");
    assert_eq!(stats.volume_30day.as_deref(), Some("402981.60"));
}

#[tokio::test]
async fn get_product_reports_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products/NOPE-USD");
            then.status(404).json_body(json!({ "message": "NotFound" }));
        })
        .await;

    let err = client(&server).get_product("NOPE-USD").await.unwrap_err();

    match err {
        Error::Status { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "NotFound");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // 绑定后立即释放，得到一个没有监听的端口
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base_url = format!("http://127.0.0.1:{port}/");
    let client = CoinbaseClient::builder()
        .credentials(Credentials::new("my-key", SECRET, "my-passphrase"))
        .executor(http_client())
        .base_http_url(&base_url)
        .build()
        .unwrap();

    let err = client.list_products().await.unwrap_err();

    assert!(matches!(err, Error::Transport { .. }), "{err:?}");
}
