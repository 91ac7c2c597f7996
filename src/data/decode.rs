//! 将 HTTP 响应体解码为具体的数据类型。
//!
//! 响应体以流的方式交给 `serde_json`，不会先完整读入内存。

use crate::{Error, Result};
use futures_util::{StreamExt, TryStreamExt};
use reqwest::Response;
use serde::{Deserialize, de::DeserializeOwned};
use tokio::io::AsyncRead;
use tokio_util::io::{StreamReader, SyncIoBridge};
use tracing::warn;

/// 接口出错时返回的响应体，例如 `{"message": "NotFound"}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// 从字节流中解码出一个 `T`。
///
/// `serde_json` 只能读取同步的 [`std::io::Read`]，因此在阻塞线程池上运行解码，
/// 通过 [`SyncIoBridge`] 按需拉取数据。
pub async fn decode<T, R>(body: R) -> Result<T>
where
    T: DeserializeOwned + Send + 'static,
    R: AsyncRead + Unpin + Send + 'static,
{
    let reader = SyncIoBridge::new(body);

    tokio::task::spawn_blocking(move || serde_json::from_reader(reader))
        .await
        .map_err(|e| Error::decode("response body", e))?
        .map_err(|e| Error::decode("response body", e))
}

/// 检查状态码，然后以流的方式解码响应体
pub async fn decode_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned + Send + 'static,
{
    let response = error_for_status(response).await?;

    let stream = response
        .bytes_stream()
        .map_err(std::io::Error::other)
        .boxed();

    decode(StreamReader::new(stream)).await
}

/// 非 2xx 响应转换为 [`Error::Status`]，附带接口返回的错误信息
pub async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let text = response
        .text()
        .await
        .map_err(|e| Error::transport("read error response", e))?;
    let message = match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => body.message,
        Err(_) => text,
    };

    warn!(%status, %url, %message, "request rejected");

    Err(Error::Status { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Product, ProductList, Stats};
    use reqwest::StatusCode;

    fn response(status: u16, body: &'static str) -> Response {
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn decode_reads_from_stream() {
        let body: &'static [u8] =
            br#"{"open":"1.0","high":"2.0","low":"0.5","last":"1.5","volume":"100","volume_30day":"3000"}"#;
        let stats: Stats = decode(body).await.unwrap();

        assert_eq!(stats.high, "2.0");
        assert_eq!(stats.volume_30day.as_deref(), Some("3000"));
    }

    #[tokio::test]
    async fn decode_rejects_malformed_json() {
        let body: &'static [u8] = br#"[{"id": "BTC-USD""#;
        let err = decode::<ProductList, _>(body).await.unwrap_err();

        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn decode_rejects_shape_mismatch() {
        let body: &'static [u8] = br#"{"message": "not a product"}"#;
        let err = decode::<Product, _>(body).await.unwrap_err();

        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn decode_response_streams_successful_body() {
        let ProductList(products) = decode_response(response(200, "[]")).await.unwrap();

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn decode_response_surfaces_api_message() {
        let err = decode_response::<Product>(response(404, r#"{"message":"NotFound"}"#))
            .await
            .unwrap_err();

        match err {
            Error::Status { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "NotFound");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn decode_response_keeps_raw_text_when_not_json() {
        let err = decode_response::<Product>(response(502, "Bad Gateway"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Status { message, .. } if message == "Bad Gateway"));
    }
}
