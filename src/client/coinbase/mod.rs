pub mod auth;
pub mod model;

use crate::{
    Error, Result,
    client::{DataGetter, HttpExecutor, RestRequest},
    data::{Product, Stats, decode::decode_response},
};
use auth::Credentials;
use chrono::Utc;
use model::{ProductRequest, ProductStatsRequest, ProductsRequest};
use reqwest::{
    Body, Method, Request, Response,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use tracing::debug;
use url::Url;

pub const API_URL: &str = "https://api.pro.coinbase.com/";

const CB_ACCESS_KEY: HeaderName = HeaderName::from_static("cb-access-key");
const CB_ACCESS_SIGN: HeaderName = HeaderName::from_static("cb-access-sign");
const CB_ACCESS_PASSPHRASE: HeaderName = HeaderName::from_static("cb-access-passphrase");
const CB_ACCESS_TIMESTAMP: HeaderName = HeaderName::from_static("cb-access-timestamp");
const APPLICATION_JSON: &str = "application/json";

/// Coinbase Pro REST 客户端。
///
/// 凭证在创建后不可修改；网络请求交给注入的 [`HttpExecutor`] 完成。
#[derive(Debug)]
pub struct CoinbaseClient<E = reqwest::Client> {
    base_http_url: Url,
    credentials: Credentials,
    executor: Option<E>,
}

#[bon::bon]
impl<E: HttpExecutor> CoinbaseClient<E> {
    #[builder]
    pub fn new(
        credentials: Credentials,
        executor: Option<E>,
        #[builder(default = API_URL)] base_http_url: &str,
    ) -> Result<Self> {
        let base_http_url = base_http_url
            .parse::<Url>()
            .map_err(|e| Error::InvalidInput(format!("invalid base url {base_http_url:?}: {e}")))?;
        if base_http_url.cannot_be_a_base() {
            return Err(Error::InvalidInput(format!(
                "base url {base_http_url} cannot have a path"
            )));
        }

        Ok(CoinbaseClient {
            base_http_url,
            credentials,
            executor,
        })
    }

    /// 将请求路径按路径段拼接到基础 URL 上，并附加查询参数。
    ///
    /// 空路径段会被忽略，因此不会出现重复的 `/`。
    pub fn resolve_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_http_url.clone();

        url.path_segments_mut()
            .map_err(|()| Error::InvalidInput("base url cannot have a path".to_owned()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// 签名并发送一个请求。
    ///
    /// 时间戳只计算一次，同时用于签名和 `CB-ACCESS-TIMESTAMP` 请求头。
    /// 签名使用实际请求的路径，不包含查询参数和请求体。
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Body>,
    ) -> Result<Response> {
        let Some(executor) = &self.executor else {
            return Err(Error::NotConfigured);
        };

        let url = self.resolve_url(path, query)?;
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self
            .credentials
            .sign(&timestamp, method.as_str(), url.path())?;

        let mut headers = HeaderMap::with_capacity(5);
        headers.insert(CB_ACCESS_KEY, header_value(self.credentials.key())?);
        headers.insert(CB_ACCESS_SIGN, header_value(&signature)?);
        let mut passphrase = header_value(self.credentials.passphrase())?;
        passphrase.set_sensitive(true);
        headers.insert(CB_ACCESS_PASSPHRASE, passphrase);
        headers.insert(CB_ACCESS_TIMESTAMP, header_value(&timestamp)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

        debug!(%method, %url, "sending request");

        let mut request = Request::new(method, url);
        *request.headers_mut() = headers;
        *request.body_mut() = body;

        executor
            .execute(request)
            .await
            .map_err(|e| Error::transport("perform request", e))
    }

    /// 获取所有可交易的交易对
    pub async fn list_products(&self) -> Result<Vec<Product>>
    where
        Self: DataGetter<ProductsRequest>,
    {
        let products = self.get_data(ProductsRequest).await?.into_inner();
        debug!(count = products.len(), "decoded products");
        Ok(products)
    }

    /// 根据产品ID获取单个交易对
    pub async fn get_product(&self, product_id: &str) -> Result<Product>
    where
        Self: DataGetter<ProductRequest>,
    {
        let product_id = checked_product_id(product_id)?;
        self.get_data(ProductRequest { product_id }).await
    }

    /// 获取交易对过去24小时的统计数据
    pub async fn get_product_stats(&self, product_id: &str) -> Result<Stats>
    where
        Self: DataGetter<ProductStatsRequest>,
    {
        let product_id = checked_product_id(product_id)?;
        self.get_data(ProductStatsRequest { product_id }).await
    }
}

impl<E, R> DataGetter<R> for CoinbaseClient<E>
where
    E: HttpExecutor + Sync,
    R: RestRequest + Send,
{
    async fn get_data(&self, request: R) -> Result<R::Response> {
        let response = self.dispatch(R::METHOD, &request.path(), &[], None).await?;
        decode_response(response).await
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidInput("value is not allowed in a request header".to_owned()))
}

/// 产品ID必须是单个路径段，否则请求会落到其他端点上
fn checked_product_id(product_id: &str) -> Result<crate::ProductId> {
    if product_id.is_empty() {
        return Err(Error::InvalidInput("product id must not be empty".to_owned()));
    }
    if product_id.contains('/') || matches!(product_id, "." | "..") {
        return Err(Error::InvalidInput(format!(
            "product id {product_id:?} is not a single path segment"
        )));
    }
    Ok(product_id.into())
}
