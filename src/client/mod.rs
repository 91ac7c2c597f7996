use crate::Result;
use reqwest::{Method, Request, Response};
use serde::de::DeserializeOwned;
use std::{borrow::Cow, future::Future};

pub mod coinbase;

/// 执行一个已经构建好的 HTTP 请求。
///
/// 客户端只负责构建和签名请求，真正的网络传输交给实现该 trait 的执行器，
/// 测试时可以替换成返回固定响应的桩。
pub trait HttpExecutor {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = std::result::Result<Response, Self::Error>> + Send;
}

impl HttpExecutor for reqwest::Client {
    type Error = reqwest::Error;

    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = std::result::Result<Response, Self::Error>> + Send {
        reqwest::Client::execute(self, request)
    }
}

// 通常你需要为每个接口实现该trait
pub trait RestRequest {
    const METHOD: Method;

    /// 接口返回的 JSON 会被解码成这个类型
    type Response: DeserializeOwned + Send + 'static;

    /// 请求路径，不含查询参数
    fn path(&self) -> Cow<'_, str>;
}

pub trait DataGetter<R: RestRequest> {
    fn get_data(&self, request: R) -> impl Future<Output = Result<R::Response>> + Send;
}
