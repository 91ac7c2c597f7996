use crate::{
    ProductId,
    client::RestRequest,
    data::{Product, ProductList, Stats},
};
use reqwest::Method;
use std::borrow::Cow;

/// `GET /products`
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductsRequest;

impl RestRequest for ProductsRequest {
    const METHOD: Method = Method::GET;
    type Response = ProductList;

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/products")
    }
}

/// `GET /products/{id}`
#[derive(Debug, Clone)]
pub struct ProductRequest {
    pub product_id: ProductId,
}

impl RestRequest for ProductRequest {
    const METHOD: Method = Method::GET;
    type Response = Product;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/products/{}", self.product_id))
    }
}

/// `GET /products/{id}/stats`
#[derive(Debug, Clone)]
pub struct ProductStatsRequest {
    pub product_id: ProductId,
}

impl RestRequest for ProductStatsRequest {
    const METHOD: Method = Method::GET;
    type Response = Stats;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("/products/{}/stats", self.product_id))
    }
}
