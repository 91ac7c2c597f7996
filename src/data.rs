use bytestring::ByteString;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{SeqAccess, Visitor},
};
use serde_with::{DefaultOnNull, serde_as};
use std::fmt;

pub mod decode;

/// `/products` 通常返回的交易对数量，仅用于预分配容量
pub const APPROX_PRODUCT_COUNT: usize = 250;
const MAX_PREALLOCATED_PRODUCTS: usize = APPROX_PRODUCT_COUNT * 4;

/// 交易对信息。
///
/// 所有数量与资金限制都保持为字符串，避免解析成浮点数造成精度丢失。
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// 产品ID，例如 "BTC-USD"
    pub id: ByteString,
    #[serde(default)]
    pub display_name: ByteString,
    pub base_currency: ByteString,
    pub quote_currency: ByteString,
    pub base_increment: ByteString,
    pub quote_increment: ByteString,
    // 新版接口已不再返回以下四个限制
    #[serde(default)]
    pub base_min_size: ByteString,
    #[serde(default)]
    pub base_max_size: ByteString,
    #[serde(default)]
    pub min_market_funds: ByteString,
    #[serde(default)]
    pub max_market_funds: ByteString,
    #[serde(default)]
    pub cancel_only: bool,
    #[serde(default)]
    pub limit_only: bool,
    #[serde(default)]
    pub post_only: bool,
    #[serde(default)]
    pub trading_disabled: bool,
    /// 例如 "online"、"delisted"
    pub status: ByteString,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub status_message: ByteString,
}

/// 交易对过去24小时的统计数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub open: ByteString,
    pub high: ByteString,
    pub low: ByteString,
    #[serde(default)]
    pub last: ByteString,
    /// 24小时成交量，以基础货币计
    pub volume: ByteString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_30day: Option<ByteString>,
}

/// 按 [`APPROX_PRODUCT_COUNT`] 预分配容量的产品列表
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProductList(pub Vec<Product>);

impl ProductList {
    pub fn into_inner(self) -> Vec<Product> {
        self.0
    }
}

impl<'de> Deserialize<'de> for ProductList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ProductListVisitor;

        impl<'de> Visitor<'de> for ProductListVisitor {
            type Value = ProductList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a list of products")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                // 不完全信任长度提示，避免一次性分配过大的内存
                let capacity = seq
                    .size_hint()
                    .map_or(APPROX_PRODUCT_COUNT, |hint| hint.min(MAX_PREALLOCATED_PRODUCTS));
                let mut products = Vec::with_capacity(capacity);
                while let Some(product) = seq.next_element()? {
                    products.push(product);
                }
                Ok(ProductList(products))
            }
        }

        deserializer.deserialize_seq(ProductListVisitor)
    }
}
