use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD_ENGINE};
use bytestring::ByteString;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Coinbase Pro API 凭证。
///
/// `secret` 是 base64 编码的共享密钥，创建后不会被修改。
pub struct Credentials {
    pub(crate) key: ByteString,            // 即 CB-ACCESS-KEY
    pub(crate) secret: SecretString,       // base64 编码，签名时解码
    pub(crate) passphrase: SecretString,   // 即 CB-ACCESS-PASSPHRASE
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        key: impl Into<ByteString>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Credentials {
            key: key.into(),
            secret: SecretString::from(secret.into()),
            passphrase: SecretString::from(passphrase.into()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }

    /// 根据 Coinbase 规则生成签名
    ///
    /// 预签名字符串为 `timestamp + method + request_path`，不包含查询参数和请求体。
    /// 使用解码后的密钥做 HMAC-SHA256，再进行 base64 编码。
    pub fn sign(&self, timestamp: &str, method: &str, request_path: &str) -> Result<String> {
        if timestamp.is_empty() || method.is_empty() || request_path.is_empty() {
            return Err(Error::InvalidInput(
                "timestamp, method and request path must not be empty".to_owned(),
            ));
        }

        let secret_key = BASE64_STANDARD_ENGINE
            .decode(self.secret.expose_secret())
            .map_err(|e| Error::decode("api secret", e))?;

        let mut mac = HmacSha256::new_from_slice(&secret_key)
            .map_err(|e| Error::InvalidInput(format!("unusable api secret: {e}")))?;
        mac.update(timestamp.as_bytes());
        mac.update(method.as_bytes());
        mac.update(request_path.as_bytes());

        Ok(BASE64_STANDARD_ENGINE.encode(mac.finalize().into_bytes()))
    }
}
