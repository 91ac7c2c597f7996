//! 本地配置文件 `settings.json` 的读取。
//!
//! 依次在当前目录和 `$HOME/.krypto` 中查找配置文件，环境变量
//! `KRYPTO_KEY`、`KRYPTO_SECRET`、`KRYPTO_PASSPHRASE` 会覆盖文件中的值。
//! 如果找不到配置文件，会在第一个目录中写入一个只包含占位值的文件，
//! 并要求用户修改后再运行。

use crate::{Error, Result, client::coinbase::auth::Credentials};
use config::{Config, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "settings.json";
pub const ENV_PREFIX: &str = "KRYPTO";

const KEY_FIELD: &str = "key";
const SECRET_FIELD: &str = "secret";
const PASSPHRASE_FIELD: &str = "passphrase";

pub const KEY_DEFAULT: &str = "YOUR ACCESS KEY";
pub const SECRET_DEFAULT: &str = "YOUR SECRET";
pub const PASSPHRASE_DEFAULT: &str = "YOUR PASSPHRASE";

const DEFAULTS: [(&str, &str); 3] = [
    (KEY_FIELD, KEY_DEFAULT),
    (SECRET_FIELD, SECRET_DEFAULT),
    (PASSPHRASE_FIELD, PASSPHRASE_DEFAULT),
];

/// 访问 API 所需的三项凭证
#[derive(Debug)]
pub struct Settings {
    pub key: String,
    pub secret: SecretString,
    pub passphrase: SecretString,
}

#[derive(Deserialize)]
struct RawSettings {
    key: String,
    secret: String,
    passphrase: String,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Settings {
            key: raw.key,
            secret: SecretString::from(raw.secret),
            passphrase: SecretString::from(raw.passphrase),
        }
    }
}

impl Settings {
    /// 默认的查找目录：当前目录，然后是 `$HOME/.krypto`
    pub fn search_dirs() -> Vec<PathBuf> {
        let mut dirs = vec![PathBuf::from(".")];
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(Path::new(&home).join(".krypto"));
        }
        dirs
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::search_dirs())
    }

    /// 从给定目录中读取第一个存在的配置文件。
    ///
    /// 没有找到时在 `dirs[0]` 中创建默认配置文件，并返回 [`Error::Unconfigured`]。
    pub fn load_from(dirs: &[PathBuf]) -> Result<Self> {
        let path = match dirs
            .iter()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
        {
            Some(path) => path,
            None => {
                let dir = dirs.first().map_or_else(|| Path::new("."), PathBuf::as_path);
                let path = write_defaults(dir)?;
                return Err(Error::Unconfigured { path });
            }
        };
        debug!(path = %path.display(), "reading settings");

        let mut builder = Config::builder();
        for (field, default) in DEFAULTS {
            builder = builder.set_default(field, default)?;
        }
        let settings: Settings = builder
            .add_source(File::from(path.as_path()).format(FileFormat::Json))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<RawSettings>()?
            .into();

        if settings.is_unmodified() {
            return Err(Error::Unconfigured { path });
        }

        Ok(settings)
    }

    /// 任意一项仍然是占位值
    pub fn is_unmodified(&self) -> bool {
        self.key == KEY_DEFAULT
            || self.secret.expose_secret() == SECRET_DEFAULT
            || self.passphrase.expose_secret() == PASSPHRASE_DEFAULT
    }

    pub fn into_credentials(self) -> Credentials {
        Credentials {
            key: self.key.into(),
            secret: self.secret,
            passphrase: self.passphrase,
        }
    }
}

fn write_defaults(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    let contents = serde_json::to_string_pretty(&serde_json::Map::from_iter(
        DEFAULTS
            .iter()
            .map(|(field, default)| ((*field).to_owned(), (*default).into())),
    ))
    .map_err(|e| Error::ConfigWrite {
        path: path.clone(),
        source: e.into(),
    })?;

    fs::create_dir_all(dir)
        .and_then(|()| fs::write(&path, contents))
        .map_err(|source| Error::ConfigWrite {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "created settings file with placeholder values");
    Ok(path)
}
