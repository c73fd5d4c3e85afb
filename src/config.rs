use crate::error::{AppResult, ConfigError};
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题目服务地址
    pub api_base_url: String,
    /// 附件（zip）下载地址前缀
    pub asset_base_url: String,
    /// 用户令牌，原样透传给服务端
    pub user_token: String,
    /// 本地题目列表（TOML），为空时从服务端拉取
    pub catalog_file: Option<String>,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            asset_base_url: "http://localhost:8000".to_string(),
            user_token: String::new(),
            catalog_file: None,
            request_timeout_secs: 10,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let api_base_url = lookup("API_BASE_URL").unwrap_or(default.api_base_url);
        Ok(Self {
            asset_base_url: lookup("ASSET_BASE_URL").unwrap_or_else(|| api_base_url.clone()),
            api_base_url,
            user_token: lookup("USER_TOKEN").unwrap_or(default.user_token),
            catalog_file: lookup("CATALOG_FILE").filter(|v| !v.is_empty()),
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(default.request_timeout_secs),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
        })
    }

    /// 令牌不能为空
    pub fn require_token(&self) -> AppResult<&str> {
        if self.user_token.is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "USER_TOKEN".to_string(),
            }
            .into());
        }
        Ok(&self.user_token)
    }
}

fn parse_var<T, F>(lookup: &F, var_name: &str, expected_type: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}
