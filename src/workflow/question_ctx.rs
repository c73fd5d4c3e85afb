//! 题目处理上下文
//!
//! 封装"我正在看第几题、用谁的令牌"这一信息，由外部注入

use crate::config::Config;
use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 路由中的序号（从1开始，文本形式）
    pub ordinal: String,

    /// 用户令牌，原样透传
    pub user_token: String,

    /// 附件下载地址前缀
    pub asset_base_url: String,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(
        ordinal: impl Into<String>,
        user_token: impl Into<String>,
        asset_base_url: impl Into<String>,
    ) -> Self {
        Self {
            ordinal: ordinal.into(),
            user_token: user_token.into(),
            asset_base_url: asset_base_url.into(),
        }
    }

    pub fn from_config(config: &Config, ordinal: impl Into<String>) -> Self {
        Self::new(ordinal, config.user_token.clone(), config.asset_base_url.clone())
    }

    /// 拼接 zip 附件的完整地址
    pub fn asset_url(&self, relative: &str) -> String {
        format!("{}/{}", self.asset_base_url, relative)
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目 #{}]", self.ordinal)
    }
}
