//! 题目详情拉取服务 - 业务能力层
//!
//! 每次请求带一张票据（代数 + 题目 ID），只有当前票据的响应才会被采纳

use crate::clients::QuestionApi;
use crate::error::AppResult;
use crate::models::QuestionInfo;
use tracing::{debug, info, warn};

/// 详情请求票据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    question_id: String,
}

impl DetailTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }
}

/// 详情请求代数管理
#[derive(Debug, Default)]
pub struct DetailFetcher {
    generation: u64,
    pending: Option<DetailTicket>,
}

impl DetailFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为新题目签发票据，之前签发的票据全部作废
    pub fn issue(&mut self, question_id: &str) -> DetailTicket {
        self.generation += 1;
        let ticket = DetailTicket {
            generation: self.generation,
            question_id: question_id.to_string(),
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    /// 作废所有在途请求
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// 响应到达时校验票据，通过后票据失效
    pub fn accept(&mut self, ticket: &DetailTicket) -> bool {
        if self.pending.as_ref() == Some(ticket) {
            self.pending = None;
            true
        } else {
            debug!(
                "丢弃过期的详情响应: 题目 {} (代数 {}, 当前 {})",
                ticket.question_id, ticket.generation, self.generation
            );
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// 按票据拉取题目详情
pub async fn fetch_detail(
    api: &dyn QuestionApi,
    ticket: &DetailTicket,
    user_token: &str,
) -> AppResult<QuestionInfo> {
    info!("🔍 正在拉取题目详情: {}", ticket.question_id);

    match api.question_info(&ticket.question_id, user_token).await {
        Ok(info) => {
            info!("✓ 题目详情已获取: {}", info.title);
            Ok(info)
        }
        Err(e) => {
            warn!("⚠️ 题目 {} 详情拉取失败: {}", ticket.question_id, e);
            Err(e)
        }
    }
}
