//! 题目流程 - 流程层
//!
//! 核心职责：定义"一道题"从定位到提交的完整状态
//!
//! 流程顺序：
//! 1. 定位题目（序号或题目列表变化时）
//! 2. 拉取详情（只有换题时才拉取，过期响应丢弃）
//! 3. 分派玩法 → 打字组件 / 默认视图
//! 4. 提交答案 → 成绩榜
//!
//! 这里不做任何网络请求，只签发票据和请求数据，由调用方执行

use tracing::{info, warn};

use crate::error::AppResult;
use crate::models::{decode, decoded_text, Question, QuestionInfo, QuestionVariant};
use crate::services::{
    dispatch, Dispatch, DetailFetcher, DetailTicket, QuestionResolver, Resolution,
    SubmissionCoordinator, SubmissionRequest, SubmitOutcome, SubmitRejection, TypingHandoff,
};
use crate::workflow::navigation::Navigator;
use crate::workflow::question_ctx::QuestionCtx;

/// 难度星级的总数
pub const MAX_STARS: usize = 3;

/// 详情状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    /// 没有可拉取的题目
    Idle,
    /// 请求已发出
    Loading,
    Ready(QuestionInfo),
    /// 拉取失败，可以重试
    Failed { message: String, retryable: bool },
}

/// 附件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLink {
    pub url: String,
    pub label: Option<String>,
}

/// 默认作答视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub title: String,
    pub stars: [bool; MAX_STARS],
    pub is_starred: bool,
    pub score: u32,
    pub body: String,
    pub poster: Option<String>,
    pub assets: Vec<AssetLink>,
    pub zip_url: Option<String>,
    /// 未作答时才显示答题框
    pub can_answer: bool,
}

/// 当前应展示的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// 序号没有对应题目
    NotFound,
    Loading,
    Failed { message: String, retryable: bool },
    /// 交给打字组件
    Alternate(TypingHandoff),
    Question(QuestionView),
}

/// 题目流程
pub struct QuestionFlow {
    ctx: QuestionCtx,
    resolver: QuestionResolver,
    fetcher: DetailFetcher,
    detail: DetailState,
    submission: SubmissionCoordinator,
}

impl QuestionFlow {
    /// 创建新的题目流程
    pub fn new(ctx: QuestionCtx) -> Self {
        Self {
            ctx,
            resolver: QuestionResolver::new(),
            fetcher: DetailFetcher::new(),
            detail: DetailState::Idle,
            submission: SubmissionCoordinator::new(),
        }
    }

    pub fn ctx(&self) -> &QuestionCtx {
        &self.ctx
    }

    /// 题目列表变化时重新定位，换题时返回需要执行的详情请求
    pub fn refresh(&mut self, catalog: &[Question]) -> Option<DetailTicket> {
        match self.resolver.resolve(catalog, &self.ctx.ordinal) {
            Resolution::Miss | Resolution::Placeholder => {
                self.fetcher.invalidate();
                self.detail = DetailState::Idle;
                None
            }
            Resolution::Unchanged => None,
            Resolution::Changed => {
                let id = self.resolver.current().and_then(Question::server_id)?;
                info!("{} 定位到题目 {}", self.ctx, id);
                self.detail = DetailState::Loading;
                Some(self.fetcher.issue(id))
            }
        }
    }

    /// 切换到另一个序号
    pub fn navigate(&mut self, ordinal: impl Into<String>, catalog: &[Question]) -> Option<DetailTicket> {
        self.ctx.ordinal = ordinal.into();
        self.refresh(catalog)
    }

    /// 拉取失败后重试
    pub fn retry_detail(&mut self) -> Option<DetailTicket> {
        if !matches!(self.detail, DetailState::Failed { .. }) {
            return None;
        }
        let id = self.resolver.current().and_then(Question::server_id)?;
        info!("{} 重新拉取题目 {} 详情", self.ctx, id);
        self.detail = DetailState::Loading;
        Some(self.fetcher.issue(id))
    }

    /// 详情响应到达，票据过期时丢弃并返回 false
    pub fn apply_detail(&mut self, ticket: &DetailTicket, result: AppResult<QuestionInfo>) -> bool {
        if !self.fetcher.accept(ticket) {
            return false;
        }
        self.detail = match result {
            Ok(info) => DetailState::Ready(info),
            Err(e) => {
                warn!("{} ⚠️ 详情拉取失败: {}", self.ctx, e);
                DetailState::Failed {
                    retryable: e.is_retryable(),
                    message: e.to_string(),
                }
            }
        };
        true
    }

    pub fn question(&self) -> Option<&Question> {
        self.resolver.current()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    /// 当前题目的玩法（详情未就绪时未知）
    pub fn variant(&self) -> Option<QuestionVariant> {
        match &self.detail {
            DetailState::Ready(info) => Some(QuestionVariant::from_title(&info.title)),
            _ => None,
        }
    }

    /// 计算当前应展示的内容，每次调用都重新解析文本
    pub fn screen(&self) -> Screen {
        let Some(question) = self.resolver.current() else {
            return Screen::NotFound;
        };

        match &self.detail {
            DetailState::Idle | DetailState::Loading => Screen::Loading,
            DetailState::Failed { message, retryable } => Screen::Failed {
                message: message.clone(),
                retryable: *retryable,
            },
            DetailState::Ready(info) => match dispatch(question, info) {
                Dispatch::Alternate(handoff) => Screen::Alternate(handoff),
                Dispatch::Default => Screen::Question(self.build_view(question, info)),
            },
        }
    }

    fn build_view(&self, question: &Question, info: &QuestionInfo) -> QuestionView {
        let decoded = decode(info.text.as_deref());
        let filled = usize::from(info.cost.clamp(1, MAX_STARS as u8));
        let mut stars = [false; MAX_STARS];
        stars.iter_mut().take(filled).for_each(|s| *s = true);

        QuestionView {
            title: info.title.clone(),
            stars,
            is_starred: info.is_starred,
            score: question.point(),
            poster: decoded.poster().map(str::to_string),
            assets: decoded
                .assets()
                .iter()
                .map(|url| AssetLink {
                    url: url.clone(),
                    label: decoded_text::asset_label(url).map(str::to_string),
                })
                .collect(),
            zip_url: info
                .zip_file_url
                .as_deref()
                .filter(|_| info.has_zip)
                .map(|relative| self.ctx.asset_url(relative)),
            can_answer: !question.is_answered,
            body: decoded.text,
        }
    }

    /// 校验答案并生成提交请求，详情未就绪时拒绝
    pub fn begin_submit(&mut self, answer: &str) -> Result<SubmissionRequest, SubmitRejection> {
        let variant = self.variant();
        let result = self.submission.begin(
            &self.ctx.ordinal,
            self.resolver.current(),
            variant,
            answer,
            &self.ctx.user_token,
        );
        if let Err(rejection) = &result {
            warn!("{} 未提交: {}", self.ctx, rejection);
        }
        result
    }

    /// 提交结束，成功时跳转到成绩榜
    pub fn finish_submit(
        &mut self,
        result: AppResult<()>,
        navigator: &mut dyn Navigator,
    ) -> SubmitOutcome {
        self.submission.finish(result, || navigator.show_results())
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_in_flight()
    }
}
