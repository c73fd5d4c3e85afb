//! # Quiz Question Submit
//!
//! 单道答题的客户端：定位题目、拉取详情、提交答案
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与题目服务的 HTTP 交互，`QuestionApi` 是唯一的网络边界
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只负责一件事
//! - `QuestionResolver` - 路由序号 → 题目
//! - `DetailFetcher` - 详情请求票据，丢弃过期响应
//! - `SubmissionCoordinator` - 答案校验与提交
//! - `dispatch` - 打字题分派
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整状态
//! - `QuestionCtx` - 上下文封装（序号 + 令牌）
//! - `QuestionFlow` - 状态机（定位 → 详情 → 分派 → 提交）
//!
//! ### ④ 应用层（App）
//! - `app` - 事件循环，网络请求在后台任务执行，结果以事件回到循环
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{HttpQuestionClient, QuestionApi};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{decode, DecodedText, Question, QuestionInfo, QuestionVariant};
pub use services::{SubmissionRequest, SubmitOutcome, SubmitRejection};
pub use workflow::{QuestionCtx, QuestionFlow, Screen};
