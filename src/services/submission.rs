//! 答案提交服务 - 业务能力层
//!
//! 负责校验答案、组装提交数据、记录提交结果

use crate::clients::QuestionApi;
use crate::error::AppResult;
use crate::models::{Question, QuestionVariant};
use crate::utils::logging::truncate_text;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// 提交给服务端的数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub id: String,
    /// 原始答案，不做 trim
    pub result: String,
    pub user_token: String,
    pub point: u32,
}

/// 未发出请求的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("答案为空")]
    EmptyAnswer,
    #[error("缺少题目序号")]
    MissingIdentifier,
    #[error("题目尚未定位或缺少 ID")]
    Unresolved,
    #[error("该题已作答")]
    AlreadyAnswered,
    #[error("该题由打字组件处理")]
    AlternateVariant,
    #[error("上一次提交尚未完成")]
    InFlight,
    #[error("题目详情尚未加载")]
    DetailNotReady,
}

/// 一次提交的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 服务端已接收，已跳转到成绩页
    Accepted,
    /// 本地校验未通过，没有发出请求
    Rejected(SubmitRejection),
    /// 请求失败，停留在当前题目
    Failed { message: String, retryable: bool },
}

/// 组装提交数据
///
/// 题目未定位时直接拒绝，不使用占位 ID
pub fn prepare_submission(
    ordinal: &str,
    question: Option<&Question>,
    answer: &str,
    user_token: &str,
) -> Result<SubmissionRequest, SubmitRejection> {
    if ordinal.trim().is_empty() {
        return Err(SubmitRejection::MissingIdentifier);
    }
    if answer.trim().is_empty() {
        return Err(SubmitRejection::EmptyAnswer);
    }
    let question = question.ok_or(SubmitRejection::Unresolved)?;
    let id = question.server_id().ok_or(SubmitRejection::Unresolved)?;
    if question.is_answered {
        return Err(SubmitRejection::AlreadyAnswered);
    }

    Ok(SubmissionRequest {
        id: id.to_string(),
        result: answer.to_string(),
        user_token: user_token.to_string(),
        point: question.point(),
    })
}

/// 答案提交协调器
///
/// 同一时间只允许一个在途提交
#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    in_flight: bool,
}

impl SubmissionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验并开始一次提交
    ///
    /// `variant` 为 `None` 表示详情还没有加载成功，此时玩法未知，不允许提交
    pub fn begin(
        &mut self,
        ordinal: &str,
        question: Option<&Question>,
        variant: Option<QuestionVariant>,
        answer: &str,
        user_token: &str,
    ) -> Result<SubmissionRequest, SubmitRejection> {
        if self.in_flight {
            return Err(SubmitRejection::InFlight);
        }

        let request = prepare_submission(ordinal, question, answer, user_token)?;
        match variant {
            None => return Err(SubmitRejection::DetailNotReady),
            Some(v) if v.is_alternate() => return Err(SubmitRejection::AlternateVariant),
            Some(_) => {}
        }
        self.in_flight = true;
        Ok(request)
    }

    /// 提交结束，成功时执行完成回调
    pub fn finish<F>(&mut self, result: AppResult<()>, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(),
    {
        self.in_flight = false;
        match result {
            Ok(()) => {
                on_success();
                SubmitOutcome::Accepted
            }
            Err(e) => SubmitOutcome::Failed {
                retryable: e.is_retryable(),
                message: e.to_string(),
            },
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

/// 发送提交请求
pub async fn send_submission(api: &dyn QuestionApi, request: &SubmissionRequest) -> AppResult<()> {
    info!("📤 正在提交答案: 题目 {} ({} 分)", request.id, request.point);
    debug!("答案内容: {}", truncate_text(&request.result, 40));

    match api.submit_answer(request).await {
        Ok(()) => {
            info!("✓ 答案提交成功");
            Ok(())
        }
        Err(e) => {
            warn!("⚠️ 答案提交失败: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const STANDARD: Option<QuestionVariant> = Some(QuestionVariant::Standard);

    fn question() -> Question {
        Question::new("q1", 50, false)
    }

    #[test]
    fn test_whitespace_answers_are_rejected() {
        let q = question();
        for answer in ["", "   ", "\t\n"] {
            assert_eq!(
                prepare_submission("1", Some(&q), answer, "tok"),
                Err(SubmitRejection::EmptyAnswer)
            );
        }
    }

    #[test]
    fn test_payload_keeps_raw_answer() {
        let q = question();
        let request = prepare_submission("1", Some(&q), "  4 ", "tok").unwrap();
        assert_eq!(
            request,
            SubmissionRequest {
                id: "q1".to_string(),
                result: "  4 ".to_string(),
                user_token: "tok".to_string(),
                point: 50,
            }
        );
    }

    #[test]
    fn test_payload_wire_format() {
        let q = question();
        let request = prepare_submission("1", Some(&q), "4", "tok").unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "q1", "result": "4", "user_token": "tok", "point": 50})
        );
    }

    #[test]
    fn test_missing_score_uses_default_point() {
        let q = Question {
            id: Some("q9".to_string()),
            score: None,
            is_answered: false,
        };
        let request = prepare_submission("1", Some(&q), "x", "tok").unwrap();
        assert_eq!(request.point, 100);
    }

    #[test]
    fn test_unresolved_question_is_refused() {
        assert_eq!(
            prepare_submission("1", None, "x", "tok"),
            Err(SubmitRejection::Unresolved)
        );
        let placeholder = Question {
            id: None,
            score: Some(10),
            is_answered: false,
        };
        assert_eq!(
            prepare_submission("1", Some(&placeholder), "x", "tok"),
            Err(SubmitRejection::Unresolved)
        );
    }

    #[test]
    fn test_missing_identifier_and_answered() {
        let q = question();
        assert_eq!(
            prepare_submission("", Some(&q), "x", "tok"),
            Err(SubmitRejection::MissingIdentifier)
        );
        let answered = Question::new("q1", 50, true);
        assert_eq!(
            prepare_submission("1", Some(&answered), "x", "tok"),
            Err(SubmitRejection::AlreadyAnswered)
        );
    }

    #[test]
    fn test_coordinator_blocks_concurrent_submissions() {
        let q = question();
        let mut coordinator = SubmissionCoordinator::new();
        assert!(coordinator.begin("1", Some(&q), STANDARD, "4", "tok").is_ok());
        assert_eq!(
            coordinator.begin("1", Some(&q), STANDARD, "4", "tok"),
            Err(SubmitRejection::InFlight)
        );

        let mut called = false;
        let outcome = coordinator.finish(Ok(()), || called = true);
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert!(called);
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn test_failure_skips_callback_and_allows_retry() {
        let q = question();
        let mut coordinator = SubmissionCoordinator::new();
        coordinator.begin("1", Some(&q), STANDARD, "4", "tok").unwrap();

        let mut called = false;
        let outcome = coordinator.finish(
            Err(AppError::bad_response("questions/submit/", 502, None)),
            || called = true,
        );
        assert!(!called);
        assert!(matches!(outcome, SubmitOutcome::Failed { retryable: true, .. }));
        assert!(coordinator.begin("1", Some(&q), STANDARD, "4", "tok").is_ok());
    }

    #[test]
    fn test_unknown_variant_blocks_submission() {
        let q = question();
        let mut coordinator = SubmissionCoordinator::new();
        assert_eq!(
            coordinator.begin("1", Some(&q), None, "4", "tok"),
            Err(SubmitRejection::DetailNotReady)
        );
        assert!(!coordinator.is_in_flight());
    }

    #[test]
    fn test_alternate_variant_bypasses_submission() {
        let q = question();
        let mut coordinator = SubmissionCoordinator::new();
        for variant in [QuestionVariant::TypingLeft, QuestionVariant::TypingRight] {
            assert_eq!(
                coordinator.begin("1", Some(&q), Some(variant), "4", "tok"),
                Err(SubmitRejection::AlternateVariant)
            );
        }
        assert!(!coordinator.is_in_flight());
    }
}
