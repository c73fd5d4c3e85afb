//! 玩法分派 - 业务能力层
//!
//! 保留标题的题目整体交给外部打字组件，其余走默认作答流程

use crate::models::{Question, QuestionInfo, QuestionVariant};
use tracing::info;

/// 交给打字组件的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingHandoff {
    pub id: String,
    pub variant: QuestionVariant,
    pub title: String,
    pub score: u32,
}

/// 分派结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// 默认文本作答
    Default,
    /// 交给打字组件
    Alternate(TypingHandoff),
}

/// 外部打字组件
pub trait TypingHandler {
    /// 接管当前题目的展示和作答
    fn take_over(&mut self, handoff: &TypingHandoff);
}

/// 根据详情判断玩法，题目必须已有服务端 ID
pub fn dispatch(question: &Question, info: &QuestionInfo) -> Dispatch {
    let variant = QuestionVariant::from_title(&info.title);
    match (variant.is_alternate(), question.server_id()) {
        (true, Some(id)) => Dispatch::Alternate(TypingHandoff {
            id: id.to_string(),
            variant,
            title: info.title.clone(),
            score: question.point(),
        }),
        _ => Dispatch::Default,
    }
}

/// 只记录日志的打字组件，用于命令行
#[derive(Debug, Default)]
pub struct LoggingTypingHandler {
    pub handled: Vec<TypingHandoff>,
}

impl TypingHandler for LoggingTypingHandler {
    fn take_over(&mut self, handoff: &TypingHandoff) {
        info!(
            "⌨️ 打字题 {} ({:?}, {} 分) 交由打字组件处理",
            handoff.id, handoff.variant, handoff.score
        );
        self.handled.push(handoff.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str) -> QuestionInfo {
        QuestionInfo {
            title: title.to_string(),
            cost: 2,
            is_starred: false,
            text: None,
            has_zip: false,
            zip_file_url: None,
        }
    }

    #[test]
    fn test_reserved_titles_are_handed_off() {
        let question = Question::new("q7", 300, false);
        for title in ["TypingLeft", "TypingRight"] {
            match dispatch(&question, &info(title)) {
                Dispatch::Alternate(handoff) => {
                    assert_eq!(handoff.id, "q7");
                    assert_eq!(handoff.title, title);
                    assert_eq!(handoff.score, 300);
                }
                Dispatch::Default => panic!("{} 应交给打字组件", title),
            }
        }
    }

    #[test]
    fn test_other_titles_use_default_flow() {
        let question = Question::new("q7", 300, false);
        for title in ["Easy", "Typing", "typingright"] {
            assert_eq!(dispatch(&question, &info(title)), Dispatch::Default);
        }
    }

    #[test]
    fn test_logging_handler_records_handoff() {
        let question = Question::new("q7", 300, false);
        let mut handler = LoggingTypingHandler::default();
        if let Dispatch::Alternate(handoff) = dispatch(&question, &info("TypingLeft")) {
            handler.take_over(&handoff);
        }
        assert_eq!(handler.handled.len(), 1);
        assert_eq!(handler.handled[0].variant, QuestionVariant::TypingLeft);
    }
}
