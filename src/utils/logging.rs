/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::services::{SubmitOutcome, TypingHandoff};
use crate::workflow::{QuestionView, Screen};
use tracing::{info, warn};

/// 记录程序启动信息
pub fn log_startup(config: &Config, ordinal: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 服务地址: {}", config.api_base_url);
    info!("📄 当前题目序号: {}", ordinal);
    info!("{}", "=".repeat(60));
}

/// 输出当前画面
pub fn log_screen(screen: &Screen) {
    match screen {
        Screen::NotFound => warn!("⚠️ 找不到该题目"),
        Screen::Loading => info!("⏳ 加载中..."),
        Screen::Failed { message, retryable } => {
            warn!("❌ 题目加载失败: {}", message);
            if *retryable {
                info!("💡 输入 :retry 重试");
            }
        }
        Screen::Alternate(handoff) => log_handoff(handoff),
        Screen::Question(view) => log_question_view(view),
    }
}

fn log_handoff(handoff: &TypingHandoff) {
    info!("⌨️ 打字题: {} ({} 分)", handoff.title, handoff.score);
}

/// 输出默认作答视图
pub fn log_question_view(view: &QuestionView) {
    let stars: String = view
        .stars
        .iter()
        .map(|filled| if *filled { '★' } else { '☆' })
        .collect();

    info!("\n{}", "─".repeat(60));
    info!("📝 {}  难度 {}  {} 分", view.title, stars, view.score);
    info!("{}", "─".repeat(60));
    if let Some(poster) = &view.poster {
        info!("🖼️ 题图: {}", poster);
    }
    info!("\n{}\n", view.body);
    for asset in &view.assets {
        info!(
            "📎 {} ({})",
            asset.url,
            asset.label.as_deref().unwrap_or("-")
        );
    }
    if let Some(zip_url) = &view.zip_url {
        info!("📦 File Zip! Click to download: {}", zip_url);
    }
    if view.can_answer {
        info!("✏️ 请输入答案 (:back 返回, :goto N 切换题目)");
    } else {
        info!("✅ 已作答");
    }
}

/// 输出提交结果
pub fn log_submit_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Accepted => info!("✅ 提交成功"),
        SubmitOutcome::Rejected(rejection) => warn!("⚠️ 未提交: {}", rejection),
        SubmitOutcome::Failed { message, retryable } => {
            warn!("❌ 提交失败: {}", message);
            if *retryable {
                info!("💡 可以再次提交");
            }
        }
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("سلام دنیا", 4), "سلام...");
    }
}
