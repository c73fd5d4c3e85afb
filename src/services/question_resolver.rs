//! 题目定位服务 - 业务能力层
//!
//! 只负责"路由序号 → 题目"，不关心详情和提交

use crate::models::Question;
use tracing::debug;

/// 解析路由序号（从1开始），非数字、小数、0 和越界都视为无效
///
/// 与路由层的数字转换保持一致：`"1.0"`、`"1e0"`、`"0x1"`、`"+1"` 都是第 1 题
pub fn parse_ordinal(ordinal: &str) -> Option<usize> {
    let trimmed = ordinal.trim();
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    let position = match radix {
        Some(radix) => {
            let digits = &trimmed[2..];
            // from_str_radix 会接受符号，"0x+1" 这种写法不是数字
            if digits.starts_with(['+', '-']) {
                return None;
            }
            usize::from_str_radix(digits, radix).ok()?
        }
        None => {
            let value = trimmed.parse::<f64>().ok()?;
            let whole = value.is_finite() && value.fract() == 0.0;
            if !whole || value < 1.0 || value > usize::MAX as f64 {
                return None;
            }
            value as usize
        }
    };
    Some(position).filter(|n| *n >= 1)
}

/// 按序号在题目列表中查找
pub fn find_by_ordinal<'a>(catalog: &'a [Question], ordinal: &str) -> Option<&'a Question> {
    let position = parse_ordinal(ordinal)?;
    catalog.get(position - 1)
}

/// 一次定位的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 没有对应题目
    Miss,
    /// 找到了题目但没有服务端 ID（占位数据）
    Placeholder,
    /// 还是同一道题，只刷新了记录
    Unchanged,
    /// 换成了另一道题，需要重新拉取详情
    Changed,
}

impl Resolution {
    /// 是否需要拉取详情
    pub fn needs_fetch(self) -> bool {
        matches!(self, Resolution::Changed)
    }
}

/// 题目定位服务
///
/// 记住上一次定位到的题目，用来判断服务端 ID 是否变化
#[derive(Debug, Default)]
pub struct QuestionResolver {
    current: Option<Question>,
}

impl QuestionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 题目列表或序号变化时重新定位
    pub fn resolve(&mut self, catalog: &[Question], ordinal: &str) -> Resolution {
        let Some(found) = find_by_ordinal(catalog, ordinal) else {
            debug!("序号 {:?} 没有对应题目 (共 {} 题)", ordinal, catalog.len());
            self.current = None;
            return Resolution::Miss;
        };

        if found.server_id().is_none() {
            debug!("序号 {:?} 对应的题目缺少 ID，暂不拉取详情", ordinal);
            self.current = Some(found.clone());
            return Resolution::Placeholder;
        }

        let previous_id = self.current.as_ref().and_then(Question::server_id);
        let resolution = if previous_id == found.server_id() {
            Resolution::Unchanged
        } else {
            Resolution::Changed
        };
        self.current = Some(found.clone());
        resolution
    }

    /// 当前定位到的题目
    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }
}
