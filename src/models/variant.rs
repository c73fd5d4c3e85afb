use phf::phf_map;

/// 题目玩法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionVariant {
    /// 默认：文本作答
    Standard,
    /// 打字题（从左往右）
    TypingLeft,
    /// 打字题（从右往左）
    TypingRight,
}

/// 保留标题，精确匹配
static RESERVED_TITLES: phf::Map<&'static str, QuestionVariant> = phf_map! {
    "TypingLeft" => QuestionVariant::TypingLeft,
    "TypingRight" => QuestionVariant::TypingRight,
};

impl QuestionVariant {
    /// 根据详情标题判断玩法
    pub fn from_title(title: &str) -> Self {
        RESERVED_TITLES
            .get(title)
            .copied()
            .unwrap_or(QuestionVariant::Standard)
    }

    /// 是否交给外部的打字组件处理
    pub fn is_alternate(self) -> bool {
        !matches!(self, QuestionVariant::Standard)
    }

    /// 保留标题原文
    pub fn title(self) -> Option<&'static str> {
        match self {
            QuestionVariant::Standard => None,
            QuestionVariant::TypingLeft => Some("TypingLeft"),
            QuestionVariant::TypingRight => Some("TypingRight"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_titles() {
        assert_eq!(QuestionVariant::from_title("TypingLeft"), QuestionVariant::TypingLeft);
        assert_eq!(QuestionVariant::from_title("TypingRight"), QuestionVariant::TypingRight);
    }

    #[test]
    fn test_other_titles_are_standard() {
        for title in ["Easy", "typingleft", "TypingLeft ", "", "Typing"] {
            assert_eq!(QuestionVariant::from_title(title), QuestionVariant::Standard);
        }
    }

    #[test]
    fn test_title_round_trip_for_reserved() {
        for variant in [QuestionVariant::TypingLeft, QuestionVariant::TypingRight] {
            assert_eq!(QuestionVariant::from_title(variant.title().unwrap()), variant);
        }
    }
}
