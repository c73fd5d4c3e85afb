//! 复合文本字段解析
//!
//! 格式：`链接1,链接2;;正文`，没有 `;;` 时整段都是正文

/// 链接段与正文之间的分隔符
pub const SEGMENT_DELIMITER: &str = ";;";
/// 链接之间的分隔符
pub const LINK_DELIMITER: char = ',';

/// 拆分后的正文和媒体链接
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub links: Vec<String>,
}

impl DecodedText {
    /// 第一个链接作为题图
    pub fn poster(&self) -> Option<&str> {
        self.links.first().map(String::as_str)
    }

    /// 其余链接作为附件
    pub fn assets(&self) -> &[String] {
        self.links.get(1..).unwrap_or(&[])
    }
}

/// 解析复合文本字段，对任何输入都不会失败
pub fn decode(raw: Option<&str>) -> DecodedText {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return DecodedText::default(),
    };

    let parts: Vec<&str> = raw.split(SEGMENT_DELIMITER).collect();
    let (links_segment, body) = match parts.as_slice() {
        [links, body] => (Some(*links), *body),
        _ => (None, raw),
    };

    let links = match links_segment {
        Some(segment) if !segment.is_empty() => {
            segment.split(LINK_DELIMITER).map(str::to_string).collect()
        }
        _ => Vec::new(),
    };

    DecodedText {
        text: body.to_string(),
        links,
    }
}

/// 附件的简短名称：第一个 `//` 之后到下一个 `.` 之前
pub fn asset_label(link: &str) -> Option<&str> {
    let rest = link.split("//").nth(1)?;
    rest.split('.').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_absent_and_empty_input() {
        assert_eq!(decode(None), DecodedText::default());
        assert_eq!(decode(Some("")), DecodedText::default());
    }

    #[test]
    fn test_links_and_body() {
        let decoded = decode(Some("a,b;;Hello"));
        assert_eq!(decoded.text, "Hello");
        assert_eq!(decoded.links, links(&["a", "b"]));
        assert_eq!(decoded.poster(), Some("a"));
        assert_eq!(decoded.assets(), &links(&["b"])[..]);
    }

    #[test]
    fn test_plain_text() {
        let decoded = decode(Some("justtext"));
        assert_eq!(decoded.text, "justtext");
        assert!(decoded.links.is_empty());
        assert_eq!(decoded.poster(), None);
        assert!(decoded.assets().is_empty());
    }

    #[test]
    fn test_more_than_one_delimiter_keeps_whole_string() {
        let decoded = decode(Some("x;;y;;z"));
        assert_eq!(decoded.text, "x;;y;;z");
        assert!(decoded.links.is_empty());
    }

    #[test]
    fn test_empty_links_segment() {
        let decoded = decode(Some(";;only body"));
        assert_eq!(decoded.text, "only body");
        assert!(decoded.links.is_empty());
    }

    #[test]
    fn test_links_are_verbatim() {
        let decoded = decode(Some(" a , ,b;;"));
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.links, links(&[" a ", " ", "b"]));
    }

    #[test]
    fn test_decode_is_repeatable() {
        let raw = "img1.png;;What is 2+2?";
        assert_eq!(decode(Some(raw)), decode(Some(raw)));
    }

    #[test]
    fn test_asset_label() {
        assert_eq!(asset_label("https://github.com/x.png"), Some("github"));
        assert_eq!(asset_label("https://cdn"), Some("cdn"));
        assert_eq!(asset_label("relative/path.png"), None);
    }
}
