use serde::{Deserialize, Serialize};

/// 未提供分值时使用的默认分值
pub const DEFAULT_POINT: u32 = 100;

/// 题目列表中的一项
///
/// 路由只通过序号（从1开始）定位题目，`id` 才是发给服务端的值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(rename = "isAnswerd", default)]
    pub is_answered: bool,
}

impl Question {
    pub fn new(id: impl Into<String>, score: u32, is_answered: bool) -> Self {
        Self {
            id: Some(id.into()),
            score: Some(score),
            is_answered,
        }
    }

    /// 有效的服务端 ID（空串视为缺失）
    pub fn server_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// 提交时使用的分值
    pub fn point(&self) -> u32 {
        self.score.unwrap_or(DEFAULT_POINT)
    }
}

/// 题目详情
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionInfo {
    pub title: String,
    #[serde(default = "default_cost")]
    pub cost: u8,
    #[serde(rename = "isStarred", default)]
    pub is_starred: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub has_zip: bool,
    #[serde(default)]
    pub zip_file_url: Option<String>,
}

fn default_cost() -> u8 {
    1
}

/// ID 可能是字符串也可能是整数；null、空串和 0 都视为缺失
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer question id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()).filter(|v| !v.is_empty()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(IdVisitor)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_names() {
        let q: Question =
            serde_json::from_str(r#"{"id":"q1","score":50,"isAnswerd":true}"#).unwrap();
        assert_eq!(q, Question::new("q1", 50, true));
    }

    #[test]
    fn test_integer_and_falsy_ids() {
        let q: Question = serde_json::from_str(r#"{"id":7,"score":10}"#).unwrap();
        assert_eq!(q.server_id(), Some("7"));

        for raw in [r#"{"id":0}"#, r#"{"id":""}"#, r#"{"id":null}"#, r#"{}"#] {
            let q: Question = serde_json::from_str(raw).unwrap();
            assert_eq!(q.server_id(), None, "input: {}", raw);
        }
    }

    #[test]
    fn test_point_defaults_to_100() {
        let q: Question = serde_json::from_str(r#"{"id":"q"}"#).unwrap();
        assert_eq!(q.point(), DEFAULT_POINT);
        assert!(!q.is_answered);
    }

    #[test]
    fn test_question_info_defaults() {
        let info: QuestionInfo = serde_json::from_str(r#"{"title":"Easy"}"#).unwrap();
        assert_eq!(info.cost, 1);
        assert!(!info.has_zip);
        assert!(info.text.is_none());
    }
}
