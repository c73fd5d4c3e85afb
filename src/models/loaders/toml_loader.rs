use crate::error::{AppError, AppResult, FileError};
use crate::models::question::Question;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 题目列表文件结构
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// 解析 TOML 文本为题目列表
pub fn parse_catalog(content: &str) -> AppResult<Vec<Question>> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(file.questions)
}

/// 从 TOML 文件加载题目列表
pub async fn load_catalog(path: &Path) -> AppResult<Vec<Question>> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let file: CatalogFile = toml::from_str(&content)
        .map_err(|e| AppError::toml_parse_failed(path.display().to_string(), e))?;

    tracing::info!(
        "成功加载 {} 道题目: {}",
        file.questions.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(file.questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let content = r#"
[[questions]]
id = "q1"
score = 50
isAnswerd = false

[[questions]]
id = 12
score = 200
isAnswerd = true

[[questions]]
score = 10
"#;
        let catalog = parse_catalog(content).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0], Question::new("q1", 50, false));
        assert_eq!(catalog[1].server_id(), Some("12"));
        assert!(catalog[1].is_answered);
        assert_eq!(catalog[2].server_id(), None);
    }

    #[test]
    fn test_parse_empty_catalog() {
        assert!(parse_catalog("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
