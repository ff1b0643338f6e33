use crate::error::{AppError, AppResult, FileError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一份待解析的课表文本
#[derive(Debug, Clone)]
pub struct RoutineInput {
    /// 显示名称（通常是文件名）
    pub name: String,
    /// 原始文本
    pub text: String,
    /// 来源文件路径
    pub file_path: Option<String>,
}

impl RoutineInput {
    /// 从内存中的文本创建（例如粘贴的内容）
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            file_path: None,
        }
    }

    /// 日志中显示的来源：有文件路径时用路径，否则用名称
    pub fn source(&self) -> &str {
        self.file_path.as_deref().unwrap_or(&self.name)
    }
}

/// 读取单个课表文本文件
pub async fn load_routine_file(path: &Path) -> AppResult<RoutineInput> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let text = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    Ok(RoutineInput {
        name: path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        text,
        file_path: Some(path.to_string_lossy().to_string()),
    })
}

/// 从文件夹中加载所有 `.txt` 课表文件
///
/// 单个文件读取失败只记录警告并跳过。结果按文件名排序。
pub async fn load_all_routine_files(folder_path: &str) -> AppResult<Vec<RoutineInput>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        match load_routine_file(&path).await {
            Ok(input) => inputs.push(input),
            Err(e) => tracing::warn!("加载文件失败 {}: {}", path.display(), e),
        }
    }

    Ok(inputs)
}
