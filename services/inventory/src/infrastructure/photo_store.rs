//! 照片文件存储
//!
//! 上传的照片以生成的唯一文件名写入缓存目录，条目上只记录文件名。
//! 替换或删除条目时旧文件不会被清理。

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use inventory_errors::{AppError, AppResult};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 16;

/// 一次上传的照片内容
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    /// 客户端提供的原始文件名，仅用于保留扩展名
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedPhoto {
    pub fn new(file_name: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// 浏览器在未选择文件时仍会提交空文件名的空文件段
    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().is_none_or(|name| name.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 创建缓存目录（含父目录）
    pub async fn prepare(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 生成 `{毫秒时间戳}-{随机串}{.扩展名}` 形式的文件名
    pub fn generate_name(original: Option<&str>) -> String {
        let extension = original
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        )
    }

    /// 写入照片并返回生成的文件名
    pub async fn save(&self, photo: &UploadedPhoto) -> AppResult<String> {
        let name = Self::generate_name(photo.file_name.as_deref());
        let path = self.root.join(&name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store photo: {e}")))?;
        file.write_all(&photo.bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store photo: {e}")))?;
        file.flush().await?;

        debug!(
            photo = %name,
            bytes = photo.bytes.len(),
            content_type = ?photo.content_type,
            "Photo stored"
        );
        Ok(name)
    }

    /// 文件当前是否存在
    pub async fn exists(&self, name: &str) -> bool {
        let Some(path) = self.path_of(name) else {
            return false;
        };
        match fs::metadata(&path).await {
            Ok(meta) => meta.is_file(),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(photo = %name, error = %e, "Failed to stat photo");
                }
                false
            }
        }
    }

    /// 解析为存在的文件路径
    pub async fn locate(&self, name: &str) -> Option<PathBuf> {
        if self.exists(name).await {
            self.path_of(name)
        } else {
            None
        }
    }

    /// 只接受单一文件名，拒绝任何路径分量
    fn path_of(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }
}
