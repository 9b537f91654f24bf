//! 미디어 업로드 모듈
//!
//! 회원가입 시 아바타/커버 이미지를 외부 오브젝트 스토리지에 올리고 URL만 돌려받습니다.

pub mod cloudinary;

use std::sync::Mutex;
use async_trait::async_trait;
use crate::domain::dto::users::request::UploadedFile;
use crate::errors::AppError;

pub use cloudinary::CloudinaryUploader;

/// 업로드 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, file: UploadedFile) -> Result<UploadedMedia, AppError>;
}

/// 업로드한 파일 이름만 기록하는 메모리 구현
#[derive(Default)]
pub struct InMemoryMediaStore {
    uploads: Mutex<Vec<String>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, file: UploadedFile) -> Result<UploadedMedia, AppError> {
        let mut uploads = self
            .uploads
            .lock()
            .map_err(|_| AppError::InternalError("media store lock poisoned".to_string()))?;
        uploads.push(file.file_name.clone());

        Ok(UploadedMedia {
            url: format!("memory://media/{}/{}", uploads.len(), file.file_name),
        })
    }
}
