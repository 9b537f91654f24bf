//! Cloudinary 서명 없는(unsigned) 업로드
//!
//! 파일을 base64 data URI로 인코딩해 `upload_preset`과 함께 전송합니다.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use crate::domain::dto::users::request::UploadedFile;
use crate::errors::{AppError, ErrorContext};
use crate::services::media::{MediaStore, UploadedMedia};

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

pub struct CloudinaryUploader {
    http: Client,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryUploader {
    pub fn new(http: Client, cloud_name: String, upload_preset: String) -> Self {
        Self { http, cloud_name, upload_preset }
    }

    fn endpoint(&self) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/auto/upload", self.cloud_name)
    }

    fn data_uri(file: &UploadedFile) -> String {
        let content_type = file
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        format!("data:{};base64,{}", content_type, STANDARD.encode(&file.bytes))
    }
}

#[async_trait]
impl MediaStore for CloudinaryUploader {
    async fn upload(&self, file: UploadedFile) -> Result<UploadedMedia, AppError> {
        if self.cloud_name.is_empty() || self.upload_preset.is_empty() {
            return Err(AppError::InternalError("Cloudinary is not configured".to_string()));
        }

        let data_uri = Self::data_uri(&file);
        let form = [("file", data_uri.as_str()), ("upload_preset", self.upload_preset.as_str())];

        let response = self
            .http
            .post(self.endpoint())
            .form(&form)
            .send()
            .await
            .context("미디어 업로드 요청 실패")?
            .error_for_status()
            .with_context(|| format!("미디어 업로드 거부 ({})", file.file_name))?;

        let body: UploadResponse = response.json().await.context("미디어 업로드 응답 파싱 실패")?;
        log::info!("미디어 업로드 완료: {}", file.file_name);

        Ok(UploadedMedia { url: body.secure_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_encoding() {
        let file = UploadedFile {
            file_name: "a.png".into(),
            content_type: Some("image/png".into()),
            bytes: b"hello".to_vec(),
        };
        assert_eq!(CloudinaryUploader::data_uri(&file), "data:image/png;base64,aGVsbG8=");
    }

    #[actix_web::test]
    async fn test_unconfigured_uploader_fails_without_network() {
        let uploader = CloudinaryUploader::new(Client::new(), String::new(), String::new());
        let file = UploadedFile { file_name: "a.png".into(), content_type: None, bytes: vec![] };
        assert!(matches!(uploader.upload(file).await, Err(AppError::InternalError(_))));
    }
}
