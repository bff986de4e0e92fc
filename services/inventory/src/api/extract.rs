//! 请求提取器

use std::collections::HashMap;

use axum::{
    Form, Json,
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE, request::Parts},
};
use inventory_errors::AppError;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{FIELD_DESCRIPTION, FIELD_NAME, FIELD_PHOTO, RegisterRequest};
use crate::domain::ItemId;
use crate::infrastructure::UploadedPhoto;

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase())
}

/// 请求体读取失败：超过大小限制为 413，其余为 400
fn body_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(message)
    } else {
        AppError::validation(message)
    }
}

/// 路径中的条目 ID；无法解析与不存在同样返回 404
#[derive(Debug, Clone, Copy)]
pub struct ItemIdPath(pub ItemId);

impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("Item not found"))?;

        raw.parse()
            .map(ItemIdPath)
            .map_err(|_| AppError::not_found("Item not found"))
    }
}

/// JSON 或 url-encoded 请求体；空请求体得到 `T::default()`
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers()).unwrap_or_default();
        let method = req.method().clone();
        let headers = req.headers().clone();
        let extensions = req.extensions().clone();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let mut req = Request::new(Body::from(bytes));
        *req.method_mut() = method;
        *req.headers_mut() = headers;
        *req.extensions_mut() = extensions;

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            Ok(Self(value))
        } else if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            Ok(Self(value))
        } else {
            Err(AppError::validation(
                "Expected application/json or application/x-www-form-urlencoded body",
            ))
        }
    }
}

/// 带可选 `photo` 文件的表单
///
/// 主要用于 `multipart/form-data`，同时接受不带文件的 url-encoded / JSON 文本字段。
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    photo: Option<UploadedPhoto>,
}

impl UploadForm {
    pub fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn take_photo(&mut self) -> Option<UploadedPhoto> {
        self.photo.take()
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| body_error(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FIELD_PHOTO {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;

                if form.photo.is_none() {
                    form.photo = Some(UploadedPhoto {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            } else if field.file_name().is_some() {
                debug!(field = %name, "Ignoring unexpected file field");
                field
                    .bytes()
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| body_error(e.status(), e.body_text()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = content_type(req.headers())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            Self::from_multipart(multipart).await
        } else {
            let JsonOrForm(RegisterRequest { name, description }) =
                JsonOrForm::<RegisterRequest>::from_request(req, state).await?;
            let fields = [(FIELD_NAME, name), (FIELD_DESCRIPTION, description)]
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
                .collect();
            Ok(Self {
                fields,
                photo: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemPatch;

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_json_or_form_json() {
        let req = request(Some("application/json"), r#"{"description":"new"}"#);
        let JsonOrForm(patch) = JsonOrForm::<ItemPatch>::from_request(req, &()).await.unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.description.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_json_or_form_urlencoded() {
        let req = request(Some("application/x-www-form-urlencoded"), "name=Saw&description=");
        let JsonOrForm(patch) = JsonOrForm::<ItemPatch>::from_request(req, &()).await.unwrap();
        assert_eq!(patch.name.as_deref(), Some("Saw"));
        assert_eq!(patch.description.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_json_or_form_empty_body() {
        let req = request(None, "");
        let JsonOrForm(patch) = JsonOrForm::<ItemPatch>::from_request(req, &()).await.unwrap();
        assert!(patch.is_empty());
    }

    #[tokio::test]
    async fn test_json_or_form_malformed() {
        let req = request(Some("application/json"), "{not json");
        let err = JsonOrForm::<ItemPatch>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let req = request(Some("text/plain"), "hello");
        let err = JsonOrForm::<ItemPatch>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_json_or_form_over_limit_is_payload_too_large() {
        let body = format!(r#"{{"description":"{}"}}"#, "x".repeat(3 * 1024 * 1024));
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let err = JsonOrForm::<ItemPatch>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), 413);
    }

    #[tokio::test]
    async fn test_upload_form_json_ignores_nulls_and_unknown_fields() {
        let req = request(
            Some("application/json"),
            r#"{"inventory_name":"X","description":null,"qty":3}"#,
        );
        let mut form = UploadForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.text("inventory_name").as_deref(), Some("X"));
        assert_eq!(form.text("description"), None);
        assert_eq!(form.text("qty"), None);
    }

    #[tokio::test]
    async fn test_upload_form_multipart() {
        let body = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"inventory_name\"\r\n\r\n\
            Hammer\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"photo\"; filename=\"h.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNGDATA\r\n\
            --XYZ--\r\n";
        let req = request(Some("multipart/form-data; boundary=XYZ"), body);

        let mut form = UploadForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.text("inventory_name").as_deref(), Some("Hammer"));
        assert_eq!(form.text("description"), None);

        let photo = form.take_photo().unwrap();
        assert_eq!(photo.file_name.as_deref(), Some("h.png"));
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));
        assert_eq!(&photo.bytes[..], b"PNGDATA");
    }

    #[tokio::test]
    async fn test_upload_form_urlencoded_has_no_photo() {
        let req = request(
            Some("application/x-www-form-urlencoded"),
            "inventory_name=Drill&description=cordless",
        );
        let mut form = UploadForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.text("inventory_name").as_deref(), Some("Drill"));
        assert_eq!(form.text("description").as_deref(), Some("cordless"));
        assert!(form.take_photo().is_none());
    }
}
