//! Buffered multipart form parsing for the admin upload endpoints.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// A file part from a multipart form.
#[derive(Debug)]
pub struct FormFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// All parts of a multipart form, text and files, keyed by field name.
///
/// Later parts with the same name replace earlier ones.
#[derive(Debug, Default)]
pub struct MultipartForm {
    text: HashMap<String, String>,
    files: HashMap<String, FormFile>,
}

impl MultipartForm {
    /// Drain the request body into memory.
    ///
    /// Browsers submit an empty part with an empty file name when no file was
    /// chosen; those parts are dropped so the field reads as absent.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let file_name = field.file_name().filter(|f| !f.is_empty()).map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                if file_name.is_none() && bytes.is_empty() {
                    continue;
                }
                form.files.insert(
                    name,
                    FormFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.text.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Value of a text field, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Non-blank value of a text field, trimmed.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Remove and return a file part.
    pub fn take_file(&mut self, name: &str) -> Option<FormFile> {
        self.files.remove(name)
    }
}
