//! Multipart form parsing for upload endpoints
//!
//! Buffers text fields and files out of a `multipart/form-data` body.
//! Repeated fields accumulate, and a trailing `[]` on a field name is
//! stripped so array-style clients work too.

use std::collections::HashMap;

use axum::{body::Body, http::HeaderMap};
use http::header;

use crate::error::{Result, ServerError};
use crate::services::playlists::UploadedFile;

pub struct FormData {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Parse a multipart request body
    pub async fn parse(headers: &HeaderMap, body: Body) -> Result<Self> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ServerError::BadRequest("Missing content type".to_string()))?;

        let boundary = multer::parse_boundary(content_type)
            .map_err(|_| ServerError::BadRequest("Expected multipart/form-data".to_string()))?;

        let mut multipart = multer::Multipart::new(body.into_data_stream(), boundary);

        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        let mut files = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name() else {
                continue;
            };
            let name = name.trim_end_matches("[]").to_string();

            if field.file_name().is_some() {
                let content_type = field.content_type().map(ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read upload: {e}")))?;

                files.insert(
                    name,
                    UploadedFile {
                        data: data.to_vec(),
                        content_type,
                    },
                );
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read field: {e}")))?;

                fields.entry(name).or_default().push(value);
            }
        }

        Ok(Self { fields, files })
    }

    /// First value of a text field, if present
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value of a required text field
    pub fn require_text(&self, name: &str) -> Result<&str> {
        self.text(name)
            .ok_or_else(|| ServerError::BadRequest(format!("Missing field: {name}")))
    }

    /// All values of a repeated text field
    pub fn texts(&self, name: &str) -> &[String] {
        self.fields.get(name).map_or(&[], Vec::as_slice)
    }

    /// Remove and return an uploaded file by field name
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
