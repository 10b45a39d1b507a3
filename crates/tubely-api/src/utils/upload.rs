//! Common utilities for file upload handlers

use axum::extract::Multipart;
use bytes::BytesMut;
use tubely_core::AppError;

use crate::services::upload::ExtractedFile;

/// Human readable size for error messages: whole mebibytes as "10MB", anything else in bytes.
pub fn format_size(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Read the file part named `field_name` from a multipart body.
///
/// Other fields are skipped. The part is read chunk by chunk and rejected as
/// soon as it grows past `max_size`, so an oversized upload is never buffered
/// in full. A missing part, or a part without a filename, is a bad request.
pub async fn extract_form_file(
    multipart: &mut Multipart,
    field_name: &str,
    asset_name: &str,
    max_size: u64,
) -> Result<ExtractedFile, AppError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let filename = field.file_name().map(str::to_string).ok_or_else(|| {
            AppError::BadRequest(format!("Field '{}' must be a file", field_name))
        })?;
        let content_type = field.content_type().unwrap_or_default().to_string();

        let mut data = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?
        {
            if (data.len() + chunk.len()) as u64 > max_size {
                return Err(AppError::BadRequest(format!(
                    "{} file exceeds the maximum allowed size of {}",
                    capitalize(asset_name),
                    format_size(max_size)
                )));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(ExtractedFile {
            data: data.freeze(),
            filename,
            content_type,
        });
    }

    Err(AppError::BadRequest(format!(
        "{} file missing",
        capitalize(asset_name)
    )))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10 * 1024 * 1024), "10MB");
        assert_eq!(format_size(1 << 30), "1024MB");
        assert_eq!(format_size(1500), "1500 bytes");
        assert_eq!(format_size(0), "0 bytes");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("thumbnail"), "Thumbnail");
        assert_eq!(capitalize(""), "");
    }
}
