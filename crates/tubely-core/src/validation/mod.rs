//! Media validation
//!
//! Size and media type checks applied to an upload before anything is written.
//! The policy is data (one per asset class) so thumbnails and videos share the
//! same validator code.

/// Validation errors for uploaded media
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Missing Content-Type for uploaded file")]
    MissingContentType,

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },
}

/// Limits that apply to one class of uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPolicy {
    pub max_size_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl MediaPolicy {
    pub fn new(max_size_bytes: u64, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_size_bytes,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| normalize_media_type(&ct))
                .collect(),
        }
    }

    /// 10 MiB, JPEG or PNG.
    pub fn thumbnail_default() -> Self {
        Self::new(
            10 << 20,
            vec!["image/jpeg".to_string(), "image/png".to_string()],
        )
    }

    /// 1 GiB, MP4 only.
    pub fn video_default() -> Self {
        Self::new(1 << 30, vec!["video/mp4".to_string()])
    }
}

/// Strip parameters (`; charset=...`) and lower-case a media type.
pub fn normalize_media_type(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Media file validator
///
/// Pure checks against a [`MediaPolicy`]; performs no I/O.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    policy: MediaPolicy,
}

impl MediaValidator {
    pub fn new(policy: MediaPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MediaPolicy {
        &self.policy
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.policy.max_size_bytes
    }

    /// Validate payload size. A payload of exactly the maximum is accepted.
    pub fn validate_size(&self, len: u64) -> Result<(), ValidationError> {
        if len > self.policy.max_size_bytes {
            return Err(ValidationError::FileTooLarge {
                size: len,
                max: self.policy.max_size_bytes,
            });
        }
        Ok(())
    }

    /// Validate the declared media type against the allowed set.
    pub fn validate_content_type(&self, media_type: &str) -> Result<(), ValidationError> {
        if media_type.trim().is_empty() {
            return Err(ValidationError::MissingContentType);
        }

        let normalized = normalize_media_type(media_type);
        if !self.policy.allowed_content_types.contains(&normalized) {
            return Err(ValidationError::InvalidContentType {
                content_type: normalized,
                allowed: self.policy.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Size first, then media type.
    pub fn validate(&self, len: u64, media_type: &str) -> Result<(), ValidationError> {
        self.validate_size(len)?;
        self.validate_content_type(media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumbnail_validator() -> MediaValidator {
        MediaValidator::new(MediaPolicy::thumbnail_default())
    }

    #[test]
    fn test_exact_max_size_is_accepted() {
        let validator = thumbnail_validator();
        assert!(validator.validate(10 * 1024 * 1024, "image/png").is_ok());
    }

    #[test]
    fn test_one_byte_over_max_is_rejected() {
        let validator = thumbnail_validator();
        let err = validator
            .validate(10 * 1024 * 1024 + 1, "image/png")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size: 10 * 1024 * 1024 + 1,
                max: 10 * 1024 * 1024
            }
        );
    }

    #[test]
    fn test_size_is_checked_before_type() {
        let validator = thumbnail_validator();
        let err = validator.validate(u64::MAX, "text/plain").unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
    }

    #[test]
    fn test_empty_content_type_is_missing() {
        let validator = thumbnail_validator();
        assert_eq!(
            validator.validate(100, "").unwrap_err(),
            ValidationError::MissingContentType
        );
        assert_eq!(
            validator.validate(100, "   ").unwrap_err(),
            ValidationError::MissingContentType
        );
    }

    #[test]
    fn test_empty_content_type_is_missing_even_with_empty_allowed_set() {
        let validator = MediaValidator::new(MediaPolicy::new(100, vec![]));
        assert_eq!(
            validator.validate_content_type("").unwrap_err(),
            ValidationError::MissingContentType
        );
    }

    #[test]
    fn test_disallowed_content_type_is_rejected() {
        let validator = thumbnail_validator();
        match validator.validate(100, "image/gif").unwrap_err() {
            ValidationError::InvalidContentType {
                content_type,
                allowed,
            } => {
                assert_eq!(content_type, "image/gif");
                assert_eq!(allowed, vec!["image/jpeg", "image/png"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_content_type_parameters_and_case_are_ignored() {
        let validator = thumbnail_validator();
        assert!(validator
            .validate_content_type("Image/PNG; charset=binary")
            .is_ok());
    }

    #[test]
    fn test_video_policy() {
        let validator = MediaValidator::new(MediaPolicy::video_default());
        assert!(validator.validate(1 << 30, "video/mp4").is_ok());
        assert!(validator.validate(100, "video/webm").is_err());
    }
}
