//! Asset key derivation.
//!
//! Key format: `{stem}{extension}`, where the stem is either the owner id
//! (deterministic, last write wins) or 32 random bytes in unpadded base64url
//! (every upload kept). The extension comes from the media type subtype.

use crate::traits::AssetKey;
use crate::KeyStrategy;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use std::sync::Arc;

const FALLBACK_EXTENSION: &str = ".bin";
const RANDOM_KEY_BYTES: usize = 32;

/// Map a media type to a file extension.
///
/// `image/png` becomes `.png`. Anything that does not split into exactly two
/// non-empty parts on `/` becomes `.bin`. The subtype is used verbatim, so
/// callers validate the media type before trusting the extension.
pub fn media_type_extension(media_type: &str) -> String {
    let parts: Vec<&str> = media_type.split('/').collect();
    match parts.as_slice() {
        [kind, subtype] if !kind.is_empty() && !subtype.is_empty() => format!(".{}", subtype),
        _ => FALLBACK_EXTENSION.to_string(),
    }
}

/// Strategy for naming an asset in its backend.
pub trait KeyDeriver: Send + Sync {
    fn derive_key(&self, owner_id: &str, media_type: &str) -> AssetKey;

    fn strategy(&self) -> KeyStrategy;
}

/// `{owner_id}{ext}`. A new upload of the same type replaces the old asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicKeys;

impl KeyDeriver for DeterministicKeys {
    fn derive_key(&self, owner_id: &str, media_type: &str) -> AssetKey {
        AssetKey::new(format!("{}{}", owner_id, media_type_extension(media_type)))
    }

    fn strategy(&self) -> KeyStrategy {
        KeyStrategy::Deterministic
    }
}

/// Random opaque stem. The owner's URL field is the only pointer to the
/// current asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeys;

impl KeyDeriver for RandomKeys {
    fn derive_key(&self, _owner_id: &str, media_type: &str) -> AssetKey {
        let bytes: [u8; RANDOM_KEY_BYTES] = rand::random();
        AssetKey::new(format!(
            "{}{}",
            URL_SAFE_NO_PAD.encode(bytes),
            media_type_extension(media_type)
        ))
    }

    fn strategy(&self) -> KeyStrategy {
        KeyStrategy::Random
    }
}

pub fn key_deriver_for(strategy: KeyStrategy) -> Arc<dyn KeyDeriver> {
    match strategy {
        KeyStrategy::Deterministic => Arc::new(DeterministicKeys),
        KeyStrategy::Random => Arc::new(RandomKeys),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_media_type() {
        assert_eq!(media_type_extension("image/png"), ".png");
        assert_eq!(media_type_extension("image/jpeg"), ".jpeg");
        assert_eq!(media_type_extension("video/mp4"), ".mp4");
        assert_eq!(media_type_extension("image/svg+xml"), ".svg+xml");
    }

    #[test]
    fn test_malformed_media_type_maps_to_bin() {
        assert_eq!(media_type_extension(""), ".bin");
        assert_eq!(media_type_extension("png"), ".bin");
        assert_eq!(media_type_extension("image/"), ".bin");
        assert_eq!(media_type_extension("/png"), ".bin");
        assert_eq!(media_type_extension("a/b/c"), ".bin");
    }

    #[test]
    fn test_deterministic_key() {
        let keys = DeterministicKeys;
        assert_eq!(keys.derive_key("v1", "image/png").as_str(), "v1.png");
        assert_eq!(
            keys.derive_key("v1", "image/png"),
            keys.derive_key("v1", "image/png")
        );
        assert_eq!(keys.derive_key("v1", "video/mp4").as_str(), "v1.mp4");
        assert_eq!(keys.derive_key("v1", "weird").as_str(), "v1.bin");
    }

    #[test]
    fn test_random_keys_are_opaque_and_distinct() {
        let owner = "5b2f8c7e-9d41-4a0b-8e3c-1f6a7d9e2b40";
        let keys = RandomKeys;
        let first = keys.derive_key(owner, "image/png");
        let second = keys.derive_key(owner, "image/png");

        assert_ne!(first, second);
        assert!(first.as_str().ends_with(".png"));
        assert!(!first.as_str().contains(owner));

        let stem = first.as_str().trim_end_matches(".png");
        // 32 bytes, unpadded base64
        assert_eq!(stem.len(), 43);
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_key_deriver_for_strategy() {
        assert_eq!(
            key_deriver_for(KeyStrategy::Deterministic).strategy(),
            KeyStrategy::Deterministic
        );
        assert_eq!(
            key_deriver_for(KeyStrategy::Random).strategy(),
            KeyStrategy::Random
        );
    }
}
