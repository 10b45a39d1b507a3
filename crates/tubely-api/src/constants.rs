//! Application-wide constants

/// Issuer claim required on access tokens
pub const JWT_ISSUER: &str = "tubely-access";

/// Multipart field carrying a thumbnail image
pub const THUMBNAIL_FORM_FIELD: &str = "thumbnail";

/// Multipart field carrying a video file
pub const VIDEO_FORM_FIELD: &str = "video";

/// Route prefix the in-memory thumbnail backend is served under
pub const THUMBNAIL_ROUTE_PREFIX: &str = "/api/thumbnails";

/// Route prefix the local asset root is served under
pub const ASSETS_ROUTE_PREFIX: &str = "/assets";
