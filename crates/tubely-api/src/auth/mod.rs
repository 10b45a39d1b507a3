//! Authentication: bearer JWT validation and the request extension it produces.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::JwtValidator;
pub use models::{AuthUser, JwtClaims};
