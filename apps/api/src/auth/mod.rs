//! Authentication: password hashing, token issuance, and the request extractor
//! that turns a bearer token into an `AuthUser`.

pub mod claims;
pub mod extractor;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod seed;

pub use extractor::AuthUser;
pub use jwt::JwtManager;
