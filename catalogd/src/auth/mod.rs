//! Authentication for the admin console.
//!
//! Browser-based sessions only: admins log in via `/api/auth/login` with
//! email/password, get a signed JWT in an HTTP-only cookie, and mutation
//! endpoints extract [`CurrentUser`](crate::api::models::users::CurrentUser)
//! from that cookie.
//!
//! - [`current_user`]: request extractor and the ADMIN role check
//! - [`password`]: Argon2id password hashing and verification
//! - [`session`]: JWT session token creation and verification

pub mod current_user;
pub mod password;
pub mod session;
