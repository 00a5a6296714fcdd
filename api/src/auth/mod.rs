//! Authentication for the dashboard.
//!
//! There is a single account, identified only by its password. A correct
//! password is exchanged for a signed session token (see [`token`]), which
//! protected routes require as `Authorization: Bearer <token>` (see
//! [`extractor`]).

pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::Auth;
pub use password::PasswordVerifier;
pub use token::TokenIssuer;
