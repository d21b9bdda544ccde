//! Request-scoped auth values: the callback's authorization code, the parsed token response, and
//! the opaque user profile.

pub mod code;
pub mod profile;
pub mod token;

pub use code::*;
pub use profile::*;
pub use token::*;

pub use oauth2::{AccessToken, AuthorizationCode, ClientId, ClientSecret};
