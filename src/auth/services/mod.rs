//! Application services for login and request authentication.

mod bearer;
mod login;

pub use bearer::{AuthenticationError, BearerAuthenticator};
pub use login::{LoginError, LoginResult, LoginService};
