pub mod guard;
pub mod token;

pub use guard::{authorize, authorize_request};
pub use token::{authenticate, identify, TokenError, INVALID_USER_ID};
