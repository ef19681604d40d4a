pub mod credentials;
pub mod duration;

pub use credentials::{ApiCredentials, CredentialsError, DatabaseCredentials};
pub use duration::parse_duration;
