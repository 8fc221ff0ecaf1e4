pub mod credentials;

pub use credentials::{BcryptCredentials, CredentialCheck, Verification};
