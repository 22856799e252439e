mod credential;
mod profile;

pub use credential::CredentialStore;
pub use profile::ProfileStore;
