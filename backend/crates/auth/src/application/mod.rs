//! Auth Application Layer - Use Cases

pub mod manage_keys;
pub mod verify_key;

pub use manage_keys::ManageKeysUseCase;
pub use verify_key::VerifyApiKeyUseCase;
