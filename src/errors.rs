use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — ensure the magic number is correct")]
    DecryptionFailed,

    #[error("Record for \"{service}\" is corrupted — its {field} field cannot be decrypted")]
    CorruptedRecord { service: String, field: &'static str },

    // --- Vault errors ---
    #[error("{0}")]
    Validation(String),

    #[error("Can't find \"{0}\"")]
    ServiceNotFound(String),

    #[error("Invalid import document: {0}")]
    InvalidDocument(String),

    #[error("Import contains plaintext entries — a magic number is required to encrypt them")]
    PassphraseRequired,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
