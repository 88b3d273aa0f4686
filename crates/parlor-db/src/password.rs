use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 of the UTF-8 password.
///
/// Unsalted: equal passwords produce equal digests across users. Kept so that
/// user files written by earlier deployments keep verifying.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
