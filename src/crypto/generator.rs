//! Random password generation for new entries.

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{VaultError, Result};

/// Characters a generated password is drawn from.
pub const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Length used when the caller does not ask for a specific one.
pub const DEFAULT_LENGTH: usize = 20;

/// Upper bound on requested length.
const MAX_LENGTH: usize = 1024;

/// Generate a password of `length` characters, each drawn uniformly from
/// [`CHARSET`] with the thread-local CSPRNG.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length == 0 || length > MAX_LENGTH {
        return Err(VaultError::CommandFailed(format!(
            "password length must be between 1 and {MAX_LENGTH} (got {length})"
        )));
    }

    let mut rng = rand::rng();
    let password: String = (0..length)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect();

    Ok(Zeroizing::new(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_password(20).unwrap().len(), 20);
        assert_eq!(generate_password(1).unwrap().len(), 1);
    }

    #[test]
    fn only_uses_charset() {
        let pw = generate_password(500).unwrap();
        assert!(pw.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn rejects_zero_and_huge_lengths() {
        assert!(generate_password(0).is_err());
        assert!(generate_password(MAX_LENGTH + 1).is_err());
    }

    #[test]
    fn two_passwords_differ() {
        assert_ne!(*generate_password(32).unwrap(), *generate_password(32).unwrap());
    }
}
