use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
	Argon2,
};

/// Failure of the hash primitive itself, distinct from a wrong password.
#[derive(Debug, thiserror::Error)]
#[error("password hash error: {0}")]
pub struct HashError(argon2::password_hash::Error);

/// Hashes a password with a freshly generated random salt, returning the
/// PHC-string digest.
pub fn hash(hasher: &Argon2<'_>, plain: &str) -> Result<String, HashError> {
	let salt = SaltString::generate(&mut OsRng);

	Ok(hasher
		.hash_password(plain.as_bytes(), &salt)
		.map_err(HashError)?
		.to_string())
}

/// Verifies a password against a stored digest using the algorithm's own
/// constant-time compare. A malformed digest is a [`HashError`], never
/// "password incorrect".
pub fn verify(hasher: &Argon2<'_>, plain: &str, digest: &str) -> Result<bool, HashError> {
	let parsed = PasswordHash::new(digest).map_err(HashError)?;

	match hasher.verify_password(plain.as_bytes(), &parsed) {
		Ok(()) => Ok(true),
		Err(argon2::password_hash::Error::Password) => Ok(false),
		Err(error) => Err(HashError(error)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_and_verify_roundtrip() {
		let hasher = Argon2::default();
		let digest = hash(&hasher, "Secur3P@ssw0rd!").expect("hashing should succeed");
		assert!(verify(&hasher, "Secur3P@ssw0rd!", &digest).expect("verify should succeed"));
	}

	#[test]
	fn verify_rejects_wrong_password() {
		let hasher = Argon2::default();
		let digest = hash(&hasher, "correct-horse-battery-staple").unwrap();
		assert!(!verify(&hasher, "wrong-password", &digest).unwrap());
	}

	#[test]
	fn digest_is_salted() {
		let hasher = Argon2::default();
		let first = hash(&hasher, "same-password").unwrap();
		let second = hash(&hasher, "same-password").unwrap();
		assert_ne!(first, second);
	}

	#[test]
	fn malformed_digest_is_a_hash_error() {
		let hasher = Argon2::default();
		assert!(verify(&hasher, "anything", "not-a-valid-digest").is_err());
	}
}
