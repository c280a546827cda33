// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use argon2::{
    Argon2,
    password_hash::{self, PasswordHasher as _, PasswordVerifier as _, SaltString},
};
use rand::RngCore as _;

use citygen_core::user::Password;
use citygen_repo::user::PasswordHash;

use super::*;

fn salt() -> password_hash::Result<SaltString> {
    let mut bytes = [0; password_hash::Salt::RECOMMENDED_LENGTH];
    rand::rng().fill_bytes(&mut bytes);
    SaltString::encode_b64(&bytes)
}

/// Hash a clear text password with Argon2id and default parameters.
pub fn hash_password(password: &Password) -> Result<PasswordHash> {
    let salt = salt().map_err(|err| anyhow::anyhow!("failed to generate salt: {err}"))?;
    let hash = Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|err| anyhow::anyhow!("failed to hash password: {err}"))?;
    Ok(PasswordHash(hash.to_string()))
}

pub fn verify_password(password: &Password, password_hash: &PasswordHash) -> Result<bool> {
    let parsed = password_hash::PasswordHash::new(&password_hash.0)
        .map_err(|err| anyhow::anyhow!("malformed password hash: {err}"))?;
    match Argon2::default().verify_password(password.as_str().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(anyhow::anyhow!("failed to verify password: {err}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() -> anyhow::Result<()> {
        let password = Password::new("correct horse");
        let hash = hash_password(&password)?;
        assert!(hash.0.starts_with("$argon2id$"));
        assert!(verify_password(&password, &hash)?);
        assert!(!verify_password(&Password::new("battery staple"), &hash)?);
        Ok(())
    }

    #[test]
    fn salts_differ() -> anyhow::Result<()> {
        let password = Password::new("secret");
        assert_ne!(hash_password(&password)?, hash_password(&password)?);
        Ok(())
    }

    #[test]
    fn reject_malformed_hash() {
        assert!(verify_password(&Password::new("secret"), &PasswordHash("plain".to_owned())).is_err());
    }
}
