// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn new_user(username: &str, email: &str) -> User {
    User {
        username: username.to_owned(),
        email: email.to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        is_active: true,
        is_verified: false,
        is_superuser: false,
    }
}

#[test]
fn full_name() {
    assert_eq!("Jane Doe", new_user("jane", "jane@example.com").full_name());
}

#[test]
fn validate_username() {
    assert!(new_user("jane", "jane@example.com").validate().is_ok());
    assert!(new_user("", "jane@example.com").validate().is_err());
    assert!(new_user("jane doe", "jane@example.com").validate().is_err());
    assert!(
        new_user(&"x".repeat(USERNAME_MAX_LEN), "jane@example.com")
            .validate()
            .is_ok()
    );
    assert!(
        new_user(&"x".repeat(USERNAME_MAX_LEN + 1), "jane@example.com")
            .validate()
            .is_err()
    );
}

#[test]
fn validate_email() {
    assert!(new_user("jane", "jane.example.com").validate().is_err());
    assert!(new_user("jane", "@example.com").validate().is_err());
    assert!(new_user("jane", "jane@").validate().is_err());
}

#[test]
fn validate_password() {
    assert!(Password::new("abc").validate().is_err());
    assert!(Password::new("abcd").validate().is_ok());
    assert_eq!("Password(***)", format!("{:?}", Password::new("secret")));
}

#[test]
fn supported_avatar_types() {
    assert!(is_supported_avatar_type(&mime::IMAGE_JPEG));
    assert!(is_supported_avatar_type(&mime::IMAGE_PNG));
    assert!(!is_supported_avatar_type(&mime::IMAGE_GIF));
}
