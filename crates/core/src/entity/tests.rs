// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

struct EntityType;

#[test]
fn default_uid_is_nil_and_invalid() {
    assert!(EntityUid::default().validate().is_err());
    assert_eq!(EntityUid::default(), EntityUid::nil());
}

#[test]
fn typed_uid_derefs_to_untyped() {
    let uid = EntityUid::new();
    let typed = EntityUidTyped::<EntityType>::from_untyped(uid);
    assert_eq!(&uid, &*typed);
    assert_eq!(typed, typed.clone());
}

#[test]
fn generated_uids_are_valid_and_distinct() {
    let first = EntityUid::new();
    let second = EntityUid::new();
    assert!(first.validate().is_ok());
    assert!(second.validate().is_ok());
    assert_ne!(first, second);
}

#[test]
fn encode_decode_uid() {
    let uid = EntityUid::new();
    let encoded = uid.to_string();
    assert_eq!(EntityUid::STR_LEN, encoded.len());
    assert_eq!(uid, EntityUid::decode_from(&encoded).unwrap());
    assert_eq!(uid, encoded.parse().unwrap());
}

#[test]
fn decode_invalid_uid() {
    assert!(EntityUid::decode_from("").is_err());
    assert!(EntityUid::decode_from("not-a-valid-uid").is_err());
    // One character too long
    assert!(EntityUid::decode_from("01ARZ3NDEKTSV4RRFFQ69G5FAVX").is_err());
}

#[test]
fn validate_entity_uid() {
    let entity = Entity::<EntityType, ()>::new(EntityUid::nil(), ());
    assert!(entity.uid.validate().is_err());
    let entity = Entity::<EntityType, ()>::new(EntityUid::new(), ());
    assert!(entity.uid.validate().is_ok());
}
