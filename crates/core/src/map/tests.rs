// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

const OWNER: UserId = UserId::new(1);
const OTHER: UserId = UserId::new(2);

fn new_map(private: bool) -> Map {
    Map {
        owner: OWNER,
        name: "Metropolis".to_owned(),
        private,
        data: MapData::new(),
        last_played_at: None,
    }
}

#[test]
fn public_map_is_visible_to_everyone() {
    let map = new_map(false);
    assert!(map.is_visible_to(None));
    assert!(map.is_visible_to(Some(OWNER)));
    assert!(map.is_visible_to(Some(OTHER)));
}

#[test]
fn private_map_is_only_visible_to_owner() {
    let map = new_map(true);
    assert!(!map.is_visible_to(None));
    assert!(map.is_visible_to(Some(OWNER)));
    assert!(!map.is_visible_to(Some(OTHER)));
}

#[test]
fn ownership_ignores_visibility() {
    for private in [false, true] {
        let map = new_map(private);
        assert!(map.is_owned_by(OWNER));
        assert!(!map.is_owned_by(OTHER));
    }
}

#[test]
fn validate_name() {
    assert!(new_map(false).validate().is_ok());
    let blank = Map {
        name: "  \t ".to_owned(),
        ..new_map(false)
    };
    assert!(blank.validate().is_err());
    let too_long = Map {
        name: "x".repeat(NAME_MAX_LEN + 1),
        ..new_map(false)
    };
    assert!(too_long.validate().is_err());
    let padded = Map {
        name: format!("  {}  ", "x".repeat(NAME_MAX_LEN)),
        ..new_map(false)
    };
    assert!(padded.validate().is_ok());
}
