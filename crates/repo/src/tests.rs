// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::prelude::*;

#[test]
fn optional_maps_only_not_found_to_none() {
    assert_eq!(Some(1), Ok::<_, RepoError>(1).optional().unwrap());
    assert_eq!(None, Err::<i32, _>(RepoError::NotFound).optional().unwrap());
    assert!(matches!(
        Err::<i32, _>(RepoError::Conflict).optional(),
        Err(RepoError::Conflict)
    ));
}

#[test]
fn collect_records_into_vec() {
    let mut collector = Vec::<(u8, &str)>::new();
    ReservableRecordCollector::reserve(&mut collector, 2);
    collector.collect(1, "one");
    collector.collect(2, "two");
    assert_eq!(vec![(1, "one"), (2, "two")], collector);
}
