// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn truncates_to_milliseconds() {
    let timestamp: Timestamp = "2023-04-01T12:34:56.789123Z".parse().unwrap();
    let truncated = UtcDateTimeMs::from(timestamp);
    assert_eq!(1_680_352_496_789, truncated.unix_timestamp_millis());
    assert_eq!("2023-04-01T12:34:56.789Z", truncated.to_string());
}

#[test]
fn out_of_range_saturates() {
    assert_eq!(
        Timestamp::MAX,
        UtcDateTimeMs::from_unix_timestamp_millis(i64::MAX).to_timestamp()
    );
    assert_eq!(
        Timestamp::MIN,
        UtcDateTimeMs::from_unix_timestamp_millis(i64::MIN).to_timestamp()
    );
}
