// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

fn main() {
    // Re-embed the migrations whenever one of the SQL files changes.
    println!("cargo:rerun-if-changed=migrations");
}
