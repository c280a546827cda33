// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod access_token;
pub mod avatar;
pub mod favorite;
pub mod map;
pub mod user;
