// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::user::Password;

use super::*;
use crate::user::{UserRead, export_user};

pub mod login;
pub mod logout;
pub mod register;
pub mod reset_password;

/// A newly opened session.
///
/// The token is not part of the response body and must be delivered
/// to the client as a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub user: UserRead,
    pub token: String,
}
