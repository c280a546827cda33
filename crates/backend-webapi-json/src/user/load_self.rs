// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type ResponseBody = UserRead;

pub fn handle_request(connection: &mut DbConnection, session: Session<'_>) -> Result<ResponseBody> {
    connection
        .transaction::<_, Error, _>(|connection| session.require_requester(connection))
        .map(export_user)
}
