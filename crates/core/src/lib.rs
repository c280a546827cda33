// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod image;
pub mod util;

mod entity;
pub use self::entity::*;

pub mod user;
pub use self::user::{User, UserId};

pub mod map;
pub use self::map::{Entity as MapEntity, EntityUid as MapUid, Map, MapData};

pub mod prelude {
    // Re-export trait methods from semval
    pub use semval::{IsValid as _, Validate as _};

    pub(crate) use semval::prelude::*;

    pub(crate) use crate::{entity::*, util::clock::*};
}
