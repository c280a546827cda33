// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Share and explore generated city maps.
//!
//! Re-exports the layers of the backend behind feature flags.

pub use citygen_core::*;

pub mod prelude {
    pub use semval::prelude::*;
}

#[cfg(feature = "api")]
pub mod api {
    pub use citygen_core_api::*;
}

#[cfg(feature = "repo")]
pub mod repo {
    pub use citygen_repo::*;
}

#[cfg(feature = "usecases")]
pub mod usecases {
    pub use citygen_usecases::*;
}

#[cfg(feature = "sqlite")]
pub mod storage_sqlite {
    pub use citygen_storage_sqlite::*;
}

#[cfg(feature = "sqlite")]
pub mod repo_sqlite {
    pub use citygen_repo_sqlite::*;
}

#[cfg(feature = "sqlite")]
pub mod usecases_sqlite {
    pub use citygen_usecases_sqlite::*;
}
