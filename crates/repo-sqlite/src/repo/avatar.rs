// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{UserId, image::ImageData};
use citygen_repo::avatar::AvatarRepo;

use crate::{
    db::user_avatar::{models::*, schema::*},
    prelude::*,
};

impl AvatarRepo for crate::Connection<'_> {
    fn upsert_user_avatar(
        &mut self,
        updated_at: UtcDateTimeMs,
        user_id: UserId,
        avatar: &ImageData,
    ) -> RepoResult<()> {
        let insertable = InsertableRecord::bind(updated_at, user_id, avatar);
        diesel::insert_into(user_avatar::table)
            .values(&insertable)
            .on_conflict(user_avatar::user_id)
            .do_update()
            .set((
                user_avatar::row_updated_ms.eq(insertable.row_updated_ms),
                user_avatar::content_type.eq(insertable.content_type),
                user_avatar::data.eq(insertable.data),
            ))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        Ok(())
    }

    fn load_user_avatar(&mut self, user_id: UserId) -> RepoResult<ImageData> {
        let (content_type, data) = user_avatar::table
            .select((user_avatar::content_type, user_avatar::data))
            .filter(user_avatar::user_id.eq(user_id.to_inner()))
            .first::<(String, Vec<u8>)>(self.as_mut())
            .map_err(repo_error)?;
        let content_type = content_type.parse().map_err(anyhow::Error::from)?;
        Ok(ImageData { content_type, data })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::{prelude::tests::*, repo::tests::insert_user};

    #[test]
    fn upsert_replaces_avatar() -> TestResult<()> {
        let mut db = establish_connection()?;
        let mut db = crate::Connection::new(&mut db);
        let user_id = insert_user(&mut db, "alice")?;
        assert!(matches!(
            db.load_user_avatar(user_id),
            Err(RepoError::NotFound)
        ));

        let jpeg = ImageData::jpeg(vec![1, 2, 3]);
        db.upsert_user_avatar(UtcDateTimeMs::now(), user_id, &jpeg)?;
        assert_eq!(jpeg, db.load_user_avatar(user_id)?);

        let png = ImageData {
            content_type: mime::IMAGE_PNG,
            data: vec![4, 5],
        };
        db.upsert_user_avatar(UtcDateTimeMs::now(), user_id, &png)?;
        assert_eq!(png, db.load_user_avatar(user_id)?);
        Ok(())
    }
}
