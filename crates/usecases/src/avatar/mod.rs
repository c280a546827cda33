// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use image::{ImageEncoder as _, Rgb, RgbImage, codecs::jpeg::JpegEncoder};
use rand::{Rng, seq::IndexedRandom as _};

use citygen_core::{
    UserId, image::ImageData, user::is_supported_avatar_type, util::clock::UtcDateTimeMs,
};
use citygen_repo::{avatar::AvatarRepo, user::UserRepo};

use super::*;
use crate::user::{UserRecord, user_not_found};

/// Creates default avatars for new users.
pub trait AvatarGenerator: Send + Sync {
    fn generate_avatar(&self) -> anyhow::Result<ImageData>;
}

/// Background colors of generated avatars.
pub const BACKGROUND_PALETTE: [[u8; 3]; 5] = [
    [0xb6, 0xe3, 0xf4],
    [0xc0, 0xae, 0xde],
    [0xd1, 0xd4, 0xf9],
    [0xff, 0xd5, 0xdc],
    [0xff, 0xdf, 0xbf],
];

const GRID_SIZE: u32 = 8;

const CELL_SIZE: u32 = 32;

/// Width and height in pixels.
pub const AVATAR_SIZE: u32 = GRID_SIZE * CELL_SIZE;

const JPEG_QUALITY: u8 = 90;

/// Horizontally symmetric pixel art on a pastel background.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelAvatarGenerator;

impl PixelAvatarGenerator {
    pub fn generate_with_rng(rng: &mut impl Rng) -> anyhow::Result<ImageData> {
        let background = Rgb(*BACKGROUND_PALETTE
            .choose(rng)
            .ok_or_else(|| anyhow::anyhow!("empty palette"))?);
        // Dark enough to contrast with all background colors
        let foreground = Rgb([
            rng.random_range(0x20..0x90),
            rng.random_range(0x20..0x90),
            rng.random_range(0x20..0x90),
        ]);
        let half = GRID_SIZE.div_ceil(2);
        let mut cells = [[false; GRID_SIZE as usize]; GRID_SIZE as usize];
        for row in &mut cells {
            for col in 0..half {
                let filled = rng.random_bool(0.5);
                row[col as usize] = filled;
                row[(GRID_SIZE - 1 - col) as usize] = filled;
            }
        }
        let img = RgbImage::from_fn(AVATAR_SIZE, AVATAR_SIZE, |x, y| {
            if cells[(y / CELL_SIZE) as usize][(x / CELL_SIZE) as usize] {
                foreground
            } else {
                background
            }
        });
        let mut data = Vec::new();
        JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY).write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(ImageData::jpeg(data))
    }
}

impl AvatarGenerator for PixelAvatarGenerator {
    fn generate_avatar(&self) -> anyhow::Result<ImageData> {
        Self::generate_with_rng(&mut rand::rng())
    }
}

fn avatar_not_found(err: RepoError) -> Error {
    match err {
        // Every user owns an avatar, i.e. the user is missing
        RepoError::NotFound => Error::UserNotFound,
        err => err.into(),
    }
}

pub fn load<Repo>(repo: &mut Repo, username: &str) -> Result<(UserId, ImageData)>
where
    Repo: UserRepo + AvatarRepo,
{
    let (header, _) = repo
        .resolve_user_by_username(username)
        .map_err(user_not_found)?;
    let avatar = repo.load_user_avatar(header.id).map_err(avatar_not_found)?;
    Ok((header.id, avatar))
}

fn authorize(requester: &UserRecord, username: &str) -> Result<()> {
    if requester.user.username == username || requester.user.is_superuser {
        return Ok(());
    }
    Err(Error::Forbidden(format!(
        "not allowed to modify the avatar of user {username}"
    )))
}

/// Replace the avatar of a user with an uploaded image.
///
/// Only the user itself and superusers are permitted.
pub fn replace<Repo>(
    repo: &mut Repo,
    requester: &UserRecord,
    username: &str,
    avatar: ImageData,
) -> Result<ImageData>
where
    Repo: UserRepo + AvatarRepo,
{
    if !is_supported_avatar_type(&avatar.content_type) {
        return Err(InputError(anyhow::anyhow!(
            "unsupported content type {}",
            avatar.content_type
        ))
        .into());
    }
    if avatar.is_empty() {
        return Err(InputError(anyhow::anyhow!("empty image")).into());
    }
    authorize(requester, username)?;
    let (header, _) = repo
        .resolve_user_by_username(username)
        .map_err(user_not_found)?;
    repo.upsert_user_avatar(UtcDateTimeMs::now(), header.id, &avatar)?;
    log::info!("Replaced avatar of user {username}");
    Ok(avatar)
}

/// Replace the avatar of a user with a newly generated one.
pub fn randomize<Repo>(
    repo: &mut Repo,
    requester: &UserRecord,
    username: &str,
    avatar_generator: &dyn AvatarGenerator,
) -> Result<ImageData>
where
    Repo: UserRepo + AvatarRepo,
{
    authorize(requester, username)?;
    let (header, _) = repo
        .resolve_user_by_username(username)
        .map_err(user_not_found)?;
    let avatar = avatar_generator.generate_avatar()?;
    repo.upsert_user_avatar(UtcDateTimeMs::now(), header.id, &avatar)?;
    log::info!("Randomized avatar of user {username}");
    Ok(avatar)
}
