// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use mime::Mime;

use crate::prelude::*;

/// Binary image data together with its media type.
///
/// Used for both map thumbnails and user avatars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    pub content_type: Mime,
    pub data: Vec<u8>,
}

impl ImageData {
    #[must_use]
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            content_type: mime::IMAGE_JPEG,
            data,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageDataInvalidity {
    Empty,
    NotAnImage,
}

impl Validate for ImageData {
    type Invalidity = ImageDataInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.is_empty(), Self::Invalidity::Empty)
            .invalidate_if(
                self.content_type.type_() != mime::IMAGE,
                Self::Invalidity::NotAnImage,
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_image_data() {
        assert!(ImageData::jpeg(vec![0xff, 0xd8]).validate().is_ok());
        assert!(ImageData::jpeg(Vec::new()).validate().is_err());
        let text = ImageData {
            content_type: mime::TEXT_PLAIN,
            data: b"hello".to_vec(),
        };
        assert!(text.validate().is_err());
    }
}
