//! Images bundled with the application.

use egui::ColorImage;
use mapscreen::reveal::ImageResource;
use thiserror::Error;

const GYM: &[u8] = include_bytes!("../assets/gym.png");

/// Error loading a bundled image.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// No image is bundled under the name.
    #[error("no bundled image named '{0}'")]
    NotFound(String),

    /// The image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Encoded bytes of the bundled image with the given name.
pub fn bundled_bytes(name: &str) -> Option<&'static [u8]> {
    match name {
        "gym" => Some(GYM),
        _ => None,
    }
}

/// Decodes an encoded image into an egui image.
pub fn decode(bytes: &[u8]) -> Result<ColorImage, ImageLoadError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];

    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

/// Loads and decodes the bundled image referenced by `resource`.
pub fn load(resource: &ImageResource) -> Result<ColorImage, ImageLoadError> {
    let bytes = bundled_bytes(resource.name())
        .ok_or_else(|| ImageLoadError::NotFound(resource.name().to_owned()))?;

    log::debug!("Decoding bundled image '{}'", resource.name());
    decode(bytes)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn loads_gym_image() {
        let image = load(&ImageResource::new("gym")).unwrap();
        assert_eq!(image.size, [96, 64]);
        assert_eq!(image.pixels.len(), 96 * 64);
    }

    #[test]
    fn unknown_image() {
        assert_matches!(
            load(&ImageResource::new("park")),
            Err(ImageLoadError::NotFound(name)) if name == "park"
        );
    }

    #[test]
    fn invalid_bytes() {
        assert_matches!(decode(b"not an image"), Err(ImageLoadError::Decode(_)));
    }
}
