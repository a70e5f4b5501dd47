use std::borrow::Cow;
use std::fs;
use std::path::Path;

use macroquad::texture::Image;
use rust_embed::RustEmbed;

use crate::error::SimError;
use crate::terrain::Terrain;

pub const DEFAULT_MAP: &str = "hills.png";

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

pub fn get_asset_bytes(name: &str) -> Option<Cow<'static, [u8]>> {
    Asset::get(name).map(|f| f.data)
}

/// Decodes a PNG map, from `path` or the embedded default, into its image and the terrain
/// seeded from the image's alpha channel.
pub fn load_map(path: Option<&Path>) -> Result<(Image, Terrain), SimError> {
    let bytes = match path {
        Some(path) => Cow::Owned(
            fs::read(path).map_err(|e| SimError::MapLoad(format!("{}: {}", path.display(), e)))?,
        ),
        None => get_asset_bytes(DEFAULT_MAP)
            .ok_or_else(|| SimError::MapLoad(format!("missing embedded map {}", DEFAULT_MAP)))?,
    };
    decode_map(&bytes)
}

pub fn decode_map(bytes: &[u8]) -> Result<(Image, Terrain), SimError> {
    let image = Image::from_file_with_format(bytes, None)
        .map_err(|e| SimError::MapLoad(format!("{:?}", e)))?;
    let alpha: Vec<u8> = image.bytes.chunks_exact(4).map(|pixel| pixel[3]).collect();
    let terrain = Terrain::from_alpha(image.width as u32, image.height as u32, &alpha)?;
    log::info!("Loaded {}x{} map", terrain.width(), terrain.height());
    Ok((image, terrain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_map_has_ground_and_sky() {
        let (image, terrain) = load_map(None).unwrap();
        assert_eq!(image.width as i32, terrain.width());
        assert!(terrain.mask().iter().any(|&solid| solid));
        assert!(terrain.mask().iter().any(|&solid| !solid));
        // The top row is open sky
        assert!((0..terrain.width()).all(|x| !terrain.is_solid(x, 0)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_map(Some(Path::new("no/such/map.png"))).unwrap_err();
        assert!(matches!(err, SimError::MapLoad(message) if message.contains("no/such/map.png")));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(decode_map(b"not a png"), Err(SimError::MapLoad(_))));
    }
}
