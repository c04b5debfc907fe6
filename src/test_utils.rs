//! Test utilities and fixtures.
//!
//! Shared helpers for building candidates, images and synthetic audio files
//! so individual test modules stay focused on behaviour.
//!
//! # Example
//!
//! ```ignore
//! use library_extender::test_utils::{mock_candidate, synthetic_mp3};
//!
//! #[test]
//! fn test_something() {
//!     let dir = tempfile::tempdir().unwrap();
//!     let path = synthetic_mp3(dir.path(), "song.mp3");
//!     let candidate = mock_candidate("Artist - Song");
//!     // ... test logic
//! }
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::model::{ArtworkCandidate, TrackCandidate};

/// Creates a mock search result with the given raw title.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let c = TrackCandidate {
///     thumbnail_url: Some("http://example.com/t.jpg".into()),
///     ..mock_candidate("Artist - Song")
/// };
/// ```
pub fn mock_candidate(title: &str) -> TrackCandidate {
    TrackCandidate {
        id: "dQw4w9WgXcQ".to_string(),
        title: title.to_string(),
        channel: "Test Channel".to_string(),
        duration_seconds: Some(212),
        thumbnail_url: None,
        locator: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
    }
}

/// Encodes a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Png)
}

/// Encodes a solid-colour JPEG of the given size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Jpeg)
}

fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("Failed to encode test image");
    out.into_inner()
}

/// Creates an artwork candidate backed by a real (tiny) PNG.
pub fn mock_artwork(label: &str) -> ArtworkCandidate {
    ArtworkCandidate::decode(label, png_bytes(8, 8)).expect("Test PNG should decode")
}

/// Writes a minimal MPEG-1 Layer III file lofty can parse.
///
/// Ten silent frames: 128 kbps, 44.1 kHz, no padding, so each frame is
/// 417 bytes (4 header bytes plus 413 bytes of zeroed payload).
pub fn synthetic_mp3_bytes() -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
    const FRAME_LEN: usize = 417;

    let mut data = Vec::with_capacity(FRAME_LEN * 10);
    for _ in 0..10 {
        data.extend_from_slice(&HEADER);
        data.extend(std::iter::repeat_n(0u8, FRAME_LEN - HEADER.len()));
    }
    data
}

/// Writes [`synthetic_mp3_bytes`] to `dir/name` and returns the path.
pub fn synthetic_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, synthetic_mp3_bytes()).expect("Failed to write test mp3");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_candidate_defaults() {
        let c = mock_candidate("Artist - Song");
        assert_eq!(c.title, "Artist - Song");
        assert!(c.locator.contains(&c.id));
    }

    #[test]
    fn test_images_decode() {
        assert_eq!(mock_artwork("x").dimensions, Some((8, 8)));
        let jpeg = ArtworkCandidate::decode("j", jpeg_bytes(16, 9)).unwrap();
        assert_eq!(jpeg.dimensions, Some((16, 9)));
    }

    #[test]
    fn test_synthetic_mp3_frame_layout() {
        let bytes = synthetic_mp3_bytes();
        assert_eq!(bytes.len(), 4170);
        assert_eq!(&bytes[417..421], &[0xFF, 0xFB, 0x90, 0x64]);
    }
}
