//! EXIF orientation handling
//!
//! Phone cameras store pixels in sensor order and record the intended
//! rotation in EXIF tag 0x0112. Only the pure rotations (3, 6, 8) are
//! corrected; mirrored codes pass through unchanged.

use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// EXIF orientation code (1-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// 1: already upright
    #[default]
    Normal,
    /// 2: mirrored horizontally
    MirrorHorizontal,
    /// 3: upside down
    Rotate180,
    /// 4: mirrored vertically
    MirrorVertical,
    /// 5: mirrored, then rotated
    Transpose,
    /// 6: needs a 90° clockwise turn
    Rotate90,
    /// 7: mirrored, then rotated the other way
    Transverse,
    /// 8: needs a 90° counter-clockwise turn
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation code; unknown codes are treated as upright
    pub fn from_exif(code: u32) -> Self {
        match code {
            2 => Self::MirrorHorizontal,
            3 => Self::Rotate180,
            4 => Self::MirrorVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// The EXIF code for this orientation
    pub fn exif_code(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::MirrorHorizontal => 2,
            Self::Rotate180 => 3,
            Self::MirrorVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Whether applying this orientation swaps width and height
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// Read the orientation tag from raw image bytes.
///
/// Never fails: missing EXIF, a malformed tag table, or an absent key all
/// read as [`Orientation::Normal`].
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let exif = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(_) => return Orientation::Normal,
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

/// A decoded bitmap together with the orientation it was captured in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub orientation: Orientation,
}

impl DecodedImage {
    pub fn new(image: DynamicImage, orientation: Orientation) -> Self {
        Self { image, orientation }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Rotates decoded images upright according to their orientation
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationNormalizer;

impl OrientationNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Apply the corrective rotation, if any. The result is always `Normal`.
    pub fn normalize(&self, decoded: DecodedImage) -> DecodedImage {
        let DecodedImage { image, orientation } = decoded;

        let image = match orientation {
            Orientation::Rotate180 => image.rotate180(),
            Orientation::Rotate90 => image.rotate90(),
            Orientation::Rotate270 => image.rotate270(),
            _ => image,
        };

        if orientation != Orientation::Normal {
            debug!(
                exif_code = orientation.exif_code(),
                width = image.width(),
                height = image.height(),
                "Applied orientation correction"
            );
        }

        DecodedImage::new(image, Orientation::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// 4x2 image: left half red, right half blue
    fn split_image() -> DynamicImage {
        let img = RgbImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    fn normalize(orientation: Orientation) -> RgbImage {
        OrientationNormalizer::new()
            .normalize(DecodedImage::new(split_image(), orientation))
            .image
            .to_rgb8()
    }

    #[test]
    fn test_exif_code_round_trip() {
        for code in 1..=8 {
            assert_eq!(Orientation::from_exif(code).exif_code(), code);
        }
        assert_eq!(Orientation::from_exif(0), Orientation::Normal);
        assert_eq!(Orientation::from_exif(9), Orientation::Normal);
    }

    #[test]
    fn test_rotate90_turns_left_edge_to_top() {
        let out = normalize(Orientation::Rotate90);
        assert_eq!(out.dimensions(), (2, 4));
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(0, 3), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_rotate270_turns_left_edge_to_bottom() {
        let out = normalize(Orientation::Rotate270);
        assert_eq!(out.dimensions(), (2, 4));
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(out.get_pixel(0, 3), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_rotate180_swaps_sides() {
        let out = normalize(Orientation::Rotate180);
        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(out.get_pixel(3, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_mirrored_codes_pass_through() {
        let original = split_image().to_rgb8();
        for orientation in [
            Orientation::Normal,
            Orientation::MirrorHorizontal,
            Orientation::MirrorVertical,
            Orientation::Transpose,
            Orientation::Transverse,
        ] {
            assert_eq!(normalize(orientation), original, "{:?}", orientation);
        }
    }

    #[test]
    fn test_result_is_marked_upright() {
        let out = OrientationNormalizer::new()
            .normalize(DecodedImage::new(split_image(), Orientation::Rotate90));
        assert_eq!(out.orientation, Orientation::Normal);
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(b""), Orientation::Normal);
        assert_eq!(read_orientation(b"not an image"), Orientation::Normal);

        let mut png = Vec::new();
        split_image()
            .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();
        assert_eq!(read_orientation(&png), Orientation::Normal);
    }
}
