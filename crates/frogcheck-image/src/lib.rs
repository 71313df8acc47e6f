//! FrogCheck Image
//!
//! Preprocessing stages that sit between raw, untrusted upload bytes and the
//! classifier:
//! - [`OrientationNormalizer`]: turns EXIF-rotated photos upright
//! - [`ImageValidator`]: content-type, size, decode, and dimension checks
//! - [`ImageNormalizer`]: size cap, contain-resize, and RGB conversion
//!
//! Every stage is synchronous and CPU-bound. Async callers should run them on
//! a blocking thread.

pub mod normalize;
pub mod orientation;
pub mod validate;

pub use normalize::{cap_dimensions, contain_dimensions, encode_jpeg, ImageNormalizer};
pub use orientation::{read_orientation, DecodedImage, Orientation, OrientationNormalizer};
pub use validate::ImageValidator;
