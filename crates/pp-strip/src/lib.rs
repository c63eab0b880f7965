/// Background stripper: exact-white keying, crop to content, PNG output.

pub mod batch;
pub mod crop;
pub mod error;
pub mod key;

pub use batch::{StripOutcome, StripReport, strip_backgrounds, strip_image};
pub use crop::{BoundingBox, content_bounds, crop_to_content};
pub use error::StripError;
pub use key::key_out_white;
