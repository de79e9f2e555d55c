use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::edge::types::{EdgeMask, EdgeParams};
use crate::image_pipeline::frame::GrayscaleFrame;

pub trait EdgeDetector {
    fn detect(&self, gray: &GrayscaleFrame, params: &EdgeParams) -> Result<EdgeMask>;
}
