use crate::engine::{Frame, FrameShape};
use crate::errors::TransformError;

/// The learned image-to-image model, loaded once at startup.
///
/// `predict` must be pure: the same frame always yields the same output, and
/// nothing carries over between calls.
pub trait Transformation: Send + Sync {
    /// Shape of the frames the model accepts and produces.
    fn input_shape(&self) -> FrameShape;

    fn predict(&self, frame: &Frame) -> Result<Frame, TransformError>;

    fn name(&self) -> &str;
}
