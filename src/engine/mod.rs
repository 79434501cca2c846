pub mod feedback;
pub mod frame;
pub mod frame_source;
pub mod render;

pub use feedback::FeedbackEngine;
pub use frame::{Frame, FrameShape};
pub use frame_source::{FrameSource, GenerationRequest};
pub use render::{persist, render, ArtifactLayout, ArtifactPaths};
