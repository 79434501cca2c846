pub mod rectifier;
pub mod transformation;
pub mod transport;

pub use rectifier::{Rectified, Rectifier};
pub use transformation::Transformation;
pub use transport::Transport;
