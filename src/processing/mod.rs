pub mod downsampling;
pub mod statistics;

pub use downsampling::{downsample, DownsampleError};
pub use statistics::DataStats;
