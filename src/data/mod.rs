pub mod error;
pub mod export;
pub mod parser;
pub mod series;

pub use error::{ExportError, ParseFailure};
pub use series::{DataPoint, DataSeries};
