pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod scan;
pub mod spider;
pub mod version;

pub use config::Config;
pub use error::SpiderError;
pub use model::{ComponentSpec, Comparison, SourceSpec};
pub use scan::Scanner;
pub use spider::Spider;
