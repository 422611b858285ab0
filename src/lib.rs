pub mod analysis;
pub mod config;
pub mod deserializers;
pub mod error;
pub mod http;
pub mod serializers;

pub use analysis::{AnalysisResult, ContentSubmission, Domain, analyze, analyze_payload};
pub use config::Config;
pub use error::{CourseCraftError, Result};
