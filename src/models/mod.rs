pub mod qa;
pub mod report;

pub use qa::{QaPair, QaRecord};
pub use report::{ConversionReport, FailureKind, ParagraphFailure, SkippedRecord};
