//! Data passed between pipeline stages.

pub mod block;
pub mod descriptor;
pub mod language;
pub mod style;
pub mod summary;

pub use block::DocumentationBlock;
pub use descriptor::{FunctionDescriptor, Parameter};
pub use language::Language;
pub use style::Style;
pub use summary::{ExceptionDoc, ParamDoc, SummaryResult};
