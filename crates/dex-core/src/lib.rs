//! Classification of raw attribute records into catalog definitions.

pub mod error;

mod abilities;
mod base;
pub mod builder;
mod card;
pub mod context;
pub mod inconsistency;
mod product;
pub mod rules;
pub mod skip;
pub mod translate;

pub use builder::{BuiltItem, Classified, build_definition, check_content, classify};
pub use context::ClassifyContext;
pub use error::{ClassifyError, Result};
pub use inconsistency::{Inconsistency, InconsistencyLog};
pub use skip::{SkipReason, skip_reason};
pub use translate::{Translator, strip_html};
