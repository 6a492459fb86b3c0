//! Models file parser
//!
//! Parses a declarative models file (YAML or JSON) into model descriptors and
//! the resource bindings declared alongside them.
//!
//! ## Format
//! ```yaml
//! info:
//!   title: People API
//!   version: 1.0.0
//! models:
//!   - name: Person
//!     fields:
//!       - {name: id, kind: int, readonly: true}
//!       - {name: name, required: true}
//!       - {name: status, options: [active, inactive], default: active}
//! resources:
//!   - {name: people, model: Person}
//! ```
//!
//! Everything but the model and field names is optional; defaults are
//! filled in by the converter.
//!
//! ## Usage
//! ```rust,ignore
//! use relations_openapi_parser::models::ModelsParser;
//!
//! let parser = ModelsParser::from_file("models.yaml")?;
//! let models = parser.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use converter::snake_case;
pub use parser::{ModelsFormat, ModelsParser};
pub use types::*;
