pub mod descriptor;
pub mod document;
pub mod element;
pub mod error;
pub mod id;
pub mod position;
pub mod types;
pub mod value;

pub use descriptor::*;
pub use document::Document;
pub use element::*;
pub use error::{invalid_value, AdmError};
pub use id::*;
pub use position::*;
pub use types::*;
pub use value::*;
