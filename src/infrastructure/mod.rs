//! Infrastructure layer: XML serialization and render targets

pub mod error;
pub mod output;
pub mod xml;

pub use error::{InfraError, InfraResult};
pub use xml::XmlWriter;
