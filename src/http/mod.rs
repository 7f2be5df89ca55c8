pub mod bodydecoder;
pub mod contenttype;
pub mod headers;
pub mod xmldocument;

// Re-exports for convenience
pub use bodydecoder::{BodyDecoder, BodyValue};
pub use contenttype::{ContentTypes, MediaType};
pub use headers::HeaderCollection;
pub use xmldocument::XmlElement;
