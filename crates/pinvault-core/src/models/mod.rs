pub mod metadata;
pub mod upload;

pub use metadata::{ContentKind, SloganDetails, UploadMetadata};
pub use upload::{MediaCategory, UploadFile, UploadRecord};
