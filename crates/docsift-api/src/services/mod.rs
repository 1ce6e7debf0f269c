pub mod conversion;

pub use conversion::{convert_upload, ConvertedUpload};
