mod temp_file;

pub use temp_file::{extract_document, TempUpload};
