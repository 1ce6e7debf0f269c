//! Test fixtures: upload bodies.

use axum_test::multipart::{MultipartForm, Part};

/// Ten bytes that look like the start of a PDF.
pub fn tiny_pdf() -> Vec<u8> {
    b"%PDF-1.4\n%".to_vec()
}

/// Multipart form with a single `file` field.
pub fn file_form(file_name: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data).file_name(file_name),
    )
}
