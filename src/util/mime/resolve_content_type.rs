use mime_guess::from_path;

/// Picks the stored content type for an upload: the declared one if present,
/// otherwise a guess from the filename, otherwise `application/octet-stream`.
pub fn resolve_content_type(declared: Option<&str>, filename: Option<&str>) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|ct| !ct.is_empty()) {
        return declared.to_owned();
    }

    match filename {
        Some(name) => from_path(name).first_or_octet_stream().to_string(),
        None => mime_guess::mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}
