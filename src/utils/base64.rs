use base64::{engine::general_purpose, Engine as _};

use crate::error::DecodeError;

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// # Arguments
/// * `input` - The Base64 encoded string.
/// * `accept_urlsafe` - A boolean indicating whether to accept URL-safe Base64 encoding.
///
/// Missing `=` padding is restored before decoding.
pub fn base64_decode(input: &str, accept_urlsafe: bool) -> Result<String, DecodeError> {
    let engine = if accept_urlsafe {
        general_purpose::URL_SAFE
    } else {
        general_purpose::STANDARD
    };

    let decoded = engine.decode(pad_base64(input.trim()))?;
    Ok(String::from_utf8(decoded)?)
}

/// Pads a Base64 string with `=` up to the next multiple of four.
pub fn pad_base64(input: &str) -> String {
    let mut padded = input.to_string();
    let rem = padded.len() % 4;
    if rem != 0 {
        padded.push_str(&"=".repeat(4 - rem));
    }
    padded
}

/// Maps standard Base64 characters onto the URL-safe alphabet.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('+', "-").replace('/', "_")
}

/// Converts a Base64 string to URL-safe Base64 format by replacing specific characters.
pub fn url_safe_base64_apply(input: &str) -> String {
    input
        .replace('+', "-")
        .replace('/', "_")
        .replace('=', "") // Remove padding
}

/// Decodes a URL-safe Base64 string, tolerating standard-alphabet characters
/// and stripped padding.
pub fn url_safe_base64_decode(input: &str) -> Result<String, DecodeError> {
    base64_decode(&url_safe_base64_reverse(input), true)
}

/// Encodes a string to URL-safe Base64 format.
pub fn url_safe_base64_encode(input: &str) -> String {
    url_safe_base64_apply(&base64_encode(input))
}
