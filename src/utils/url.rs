//! URL decoding utilities

/// Decodes a percent-encoded string
///
/// # Arguments
/// * `input` - The percent-encoded string to decode
///
/// # Returns
/// * String containing the decoded input
/// * Returns the original string if the decoded bytes are not valid UTF-8
///
/// # Examples
/// ```
/// use submerge::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Checks whether a source identifier points at a remote HTTP(S) resource
pub fn is_link(link: &str) -> bool {
    let lower = link.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
