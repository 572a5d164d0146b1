pub mod base64;
pub mod file;
pub mod http;
pub mod url;

pub use self::base64::{base64_decode, base64_encode, url_safe_base64_decode};
pub use file::{file_get, file_write};
pub use url::{is_link, url_decode};
