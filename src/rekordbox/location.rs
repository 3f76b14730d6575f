//! Conversion between collection locations and filesystem paths
//!
//! Rekordbox stores track locations as `file://localhost/...` URLs with
//! `/` separators and percent-encoding, on every platform.

use crate::error::{Result, TidyError};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use url::Url;

const LOCATION_PREFIX: &str = "file://localhost";

/// Characters URI decoding leaves escaped (`; / ? : @ & = + $ , #`)
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Decode a collection location into a native filesystem path
pub fn decode(location: &str) -> Result<PathBuf> {
    decode_with_separator(location, MAIN_SEPARATOR)
}

/// Decode a location using `separator` instead of the platform's
pub fn decode_with_separator(location: &str, separator: char) -> Result<PathBuf> {
    // `#` would otherwise start a URL fragment and truncate the path
    let url = Url::parse(&location.replace('#', "%23")).map_err(|e| TidyError::InvalidLocation {
        location: location.to_string(),
        reason: e.to_string(),
    })?;

    let native = to_native_separators(url.path(), separator);
    let decoded = urlencoding::decode(&native).map_err(|e| TidyError::InvalidLocation {
        location: location.to_string(),
        reason: e.to_string(),
    })?;

    Ok(PathBuf::from(decoded.into_owned()))
}

/// Swap `/` for `separator`; with `\` also drop the slash before a drive letter
fn to_native_separators(url_path: &str, separator: char) -> String {
    let native = url_path.replace('/', &separator.to_string());
    if separator == '\\' {
        if let Some(rest) = native.strip_prefix('\\') {
            if has_drive_prefix(rest) {
                return rest.to_string();
            }
        }
    }
    native
}

/// Matches `C:\` style prefixes (uppercase drive letter only)
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_uppercase() && bytes[1] == b':' && bytes[2] == b'\\'
}

/// Encode a filesystem path as a collection location
pub fn encode(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let segments: Vec<String> = raw
        .split('/')
        .map(|segment| {
            // Keep `C:` readable the way the DJ software writes it
            let is_drive = segment.len() == 2
                && segment.ends_with(':')
                && segment.as_bytes()[0].is_ascii_alphabetic();
            if is_drive {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect();

    let joined = segments.join("/");
    if joined.starts_with('/') {
        format!("{}{}", LOCATION_PREFIX, joined)
    } else {
        format!("{}/{}", LOCATION_PREFIX, joined)
    }
}

/// Human-readable form of a location for playlists and reports
///
/// Decodes like a URI decoder (reserved characters stay escaped), then turns
/// `%26` into `&`. Nothing else is unescaped.
pub fn for_display(location: &str) -> String {
    decode_uri(location).replace("%26", "&")
}

fn decode_uri(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(byte) = hex_byte(bytes[i + 1], bytes[i + 2]) {
                if RESERVED.contains(&byte) {
                    out.extend_from_slice(&bytes[i..i + 3]);
                } else {
                    out.push(byte);
                }
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(high: u8, low: u8) -> Option<u8> {
    let high = (high as char).to_digit(16)?;
    let low = (low as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}
