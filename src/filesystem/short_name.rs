//! 8.3 short name encoding.
//!
//! Directory entries store their name as 11 space-padded upper-case bytes: 8 for the
//! base name and 3 for the extension, without the dot. User input is encoded into that
//! form before being compared byte for byte with the on-disk name.

/// Length of an encoded short name.
pub const SHORT_NAME_LEN: usize = 11;

const BASE_LEN: usize = 8;
const EXT_LEN: usize = 3;

/// Encodes a path component into the 11-byte on-disk short name.
///
/// # Parameters
/// - `component`: A single path component typed by the user (e.g. `foo.txt`, `..`)
/// - `is_dir`: Whether the name is matched against a directory entry. Directories
///   carry no extension, so anything after a dot is ignored for them.
///
/// # Returns
/// - `Some(name)`: The upper-cased, space-padded short name
/// - `None`: If the component cannot be expressed as a short name (empty, base longer
///   than 8 bytes or extension longer than 3 bytes)
pub fn encode(component: &str, is_dir: bool) -> Option<[u8; SHORT_NAME_LEN]> {
    let mut name = [b' '; SHORT_NAME_LEN];

    if component == "." || component == ".." {
        name[..component.len()].copy_from_slice(component.as_bytes());
        return Some(name);
    }

    let base = component.split('.').next().unwrap_or_default();
    if base.is_empty() || base.len() > BASE_LEN {
        return None;
    }
    for (dst, src) in name.iter_mut().zip(base.bytes()) {
        *dst = src.to_ascii_uppercase();
    }

    if !is_dir {
        if let Some((_, ext)) = component.rsplit_once('.') {
            if ext.len() > EXT_LEN {
                return None;
            }
            for (dst, src) in name[BASE_LEN..].iter_mut().zip(ext.bytes()) {
                *dst = src.to_ascii_uppercase();
            }
        }
    }

    Some(name)
}

/// Converts an on-disk short name to its display form (`FOO.TXT`, `DIR`, `..`).
pub fn decode(raw: &[u8; SHORT_NAME_LEN]) -> String {
    let base = String::from_utf8_lossy(&raw[..BASE_LEN]);
    let ext = String::from_utf8_lossy(&raw[BASE_LEN..]);
    let base = base.trim_end();
    let ext = ext.trim_end();

    if ext.is_empty() {
        base.to_string()
    } else {
        format!("{base}.{ext}")
    }
}
