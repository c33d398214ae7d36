//! Binary-file guard.
//!
//! Runs before every read-modify-write text operation. Three gates, in
//! order: a file-extension blocklist, a magic-number probe on the leading
//! bytes, and a NUL-byte scan over the same prefix sample. Any I/O error
//! while probing counts as binary.

use std::io::Read as _;
use std::path::Path;

/// Extensions refused without opening the file.
const BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "obj", "o", "a", "lib", "class", "jar", "war", "wasm",
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "tiff", "webp", "zip", "gz", "tgz", "bz2", "xz",
    "7z", "rar", "tar", "pdf", "mp3", "mp4", "avi", "mov", "mkv", "wav", "flac", "ogg", "woff",
    "woff2", "ttf", "otf", "eot", "db", "sqlite",
];

/// Bytes sampled from offset 0 for the magic and NUL probes.
const PROBE_BYTES: u64 = 8192;

/// Leading-byte signatures: ZIP, GZIP, JPEG, PNG, PDF, PE/EXE, ELF.
const MAGIC_NUMBERS: &[&[u8]] = &[
    b"PK\x03\x04",
    &[0x1F, 0x8B],
    &[0xFF, 0xD8, 0xFF],
    &[0x89, 0x50, 0x4E, 0x47],
    b"%PDF",
    b"MZ",
    &[0x7F, 0x45, 0x4C, 0x46],
];

/// Whether `path` must be refused as binary content.
pub fn is_binary(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return true;
        }
    }
    probe(path).unwrap_or(true)
}

fn probe(path: &Path) -> std::io::Result<bool> {
    let mut file = std::fs::File::open(path)?;
    let mut prefix = Vec::with_capacity(PROBE_BYTES as usize);
    file.by_ref().take(PROBE_BYTES).read_to_end(&mut prefix)?;

    // Empty files are text.
    if prefix.is_empty() {
        return Ok(false);
    }
    if MAGIC_NUMBERS.iter().any(|magic| prefix.starts_with(magic)) {
        return Ok(true);
    }
    Ok(prefix.contains(&0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_blocklist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("image.png");
        // Refused on extension alone, even with text content.
        std::fs::write(&path, "just text").expect("write");
        assert!(is_binary(&path));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("archive.ZIP");
        std::fs::write(&path, "x").expect("write");
        assert!(is_binary(&path));
    }

    #[test]
    fn test_empty_file_is_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").expect("write");
        assert!(!is_binary(&path));
    }

    #[test]
    fn test_magic_number_detected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("noext");
        std::fs::write(&path, [0x7F, b'E', b'L', b'F', 1, 2, 3]).expect("write");
        assert!(is_binary(&path));
    }

    #[test]
    fn test_nul_byte_detected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.txt");
        std::fs::write(&path, b"looks like text\0but is not").expect("write");
        assert!(is_binary(&path));
    }

    #[test]
    fn test_plain_text_passes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain utf-8 text\nwith lines\n").expect("write");
        assert!(!is_binary(&path));
    }

    #[test]
    fn test_missing_file_counts_as_binary() {
        assert!(is_binary(Path::new("/nonexistent/anchor-edit-test-file")));
    }
}
