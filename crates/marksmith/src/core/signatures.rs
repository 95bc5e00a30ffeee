//! Magic-byte signature table and binary classification.
//!
//! The table is a fixed, priority-ordered list of offset-anchored byte
//! patterns. Order matters: container magics (ZIP, RIFF) and full-length
//! signatures are listed before short generic prefixes, so the most specific
//! pattern always wins. The table is process-wide, immutable, and safe for
//! unsynchronized concurrent reads.
//!
//! Container formats need a second look beyond the outer magic number:
//! a `PK\x03\x04` archive may be a docx/xlsx/pptx/epub, and a `RIFF` chunk
//! may be wav/avi/webp. [`classify_binary`] performs that refinement. TAR has
//! no magic at offset 0 at all, so it is detected from the POSIX `ustar`
//! marker at offset 257 or, for pre-POSIX archives, from a valid header
//! checksum.

use memchr::memmem;

use crate::types::ConfidenceSource;

/// ZIP entry names live near the front of the archive; scanning a bounded
/// window keeps refinement O(1) for arbitrarily large payloads.
const ZIP_SNIFF_WINDOW: usize = 2048;

/// Offset of the `ustar` magic in a POSIX tar header.
const TAR_MAGIC_OFFSET: usize = 257;

/// A single magic-byte signature.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Byte pattern compared against the payload.
    pub pattern: &'static [u8],
    /// Offset at which the pattern is anchored.
    pub offset: usize,
    /// Canonical format label when the pattern matches.
    pub label: &'static str,
    /// Set for container magics that need refinement beyond the prefix.
    container: Option<Container>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Zip,
    Riff,
}

const fn sig(pattern: &'static [u8], label: &'static str) -> Signature {
    Signature {
        pattern,
        offset: 0,
        label,
        container: None,
    }
}

const fn sig_at(pattern: &'static [u8], offset: usize, label: &'static str) -> Signature {
    Signature {
        pattern,
        offset,
        label,
        container: None,
    }
}

const fn container(pattern: &'static [u8], label: &'static str, kind: Container) -> Signature {
    Signature {
        pattern,
        offset: 0,
        label,
        container: Some(kind),
    }
}

/// The signature table, in match-priority order.
pub static SIGNATURES: &[Signature] = &[
    // Documents
    sig(b"%PDF-", "pdf"),
    sig(b"{\\rtf", "rtf"),
    // ZIP container family (docx/xlsx/pptx/epub resolved by refinement)
    container(b"PK\x03\x04", "zip", Container::Zip),
    container(b"PK\x05\x06", "zip", Container::Zip),
    container(b"PK\x07\x08", "zip", Container::Zip),
    // RIFF container family (wav/avi/webp resolved by the FourCC at offset 8)
    container(b"RIFF", "wav", Container::Riff),
    // Images
    sig(b"\x89PNG\r\n\x1a\n", "png"),
    sig(b"\xff\xd8\xff", "jpg"),
    sig(b"GIF8", "gif"),
    sig(b"BM", "bmp"),
    sig(b"\x00\x00\x01\x00", "ico"),
    sig(b"\x00\x00\x02\x00", "cur"),
    sig(b"II*\x00", "tiff"),
    sig(b"MM\x00*", "tiff"),
    // Audio
    sig(b"ID3", "mp3"),
    sig(b"\xff\xfb", "mp3"),
    sig(b"\xff\xf3", "mp3"),
    sig(b"\xff\xf2", "mp3"),
    sig(b"fLaC", "flac"),
    sig(b"OggS", "ogg"),
    sig_at(b"ftyp", 4, "m4a"),
    // Archives
    sig(b"\x1f\x8b", "gz"),
    sig(b"BZh", "bz2"),
    sig(b"\xfd7zXZ\x00", "xz"),
    sig(b"7z\xbc\xaf\x27\x1c", "7z"),
    sig(b"Rar!\x1a\x07\x00", "rar"),
    sig_at(b"ustar", TAR_MAGIC_OFFSET, "tar"),
    // JPEG APP0 fragment, after the MP3 frame-sync patterns so a real
    // `FF D8 FF E0` file is caught by the full JPEG signature above.
    sig(b"\xff\xe0", "jpg"),
];

fn matches_at(bytes: &[u8], signature: &Signature) -> bool {
    let start = signature.offset;
    let end = start + signature.pattern.len();
    // Length check first: inputs shorter than the anchored pattern never match.
    bytes.len() >= end && &bytes[start..end] == signature.pattern
}

/// Look up the highest-priority signature matching the payload.
///
/// Pure function of the input bytes; returns `None` when no pattern matches.
pub fn lookup(bytes: &[u8]) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|signature| matches_at(bytes, signature))
}

/// Classify a payload from its magic bytes alone.
///
/// Resolves container ambiguity (ZIP sub-format, RIFF FourCC) and falls back
/// to checksum-based TAR detection when no prefix pattern matches. Returns
/// `None` for payloads with no recognizable signature; the resolver decides
/// between the `bin` fallback and the short-garbage error.
pub fn classify_binary(bytes: &[u8]) -> Option<(&'static str, ConfidenceSource)> {
    if let Some(signature) = lookup(bytes) {
        let label = match signature.container {
            Some(Container::Zip) => refine_zip(bytes),
            Some(Container::Riff) => refine_riff(bytes),
            None => signature.label,
        };
        return Some((label, ConfidenceSource::Signature));
    }

    if is_tar_header(bytes) {
        return Some(("tar", ConfidenceSource::Signature));
    }

    None
}

/// Refine a ZIP container to a specific Office/EPUB format.
///
/// Office Open XML and EPUB archives carry well-known entry names near the
/// front of the file (`word/`, `xl/`, `ppt/`, the stored `mimetype` entry),
/// so a bounded scan of the raw bytes is enough to tell them apart without
/// parsing the central directory.
fn refine_zip(bytes: &[u8]) -> &'static str {
    let window = &bytes[..bytes.len().min(ZIP_SNIFF_WINDOW)];

    if memmem::find(window, b"word/").is_some() || memmem::find(window, b"document.xml").is_some() {
        return "docx";
    }
    if memmem::find(window, b"xl/").is_some() || memmem::find(window, b"workbook.xml").is_some() {
        return "xlsx";
    }
    if memmem::find(window, b"ppt/").is_some() || memmem::find(window, b"presentation.xml").is_some() {
        return "pptx";
    }
    // The EPUB mimetype entry must be stored uncompressed, so the literal
    // marker is visible right after its local file header.
    if memmem::find(window, b"mimetypeapplication/epub+zip").is_some()
        || memmem::find(window, b"container.xml").is_some()
    {
        return "epub";
    }

    "zip"
}

/// Read the RIFF format code at byte offset 8.
fn refine_riff(bytes: &[u8]) -> &'static str {
    if bytes.len() < 12 {
        return "wav";
    }
    match &bytes[8..12] {
        b"WAVE" => "wav",
        b"AVI " => "avi",
        b"WEBP" => "webp",
        // Unknown RIFF sub-type: treat as WAV, the most common carrier.
        _ => "wav",
    }
}

/// Detect a pre-POSIX tar archive from its header checksum.
///
/// A tar header is a 512-byte block whose bytes, summed with the checksum
/// field (offsets 148..156) replaced by spaces, must equal the octal value
/// stored in that field. An all-zero block fails the octal parse and is
/// rejected.
fn is_tar_header(bytes: &[u8]) -> bool {
    const CHECKSUM_START: usize = 148;
    const CHECKSUM_END: usize = 156;

    if bytes.len() < 512 {
        return false;
    }

    let Some(stored) = parse_octal_field(&bytes[CHECKSUM_START..CHECKSUM_END]) else {
        return false;
    };

    let computed: u64 = bytes[..512]
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if (CHECKSUM_START..CHECKSUM_END).contains(&i) {
                b' ' as u64
            } else {
                b as u64
            }
        })
        .sum();

    computed == stored
}

/// Parse a NUL/space-terminated octal field from a tar header.
fn parse_octal_field(field: &[u8]) -> Option<u64> {
    let digits: Vec<u8> = field
        .iter()
        .copied()
        .skip_while(|b| *b == b' ' || *b == 0)
        .take_while(|b| (b'0'..=b'7').contains(b))
        .collect();

    if digits.is_empty() {
        return None;
    }

    let mut value: u64 = 0;
    for digit in digits {
        value = value.checked_mul(8)?.checked_add((digit - b'0') as u64)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal ZIP local-file-header payload containing the given
    /// entry name.
    fn zip_with_entry(entry_name: &[u8]) -> Vec<u8> {
        let mut bytes = b"PK\x03\x04\x14\x00\x00\x00\x00\x00".to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        bytes.extend_from_slice(entry_name);
        bytes.extend_from_slice(b"content");
        bytes
    }

    /// Build a valid 512-byte pre-POSIX tar header for a file named `name`.
    fn tar_header(name: &[u8]) -> Vec<u8> {
        let mut header = vec![0u8; 512];
        header[..name.len()].copy_from_slice(name);
        // mode/uid/gid/size/mtime fields as octal ASCII
        header[100..107].copy_from_slice(b"0000644");
        header[108..115].copy_from_slice(b"0000000");
        header[116..123].copy_from_slice(b"0000000");
        header[124..135].copy_from_slice(b"00000000010");
        header[136..147].copy_from_slice(b"00000000000");
        header[156] = b'0';

        let checksum: u64 = header
            .iter()
            .enumerate()
            .map(|(i, &b)| if (148..156).contains(&i) { b' ' as u64 } else { b as u64 })
            .sum();
        let field = format!("{:06o}\0 ", checksum);
        header[148..156].copy_from_slice(field.as_bytes());
        header
    }

    #[test]
    fn test_pdf_signature() {
        let (label, source) = classify_binary(b"%PDF-1.4\n%binary").unwrap();
        assert_eq!(label, "pdf");
        assert_eq!(source, ConfidenceSource::Signature);
    }

    #[test]
    fn test_png_full_signature() {
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
        assert_eq!(classify_binary(&bytes).unwrap().0, "png");
    }

    #[test]
    fn test_truncated_signature_never_matches() {
        // Seven bytes of the eight-byte PNG signature.
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A];
        assert!(lookup(&bytes).is_none());
    }

    #[test]
    fn test_riff_disambiguation() {
        let wav = b"RIFF\x24\x00\x00\x00WAVEfmt ";
        let avi = b"RIFF\x24\x00\x00\x00AVI LIST";
        let webp = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
        assert_eq!(classify_binary(wav).unwrap().0, "wav");
        assert_eq!(classify_binary(avi).unwrap().0, "avi");
        assert_eq!(classify_binary(webp).unwrap().0, "webp");
    }

    #[test]
    fn test_riff_truncated_defaults_to_wav() {
        assert_eq!(classify_binary(b"RIFF\x04\x00").unwrap().0, "wav");
    }

    #[test]
    fn test_riff_unknown_fourcc_defaults_to_wav() {
        assert_eq!(classify_binary(b"RIFF\x24\x00\x00\x00ACON....").unwrap().0, "wav");
    }

    #[test]
    fn test_zip_refinement_office() {
        assert_eq!(classify_binary(&zip_with_entry(b"word/document.xml")).unwrap().0, "docx");
        assert_eq!(classify_binary(&zip_with_entry(b"xl/workbook.xml")).unwrap().0, "xlsx");
        assert_eq!(
            classify_binary(&zip_with_entry(b"ppt/presentation.xml")).unwrap().0,
            "pptx"
        );
    }

    #[test]
    fn test_zip_refinement_epub() {
        assert_eq!(
            classify_binary(&zip_with_entry(b"mimetypeapplication/epub+zip")).unwrap().0,
            "epub"
        );
    }

    #[test]
    fn test_zip_refinement_generic() {
        assert_eq!(classify_binary(&zip_with_entry(b"some/random/file.txt")).unwrap().0, "zip");
    }

    #[test]
    fn test_empty_zip_archive_marker() {
        assert_eq!(classify_binary(b"PK\x05\x06\x00\x00\x00\x00").unwrap().0, "zip");
    }

    #[test]
    fn test_mp3_variants() {
        assert_eq!(classify_binary(b"ID3\x04\x00\x00\x00\x00").unwrap().0, "mp3");
        assert_eq!(classify_binary(b"\xff\xfb\x90\x00data").unwrap().0, "mp3");
        assert_eq!(classify_binary(b"\xff\xf3\x90\x00data").unwrap().0, "mp3");
    }

    #[test]
    fn test_m4a_ftyp_at_offset_4() {
        let bytes = b"\x00\x00\x00\x20ftypM4A \x00\x00\x00\x00";
        assert_eq!(classify_binary(bytes).unwrap().0, "m4a");
    }

    #[test]
    fn test_archive_signatures() {
        assert_eq!(classify_binary(b"\x1f\x8b\x08\x00\x00\x00\x00\x00").unwrap().0, "gz");
        assert_eq!(classify_binary(b"BZh91AY&SY").unwrap().0, "bz2");
        assert_eq!(classify_binary(b"\xfd7zXZ\x00\x00\x04").unwrap().0, "xz");
        assert_eq!(classify_binary(b"7z\xbc\xaf\x27\x1c\x00\x04").unwrap().0, "7z");
        assert_eq!(classify_binary(b"Rar!\x1a\x07\x00\x01").unwrap().0, "rar");
    }

    #[test]
    fn test_posix_tar_magic_at_offset_257() {
        let mut bytes = vec![0u8; 300];
        bytes[..8].copy_from_slice(b"file.txt");
        bytes[257..262].copy_from_slice(b"ustar");
        assert_eq!(classify_binary(&bytes).unwrap().0, "tar");
    }

    #[test]
    fn test_pre_posix_tar_checksum() {
        let header = tar_header(b"notes.txt");
        assert_eq!(classify_binary(&header).unwrap().0, "tar");
    }

    #[test]
    fn test_corrupted_tar_checksum_rejected() {
        let mut header = tar_header(b"notes.txt");
        header[0] ^= 0xFF;
        assert!(classify_binary(&header).is_none());
    }

    #[test]
    fn test_all_zero_block_is_not_tar() {
        assert!(!is_tar_header(&[0u8; 512]));
    }

    #[test]
    fn test_rtf_signature() {
        assert_eq!(classify_binary(b"{\\rtf1\\ansi").unwrap().0, "rtf");
    }

    #[test]
    fn test_no_signature_returns_none() {
        assert!(classify_binary(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04]).is_none());
        assert!(classify_binary(b"").is_none());
    }

    #[test]
    fn test_jpeg_before_mp3_frame_sync() {
        // FF D8 FF E0 must hit the three-byte JPEG signature, not FF E0.
        assert_eq!(classify_binary(b"\xff\xd8\xff\xe0\x00\x10JFIF").unwrap().0, "jpg");
    }

    #[test]
    fn test_signature_table_is_deterministic() {
        let payload = zip_with_entry(b"word/document.xml");
        let first = classify_binary(&payload);
        for _ in 0..10 {
            assert_eq!(classify_binary(&payload), first);
        }
    }
}
