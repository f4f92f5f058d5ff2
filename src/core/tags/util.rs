//! core/tags/util.rs
//! Small parsing helpers shared by tag reading/writing.

/// Clean an optional frame value: trimmed, empty -> None.
pub(crate) fn non_empty(s: Option<&str>) -> Option<String> {
    let s = s?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Total size in bytes of a leading ID3v2 tag (header + body + footer),
/// or 0 if `head` doesn't start with one.
///
/// The size field is four "syncsafe" bytes: 7 bits each, MSB always 0.
pub(crate) fn id3v2_tag_len(head: &[u8]) -> u64 {
    if head.len() < 10 || &head[..3] != b"ID3" {
        return 0;
    }

    let size = head[6..10]
        .iter()
        .fold(0u64, |acc, &b| (acc << 7) | u64::from(b & 0x7f));

    let footer = if head[5] & 0x10 != 0 { 10 } else { 0 };
    10 + size + footer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_trims_and_drops_blank() {
        assert_eq!(non_empty(Some("  Abbey Road ")), Some("Abbey Road".to_string()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn id3v2_len_decodes_syncsafe_size() {
        // size bytes 0x00 0x00 0x02 0x01 -> (2 << 7) | 1 = 257
        let head = [b'I', b'D', b'3', 4, 0, 0, 0, 0, 0x02, 0x01];
        assert_eq!(id3v2_tag_len(&head), 267);

        let mut with_footer = head;
        with_footer[5] = 0x10;
        assert_eq!(id3v2_tag_len(&with_footer), 277);
    }

    #[test]
    fn id3v2_len_is_zero_without_tag() {
        assert_eq!(id3v2_tag_len(&[0xff, 0xfb, 0x90, 0x64, 0, 0, 0, 0, 0, 0]), 0);
        assert_eq!(id3v2_tag_len(b"ID3"), 0);
    }
}
