use super::*;

#[test]
fn short_text_fits() {
    let text = FixedText::<16>::encode("Portal");
    assert_eq!(text.as_bytes(), b"Portal");
    assert_eq!(text.to_string_lossy(), "Portal");
    assert!(!text.is_truncated());
    assert!(text.image()[6..].iter().all(|&b| b == 0));
}

#[test]
fn exact_capacity_is_not_truncated() {
    let text = FixedText::<8>::encode("1234567");
    assert_eq!(text.as_bytes(), b"1234567");
    assert!(!text.is_truncated());
    assert_eq!(text.image()[7], 0);
}

#[test]
fn overlong_text_is_cut_at_capacity() {
    let text = FixedText::<8>::encode("123456789");
    assert_eq!(text.as_bytes(), b"1234567");
    assert!(text.is_truncated());
    assert_eq!(text.image()[7], 0);
}

#[test]
fn cut_inside_multibyte_character() {
    // "é" is two bytes; capacity 3 keeps "ab" plus the first byte of "é".
    let text = FixedText::<4>::encode("abé");
    assert_eq!(text.as_bytes(), &[b'a', b'b', 0xC3]);
    assert!(text.is_truncated());
    assert_eq!(text.to_string_lossy(), "ab\u{FFFD}");
}

#[test]
fn interior_nul_stops_copy() {
    let text = FixedText::<16>::encode("abc\0def");
    assert_eq!(text.as_bytes(), b"abc");
    assert!(text.is_truncated());
    assert!(text.image()[3..].iter().all(|&b| b == 0));
}

#[test]
fn empty_text() {
    let text = FixedText::<4>::encode("");
    assert!(text.is_empty());
    assert_eq!(text.to_string_lossy(), "");
    assert_eq!(text, FixedText::<4>::default());
}

#[test]
fn unterminated_image_reads_whole_buffer() {
    let text = FixedText::<4>::from_bytes(b"abcd");
    assert_eq!(text.as_bytes(), b"abcd");
    assert!(!text.is_truncated());
}

#[test]
fn bytes_after_first_zero_are_ignored() {
    let text = FixedText::<6>::from_bytes(b"ab\0cd\0");
    assert_eq!(text.to_string_lossy(), "ab");
}
