use tlvinfo::tlv::{
    compute_crc32, is_checksum_valid, verify_checksum, Header, TlvImage, HEADER_SIZE,
};
use tlvinfo::TlvError;

// =============================================================================
// Helper Functions
// =============================================================================

/// One 0x21 record of 236 bytes whose last six bytes look like a valid
/// CRC record, so the walk never reaches a real trailer
fn hidden_trailer_image() -> Vec<u8> {
    let total_len = 238u16;
    let end = HEADER_SIZE + total_len as usize;

    let mut bytes = vec![0u8; 256];
    bytes[..HEADER_SIZE].copy_from_slice(&Header { version: 1, total_len }.encode());
    bytes[HEADER_SIZE] = 0x21;
    bytes[HEADER_SIZE + 1] = 236;
    bytes[HEADER_SIZE + 2..end].fill(b'a');
    bytes[end - 6] = 0xFE;
    bytes[end - 5] = 4;
    let crc = compute_crc32(&bytes, end - 4);
    bytes[end - 4..end].copy_from_slice(&crc.to_be_bytes());
    bytes
}

#[test]
fn test_standard_crc32_check_value() {
    // The well-known CRC-32 check value for "123456789"
    assert_eq!(compute_crc32(b"123456789", 9), 0xCBF4_3926);
}

#[test]
fn test_crc_covers_only_requested_prefix() {
    let data = b"123456789garbage";
    assert_eq!(compute_crc32(data, 9), 0xCBF4_3926);
}

#[test]
fn test_empty_image_trailer_layout() {
    let image = TlvImage::empty(256).unwrap();
    let bytes = image.as_bytes();

    assert_eq!(image.total_len(), 6);
    assert_eq!(bytes[HEADER_SIZE], 0xFE);
    assert_eq!(bytes[HEADER_SIZE + 1], 4);

    let expected = compute_crc32(bytes, HEADER_SIZE + 2);
    assert_eq!(&bytes[HEADER_SIZE + 2..HEADER_SIZE + 6], &expected.to_be_bytes());
    assert!(is_checksum_valid(bytes));
}

#[test]
fn test_stored_crc_mismatch_detected() {
    let mut image = TlvImage::empty(256).unwrap();
    image.add(0x21, b"K1 Board").unwrap();

    let mut bytes = image.as_bytes().to_vec();
    bytes[HEADER_SIZE + 2] ^= 0x01; // first value byte of the product name

    let result = verify_checksum(&bytes);
    assert!(matches!(result, Err(TlvError::ChecksumMismatch { .. })));
    assert!(!is_checksum_valid(&bytes));
}

#[test]
fn test_missing_trailer_detected() {
    let mut bytes = vec![0u8; 256];
    bytes[..HEADER_SIZE].copy_from_slice(&Header::empty().encode());

    assert!(matches!(verify_checksum(&bytes), Err(TlvError::MissingChecksum)));
}

#[test]
fn test_last_record_must_be_crc() {
    let mut image = TlvImage::empty(256).unwrap();
    image.add(0x21, b"abcd").unwrap();

    // Turn the trailer type into something else
    let mut bytes = image.as_bytes().to_vec();
    let crc_at = HEADER_SIZE + image.total_len() - 6;
    bytes[crc_at] = 0xFD;

    assert!(matches!(verify_checksum(&bytes), Err(TlvError::MissingChecksum)));
}

#[test]
fn test_invalid_header_fails_checksum() {
    let image = TlvImage::empty(256).unwrap();
    let mut bytes = image.as_bytes().to_vec();
    bytes[8] = 2;

    assert!(matches!(verify_checksum(&bytes), Err(TlvError::InvalidHeader(_))));
}

#[test]
fn test_total_len_checked_against_buffer_capacity() {
    let image = TlvImage::empty(256).unwrap();
    // Only header + trailer handed over, but header claims more
    let mut bytes = image.used().to_vec();
    bytes[10] = 7;

    assert!(verify_checksum(&bytes).is_err());
}

#[test]
fn test_update_crc_appends_missing_trailer() {
    let mut bytes = vec![0u8; 256];
    bytes[..HEADER_SIZE].copy_from_slice(&Header::empty().encode());
    let mut image = TlvImage::from_bytes(&bytes, 256);
    assert!(!image.is_checksum_valid());

    image.update_crc().unwrap();

    assert_eq!(image.total_len(), 6);
    assert!(image.is_checksum_valid());
}

#[test]
fn test_update_crc_without_room_is_an_error() {
    // Header claims the whole record area is used and there is no trailer
    let mut bytes = vec![0x21u8; 256];
    bytes[..HEADER_SIZE].copy_from_slice(&Header { version: 1, total_len: 245 }.encode());
    bytes[HEADER_SIZE + 1] = 243;
    let mut image = TlvImage::from_bytes(&bytes, 256);

    let result = image.update_crc();
    assert!(matches!(result, Err(TlvError::BufferFull { needed: 6, available: 0 })));
}

#[test]
fn test_crc_shaped_tail_inside_record_is_not_a_trailer() {
    let bytes = hidden_trailer_image();

    assert!(matches!(verify_checksum(&bytes), Err(TlvError::MissingChecksum)));
    assert!(!is_checksum_valid(&bytes));
}

#[test]
fn test_add_without_trailer_room_leaves_buffer_unchanged() {
    let mut image = TlvImage::from_bytes(&hidden_trailer_image(), 256);
    let before = image.clone();

    // 238 used + 3 for the record + 6 for a new trailer > 245
    let result = image.add(0x22, b"x");

    assert!(matches!(
        result,
        Err(TlvError::BufferFull { needed: 3, available: 1 })
    ));
    assert_eq!(image, before);
}
