use tlvinfo::tlv::{is_valid_code, RecordIter, TlvImage, HEADER_SIZE};
use tlvinfo::TlvError;

#[test]
fn test_reserved_codes() {
    assert!(!is_valid_code(0x00));
    assert!(!is_valid_code(0xFF));
    assert!(is_valid_code(0x21));
    assert!(is_valid_code(0xFE));
}

#[test]
fn test_iterates_packed_records() {
    // [0x21, 2, 'h', 'i'] [0x26, 1, 7]
    let buf = [0x21, 2, b'h', b'i', 0x26, 1, 7];
    let records: Vec<_> = RecordIter::new(&buf, 0, buf.len())
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].code, 0x21);
    assert_eq!(records[0].value, b"hi");
    assert_eq!(records[0].offset, 0);
    assert_eq!(records[0].size(), 4);
    assert_eq!(records[1].code, 0x26);
    assert_eq!(records[1].value, &[7]);
    assert_eq!(records[1].offset, 4);
    assert_eq!(records[1].end(), 7);
}

#[test]
fn test_zero_length_record() {
    let buf = [0x2D, 0, 0x26, 1, 9];
    let records: Vec<_> = RecordIter::new(&buf, 0, buf.len())
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 2);
    assert!(records[0].value.is_empty());
}

#[test]
fn test_stops_at_end_bound() {
    let buf = [0x21, 1, b'a', 0x22, 1, b'b'];
    let records: Vec<_> = RecordIter::new(&buf, 0, 3)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 1);
}

#[test]
fn test_reserved_code_aborts_iteration() {
    let buf = [0x21, 1, b'a', 0xFF, 1, b'b', 0x22, 1, b'c'];
    let mut iter = RecordIter::new(&buf, 0, buf.len());

    assert!(iter.next().unwrap().is_ok());
    let err = iter.next().unwrap().unwrap_err();
    assert!(matches!(err, TlvError::MalformedRecord { offset: 3, code: 0xFF }));
    assert!(iter.next().is_none());
}

#[test]
fn test_record_running_past_end_is_malformed() {
    let buf = [0x21, 10, b'a', b'b'];
    let mut iter = RecordIter::new(&buf, 0, buf.len());

    assert!(matches!(
        iter.next(),
        Some(Err(TlvError::MalformedRecord { offset: 0, code: 0x21 }))
    ));
}

#[test]
fn test_iteration_restarts_from_scratch() {
    let mut image = TlvImage::empty(256).unwrap();
    image.add(0x21, b"K1").unwrap();

    let first: Vec<_> = image.records().map(|r| r.unwrap().code).collect();
    let second: Vec<_> = image.records().map(|r| r.unwrap().code).collect();

    assert_eq!(first, vec![0x21, 0xFE]);
    assert_eq!(first, second);
}

#[test]
fn test_malformed_record_in_image_is_reported() {
    let mut image = TlvImage::empty(256).unwrap();
    image.add(0x21, b"a").unwrap();

    let mut bytes = image.as_bytes().to_vec();
    bytes[HEADER_SIZE] = 0x00;
    let corrupt = TlvImage::from_bytes(&bytes, 256);

    let result = corrupt.find(0x2B);
    assert!(matches!(
        result,
        Err(TlvError::MalformedRecord { offset: HEADER_SIZE, code: 0x00 })
    ));
}
