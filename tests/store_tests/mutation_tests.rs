use tlvinfo::codes;
use tlvinfo::{StoreState, TlvError};

use super::*;

// =============================================================================
// Add / Delete
// =============================================================================

#[test]
fn test_add_keeps_crc_last() {
    let mut store = erased_store();
    store.add(codes::DEVICE_VERSION, &[2]).unwrap();
    store.add(codes::VENDOR_NAME, b"spacemit").unwrap();

    assert_eq!(
        record_codes(&mut store),
        vec![codes::DEVICE_VERSION, codes::VENDOR_NAME, codes::CRC_32]
    );
    assert!(store.is_dirty());
    assert_image_consistent(&store);
}

#[test]
fn test_add_full_image_is_rejected_unchanged() {
    let mut store = erased_store();
    store.add(codes::VENDOR_EXT, &[0x11; 200]).unwrap();
    let before = store.image().clone();

    let result = store.add(codes::PRODUCT_NAME, &[b'x'; 40]);

    assert!(matches!(result, Err(TlvError::BufferFull { .. })));
    assert_eq!(store.image(), &before);
}

#[test]
fn test_add_after_hidden_trailer_recovery_flushes() {
    let mut store = store_with_contents(hidden_trailer_contents());

    store.add(codes::PART_NUMBER, b"x").unwrap();

    assert_eq!(record_codes(&mut store), vec![codes::PART_NUMBER, codes::CRC_32]);
    assert_image_consistent(&store);
    store.flush().unwrap();
    assert_eq!(store.reload().unwrap(), tlvinfo::LoadOutcome::Loaded);
}

#[test]
fn test_rejected_add_keeps_image_consistent() {
    let mut store = erased_store();
    store.add(codes::VENDOR_EXT, &[0x11; 235]).unwrap();
    let before = store.image().clone();

    // 237 bytes of records, then 3 for the new one and 6 for the trailer: 246
    let result = store.add(codes::DEVICE_VERSION, &[1]);

    assert!(matches!(result, Err(TlvError::BufferFull { needed: 3, available: 2 })));
    assert_eq!(store.image(), &before);
    assert_image_consistent(&store);
    store.flush().unwrap();
}

#[test]
fn test_delete_absent_keeps_state() {
    let mut store = store_with_contents(sample_image().as_bytes().to_vec());
    store.load().unwrap();

    assert!(!store.delete(codes::SERVICE_TAG).unwrap());
    assert_eq!(store.state(), StoreState::Loaded);

    assert!(store.delete(codes::PRODUCT_NAME).unwrap());
    assert_eq!(store.state(), StoreState::Dirty);
    assert_eq!(record_codes(&mut store), vec![codes::SERIAL_NUMBER, codes::CRC_32]);
    assert_image_consistent(&store);
}

// =============================================================================
// Set
// =============================================================================

#[test]
fn test_set_moves_record_to_end() {
    let mut store = store_with_contents(sample_image().as_bytes().to_vec());

    store.set(codes::PRODUCT_NAME, Some("k1-x evb")).unwrap();

    assert_eq!(
        record_codes(&mut store),
        vec![codes::SERIAL_NUMBER, codes::PRODUCT_NAME, codes::CRC_32]
    );
    assert_eq!(
        store.get(codes::PRODUCT_NAME).unwrap(),
        Some(b"k1-x evb".to_vec())
    );
    assert_image_consistent(&store);
}

#[test]
fn test_set_removes_every_duplicate() {
    let mut store = erased_store();
    store.add(codes::VENDOR_EXT, &[1]).unwrap();
    store.add(codes::DEVICE_VERSION, &[1]).unwrap();
    store.add(codes::VENDOR_EXT, &[2]).unwrap();

    store.set(codes::VENDOR_EXT, Some("3")).unwrap();

    let records = store.records().unwrap();
    let ext: Vec<_> = records.iter().filter(|r| r.code == codes::VENDOR_EXT).collect();
    assert_eq!(ext.len(), 1);
    assert_eq!(ext[0].value, vec![3]);
    assert_image_consistent(&store);
}

#[test]
fn test_set_none_deletes() {
    let mut store = store_with_contents(sample_image().as_bytes().to_vec());

    store.set(codes::SERIAL_NUMBER, None).unwrap();

    assert_eq!(store.get(codes::SERIAL_NUMBER).unwrap(), None);
    assert!(store.is_dirty());
    assert_image_consistent(&store);
}

#[test]
fn test_set_none_on_absent_field_is_a_no_op() {
    let mut store = store_with_contents(sample_image().as_bytes().to_vec());

    store.set(codes::SERVICE_TAG, None).unwrap();

    assert_eq!(store.state(), StoreState::Loaded);
    assert_eq!(store.image(), &sample_image());
}

#[test]
fn test_set_crc_is_read_only() {
    let mut store = erased_store();

    let result = store.set(codes::CRC_32, Some("0x12345678"));
    assert!(matches!(result, Err(TlvError::ReadOnlyField(0xFE))));

    let result = store.set_field("0xFE", None);
    assert!(matches!(result, Err(TlvError::ReadOnlyField(0xFE))));
}

#[test]
fn test_invalid_value_leaves_image_untouched() {
    let mut store = erased_store();
    store.set(codes::MAC_BASE, Some("00:11:22:33:44:55")).unwrap();
    let before = store.image().clone();

    let result = store.set(codes::MAC_BASE, Some("00:11:22:33:44"));

    assert!(matches!(result, Err(TlvError::Validation(_))));
    assert_eq!(store.image(), &before);
    assert_eq!(
        store.get_field("ethaddr").unwrap().as_deref(),
        Some("00:11:22:33:44:55")
    );
}

#[test]
fn test_oversized_replacement_keeps_old_value() {
    let mut store = erased_store();
    let small = vec!["1"; 200].join(" ");
    store.set(codes::VENDOR_EXT, Some(small.as_str())).unwrap();
    let before = store.image().clone();

    // 242 bytes needed; 37 free plus 202 reclaimed is not enough
    let large = vec!["2"; 240].join(" ");
    let result = store.set(codes::VENDOR_EXT, Some(large.as_str()));

    assert!(matches!(
        result,
        Err(TlvError::BufferFull { needed: 242, available: 239 })
    ));
    assert_eq!(store.image(), &before);
}

#[test]
fn test_replacement_may_reuse_reclaimed_space() {
    let mut store = erased_store();
    let small = vec!["1"; 200].join(" ");
    store.set(codes::VENDOR_EXT, Some(small.as_str())).unwrap();

    let large = vec!["2"; 237].join(" ");
    store.set(codes::VENDOR_EXT, Some(large.as_str())).unwrap();

    assert_eq!(store.image().free_space(), 0);
    assert_eq!(store.get(codes::VENDOR_EXT).unwrap(), Some(vec![2; 237]));
    assert_image_consistent(&store);
}

#[test]
fn test_every_named_field_round_trips() {
    let cases = [
        ("product_name", "k1-x deb1", "k1-x deb1"),
        ("serial#", "SN0001", "SN0001"),
        ("ethaddr", "fe:fe:fe:01:02:03", "FE:FE:FE:01:02:03"),
        ("ethsize", "2", "2"),
        ("manufacture_date", "01/16/2023 11:02:20", "01/16/2023 11:02:20"),
        ("device_version", "3", "3"),
        ("manufacturer", "spacemit", "spacemit"),
        ("sdk_version", "1 2 3", "0x01 0x02 0x03"),
        ("ddr_cs_num", "2", "0x02"),
        ("ddr_type", "LPDDR4X", "LPDDR4X"),
        ("pmic_type", "1", "0x01"),
        ("eeprom_i2c_index", "2", "0x02"),
        ("eeprom_pin_group", "0x1", "0x01"),
    ];

    let mut store = erased_store();
    for (name, input, _) in cases {
        store.set_field(name, Some(input)).unwrap();
        assert_image_consistent(&store);
    }

    for (name, _, rendered) in cases {
        assert_eq!(store.get_field(name).unwrap().as_deref(), Some(rendered), "{}", name);
    }
}

#[test]
fn test_get_field_unknown_name() {
    let mut store = erased_store();

    assert!(matches!(
        store.get_field("hostname"),
        Err(TlvError::UnknownField(_))
    ));
    assert_eq!(store.get_field("serial#").unwrap(), None);
}

// =============================================================================
// Erase
// =============================================================================

#[test]
fn test_erase_resets_image() {
    let mut store = store_with_contents(sample_image().as_bytes().to_vec());
    store.load().unwrap();

    store.erase().unwrap();

    assert!(store.is_dirty());
    assert_eq!(record_codes(&mut store), vec![codes::CRC_32]);

    store.flush().unwrap();
    let device = store.transport().bus().device(CHIP).unwrap();
    assert_eq!(&device[..17], store.image().used());
}

#[test]
fn test_erase_device_blanks_stale_bytes() {
    let mut store = erased_store();
    store.set_field("product_name", Some("k1-x deb1")).unwrap();
    store.set_field("serial#", Some("SN0001")).unwrap();
    store.flush().unwrap();

    store.erase_device().unwrap();

    assert_eq!(store.state(), StoreState::Loaded);
    let used = store.image().used().to_vec();
    let device = store.transport().bus().device(CHIP).unwrap();
    assert_eq!(&device[..used.len()], &used[..]);
    assert!(device[used.len()..].iter().all(|&b| b == 0xFF));
}
