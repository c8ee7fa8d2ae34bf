//! TLV type codes and the named-field registry
//!
//! Codes 0x21..=0x2F, 0xFD and 0xFE follow the ONIE TlvInfo assignment;
//! 0x40..=0x42 and 0x80..=0x82 are K1-X board extensions.

use crate::error::{Result, TlvError};

// =============================================================================
// Type Codes
// =============================================================================

pub const PRODUCT_NAME: u8 = 0x21;
pub const PART_NUMBER: u8 = 0x22;
pub const SERIAL_NUMBER: u8 = 0x23;
pub const MAC_BASE: u8 = 0x24;
pub const MANUF_DATE: u8 = 0x25;
pub const DEVICE_VERSION: u8 = 0x26;
pub const LABEL_REVISION: u8 = 0x27;
pub const PLATFORM_NAME: u8 = 0x28;
pub const ONIE_VERSION: u8 = 0x29;
pub const MAC_SIZE: u8 = 0x2A;
pub const MANUF_NAME: u8 = 0x2B;
pub const MANUF_COUNTRY: u8 = 0x2C;
pub const VENDOR_NAME: u8 = 0x2D;
pub const DIAG_VERSION: u8 = 0x2E;
pub const SERVICE_TAG: u8 = 0x2F;

pub const SDK_VERSION: u8 = 0x40;
pub const DDR_CSNUM: u8 = 0x41;
pub const DDR_TYPE: u8 = 0x42;
pub const PMIC_TYPE: u8 = 0x80;
pub const EEPROM_I2C_INDEX: u8 = 0x81;
pub const EEPROM_PIN_GROUP: u8 = 0x82;

pub const VENDOR_EXT: u8 = 0xFD;
pub const CRC_32: u8 = 0xFE;

/// Human-readable label for a type code
pub fn describe(code: u8) -> &'static str {
    match code {
        PRODUCT_NAME => "Product Name",
        PART_NUMBER => "Part Number",
        SERIAL_NUMBER => "Serial Number",
        MAC_BASE => "Base MAC Address",
        MANUF_DATE => "Manufacture Date",
        DEVICE_VERSION => "Device Version",
        LABEL_REVISION => "Label Revision",
        PLATFORM_NAME => "Platform Name",
        ONIE_VERSION => "ONIE Version",
        MAC_SIZE => "MAC Addresses",
        MANUF_NAME => "Manufacturer",
        MANUF_COUNTRY => "Country Code",
        VENDOR_NAME => "Vendor Name",
        DIAG_VERSION => "Diag Version",
        SERVICE_TAG => "Service Tag",
        SDK_VERSION => "SDK Version",
        DDR_CSNUM => "DDR CS Number",
        DDR_TYPE => "DDR Type",
        PMIC_TYPE => "PMIC Type",
        EEPROM_I2C_INDEX => "EEPROM I2C Index",
        EEPROM_PIN_GROUP => "EEPROM Pin Group",
        VENDOR_EXT => "Vendor Extension",
        CRC_32 => "CRC-32",
        _ => "Unknown",
    }
}

// =============================================================================
// Field Registry
// =============================================================================

/// A configuration field reachable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub code: u8,
    /// Longest accepted input string
    pub max_len: usize,
}

/// Fields exposed through the OEM configuration commands
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "product_name", code: PRODUCT_NAME, max_len: 32 },
    FieldSpec { name: "serial#", code: SERIAL_NUMBER, max_len: 32 },
    FieldSpec { name: "ethaddr", code: MAC_BASE, max_len: 17 },
    // ethsize must be 65535 or less
    FieldSpec { name: "ethsize", code: MAC_SIZE, max_len: 6 },
    FieldSpec { name: "manufacture_date", code: MANUF_DATE, max_len: 19 },
    FieldSpec { name: "device_version", code: DEVICE_VERSION, max_len: 3 },
    FieldSpec { name: "manufacturer", code: MANUF_NAME, max_len: 32 },
    FieldSpec { name: "sdk_version", code: SDK_VERSION, max_len: 3 },
    FieldSpec { name: "ddr_cs_num", code: DDR_CSNUM, max_len: 3 },
    FieldSpec { name: "ddr_type", code: DDR_TYPE, max_len: 32 },
    FieldSpec { name: "pmic_type", code: PMIC_TYPE, max_len: 3 },
    FieldSpec { name: "eeprom_i2c_index", code: EEPROM_I2C_INDEX, max_len: 3 },
    FieldSpec { name: "eeprom_pin_group", code: EEPROM_PIN_GROUP, max_len: 3 },
];

pub fn field_by_name(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

pub fn field_by_code(code: u8) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.code == code)
}

/// Resolve a field name or a numeric code (`0x24`, `36`) to a type code
pub fn resolve(key: &str) -> Result<u8> {
    if let Some(field) = field_by_name(key) {
        return Ok(field.code);
    }

    let parsed = match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => key.parse::<u8>().ok(),
    };

    parsed.ok_or_else(|| TlvError::UnknownField(key.to_string()))
}
