//! The fixed HG AMS ACAS output schema.
//!
//! Every export carries exactly these 80 columns, in this order, under these
//! names. Each [`ColumnSpec`] names where its value comes from: a constant
//! (`default_value`), a source column matched by normalized name
//! (`source_name`), or nothing at all (blank column). A constant always wins
//! over a source name.

use anyhow::{Result, bail, ensure};
use serde::Serialize;

pub const SENDER_STATE_COLUMN: &str = "sender_state";
pub const SENDER_STATE_VALUE: &str = "GD";
pub const LASTMILE_COLUMN: &str = "lastmile";
pub const LASTMILE_VALUE: &str = "CONSOL";
pub const DESCRIPTION_COLUMN: &str = "description";
pub const DESCRIPTION_MAX_CHARS: usize = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub position: u8,
    pub source_name: &'static str,
    pub output_name: &'static str,
    pub default_value: &'static str,
}

/// Where a column's value comes from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    Constant(&'static str),
    Source(&'static str),
    Blank,
}

impl ColumnSpec {
    const fn new(
        position: u8,
        source_name: &'static str,
        output_name: &'static str,
        default_value: &'static str,
    ) -> Self {
        Self {
            position,
            source_name,
            output_name,
            default_value,
        }
    }

    pub fn source(&self) -> ColumnSource {
        if !self.default_value.is_empty() {
            ColumnSource::Constant(self.default_value)
        } else if !self.source_name.is_empty() {
            ColumnSource::Source(self.source_name)
        } else {
            ColumnSource::Blank
        }
    }
}

static COLUMNS: [ColumnSpec; 80] = [
    ColumnSpec::new(1, "BG Number", "consignor_item_id", ""),
    ColumnSpec::new(2, "", "display_id", ""),
    ColumnSpec::new(3, "Bag ID", "receptacle_id", ""),
    ColumnSpec::new(4, "Tracking Number", "tracking_number", ""),
    ColumnSpec::new(5, "SHIPPER", "sender_name", ""),
    ColumnSpec::new(6, "", "sender_orgname", ""),
    ColumnSpec::new(7, "SHIPPER ADDRESS", "sender_address1", ""),
    ColumnSpec::new(8, "", "sender_address2", ""),
    ColumnSpec::new(9, "", "sender_district", ""),
    ColumnSpec::new(10, "CITY NAME SHIPPER", "sender_city", ""),
    ColumnSpec::new(11, "", "sender_state", "GD"),
    ColumnSpec::new(12, "", "sender_zip5", ""),
    ColumnSpec::new(13, "", "sender_zip4", ""),
    ColumnSpec::new(14, "COUNTRY CODE SHIPPER", "sender_country", ""),
    ColumnSpec::new(15, "", "sender_phone", ""),
    ColumnSpec::new(16, "", "sender_email", ""),
    ColumnSpec::new(17, "", "sender_url", ""),
    ColumnSpec::new(18, "Consignee Name", "recipient_name", ""),
    ColumnSpec::new(19, "", "recipient_orgname", ""),
    ColumnSpec::new(20, "Consignee Address", "recipient_address1", ""),
    ColumnSpec::new(21, "", "recipient_address2", ""),
    ColumnSpec::new(22, "", "recipient_district", ""),
    ColumnSpec::new(23, "Consignee City", "recipient_city", ""),
    ColumnSpec::new(24, "Consignee Province", "recipient_state", ""),
    ColumnSpec::new(25, "Consignee Post Code", "recipient_zip5", ""),
    ColumnSpec::new(26, "", "recipient_zip4", ""),
    ColumnSpec::new(27, "Country of Destination", "recipient_country", ""),
    ColumnSpec::new(28, "", "recipient_phone", ""),
    ColumnSpec::new(29, "", "recipient_email", ""),
    ColumnSpec::new(30, "", "recipient_addr_type", ""),
    ColumnSpec::new(31, "", "return_name", ""),
    ColumnSpec::new(32, "", "return_orgname", ""),
    ColumnSpec::new(33, "", "return_address1", ""),
    ColumnSpec::new(34, "", "return_address2", ""),
    ColumnSpec::new(35, "", "return_district", ""),
    ColumnSpec::new(36, "", "return_city", ""),
    ColumnSpec::new(37, "", "return_state", ""),
    ColumnSpec::new(38, "", "return_zip5", ""),
    ColumnSpec::new(39, "", "return_zip4", ""),
    ColumnSpec::new(40, "", "return_country", ""),
    ColumnSpec::new(41, "", "return_phone", ""),
    ColumnSpec::new(42, "", "return_email", ""),
    ColumnSpec::new(43, "", "mail_type", ""),
    ColumnSpec::new(44, "TOTAL QTY", "pieces", ""),
    ColumnSpec::new(45, "WEIGHT", "weight", ""),
    ColumnSpec::new(46, "", "length", ""),
    ColumnSpec::new(47, "", "width", ""),
    ColumnSpec::new(48, "", "height", ""),
    ColumnSpec::new(49, "", "girth", ""),
    ColumnSpec::new(50, "TOTAL DECLARE VALUE", "value", ""),
    ColumnSpec::new(51, "", "machinable", ""),
    ColumnSpec::new(52, "", "po_box_flag", ""),
    ColumnSpec::new(53, "", "gift_flag", ""),
    ColumnSpec::new(54, "", "commercial_flag", ""),
    ColumnSpec::new(55, "", "customs_quantity_units", ""),
    ColumnSpec::new(56, "", "dutiable", ""),
    ColumnSpec::new(57, "", "duty_pay_by", ""),
    ColumnSpec::new(58, "", "product", ""),
    ColumnSpec::new(59, "PRODUCT DESCRIPTION", "description", ""),
    ColumnSpec::new(60, "", "url", ""),
    ColumnSpec::new(61, "", "sku", ""),
    ColumnSpec::new(62, "COUNTRY CODE SHIPPER", "country_of_origin", ""),
    ColumnSpec::new(63, "", "manufacturer", ""),
    ColumnSpec::new(64, "HSCODE", "harmonization_code", ""),
    ColumnSpec::new(65, "TOTAL DECLARE VALUE", "unit_value", ""),
    ColumnSpec::new(66, "TOTAL QTY", "quantity", ""),
    ColumnSpec::new(67, "TOTAL DECLARE VALUE", "total_value", ""),
    ColumnSpec::new(68, "WEIGHT", "total_weight", ""),
    ColumnSpec::new(69, "", "lastmile", "CONSOL"),
    ColumnSpec::new(70, "", "item_id", ""),
    ColumnSpec::new(71, "", "manufacture_name", ""),
    ColumnSpec::new(72, "", "manufacture_address", ""),
    ColumnSpec::new(73, "", "manufacture_city", ""),
    ColumnSpec::new(74, "", "manufacture_state", ""),
    ColumnSpec::new(75, "", "manufacture_zip_code", ""),
    ColumnSpec::new(76, "", "manufacture_country", ""),
    ColumnSpec::new(77, "", "manufacture_mid_code", ""),
    ColumnSpec::new(78, "", "entry_no", ""),
    ColumnSpec::new(79, "", "pga_product_code", ""),
    ColumnSpec::new(80, "", "error_message", ""),
];

/// All column specifications in output order.
pub fn columns() -> &'static [ColumnSpec] {
    &COLUMNS
}

pub fn output_names() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|spec| spec.output_name)
}

/// Zero-based output index of a canonical column.
pub fn column_index(output_name: &str) -> Option<usize> {
    COLUMNS
        .iter()
        .position(|spec| spec.output_name == output_name)
}

pub fn find(output_name: &str) -> Option<&'static ColumnSpec> {
    COLUMNS.iter().find(|spec| spec.output_name == output_name)
}

/// Checks the registry invariants: contiguous 1-based positions and unique
/// output names.
pub fn validate(columns: &[ColumnSpec]) -> Result<()> {
    for (idx, spec) in columns.iter().enumerate() {
        ensure!(
            usize::from(spec.position) == idx + 1,
            "Column '{}' is at index {} but declares position {}",
            spec.output_name,
            idx + 1,
            spec.position
        );
        ensure!(
            !spec.output_name.trim().is_empty(),
            "Column at position {} has no output name",
            spec.position
        );
        if let Some(previous) = columns[..idx]
            .iter()
            .find(|other| other.output_name == spec.output_name)
        {
            bail!(
                "Output name '{}' is declared at positions {} and {}",
                spec.output_name,
                previous.position,
                spec.position
            );
        }
    }
    Ok(())
}
