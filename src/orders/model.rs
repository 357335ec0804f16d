//! Order record and submission payload
//!
//! Field names on the wire match the downstream spreadsheet column schema
//! exactly (`Package_Serial`, `Customer_Name`, ...), so a stored order
//! serializes 1:1 into an export row.

use serde::{Deserialize, Serialize};

/// One shipment request.
///
/// Created on successful submission and never updated afterwards; only a
/// bulk reset removes orders. The reserved fields (`package_volume` through
/// `seller_name`) are always empty at creation - they belong to downstream
/// carrier systems and are never populated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Time-based unique token, `ORD<unix-millis>`; primary identifier
    #[serde(rename = "Package_Serial")]
    pub serial: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Shipment weight in grams
    #[serde(rename = "Total_Weight")]
    pub total_weight: f64,
    #[serde(rename = "Package_volume")]
    pub package_volume: String,
    #[serde(rename = "COD_Value")]
    pub cod_value: String,
    /// Caller-supplied notes, or the default delivery template
    #[serde(rename = "Item_Special_Notes")]
    pub special_notes: String,
    #[serde(rename = "Customer_Name")]
    pub customer_name: String,
    #[serde(rename = "Mobile_No")]
    pub mobile_no: String,
    #[serde(rename = "Street")]
    pub street: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Package_Ref")]
    pub package_ref: String,
    #[serde(rename = "Merchant_Name")]
    pub merchant_name: String,
    #[serde(rename = "Warehouse_Name")]
    pub warehouse_name: String,
    #[serde(rename = "HasPOD")]
    pub has_pod: String,
    #[serde(rename = "SellerName")]
    pub seller_name: String,
}

/// Incoming submission payload.
///
/// Key names match what the intake form posts. Everything is optional at
/// the deserialization layer; required-field enforcement happens in
/// [`crate::orders::OrderService::submit`] so one response can list every
/// missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSubmission {
    #[serde(rename = "Customer_Name")]
    pub customer_name: Option<String>,
    #[serde(rename = "Mobile_No")]
    pub mobile_no: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Street")]
    pub street: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    /// Second phone number; required, but only ever appears inside the
    /// default special-notes template
    #[serde(rename = "Alternative_Contact")]
    pub alternative_contact: Option<String>,
    #[serde(rename = "totalWeight")]
    pub total_weight: Option<f64>,
    #[serde(rename = "Item_Special_Notes")]
    pub special_notes: Option<String>,
}

/// Default special-notes text with the alternate contact interpolated.
///
/// Arabic delivery instructions: "deliver at the residence without checking
/// the national ID - alternate contact number <alt> - if the recipient does
/// not answer, contact the sender".
pub fn default_special_notes(alternative_contact: &str) -> String {
    format!(
        "يسلم في محل الإقامة ودون الإطلاع على الرقم القومي - رقم آخر للتواصل {alternative_contact} - في حالة عدم رد المرسل إليه يرجى التواصل مع الراسل"
    )
}
