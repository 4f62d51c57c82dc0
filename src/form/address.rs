//! Address Records - The structured sub-records of the company page's
//! field array, plus the billing-to-shipping copy operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;
use crate::form::FieldArray;

// =============================================================================
// RECORD
// =============================================================================

/// Discriminator for an address record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Billing,
    Shipping,
}

impl AddressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressKind::Billing => "billing",
            AddressKind::Shipping => "shipping",
        }
    }

    /// Label shown above the record's card.
    pub fn label(&self) -> &'static str {
        match self {
            AddressKind::Billing => "Billing Address",
            AddressKind::Shipping => "Shipping Address",
        }
    }
}

/// One address record inside the `addresses` field array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    #[serde(rename = "type")]
    pub kind: AddressKind,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl AddressRecord {
    /// An empty record of the given kind with a default country.
    pub fn blank(kind: AddressKind, country: &str) -> AddressRecord {
        AddressRecord {
            kind,
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: country.to_string(),
        }
    }

    /// The record as a tree value, keys in declared order.
    pub fn to_value(&self) -> Result<Value, FormError> {
        Ok(serde_json::to_value(self)?)
    }
}

// =============================================================================
// COPY BILLING TO SHIPPING
// =============================================================================

/// What `copy_billing_to_shipping` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The first shipping record was overwritten in place.
    Overwrote,
    /// No shipping record existed; a clone of billing was appended.
    Appended,
    /// No billing record exists; nothing changed.
    NoBilling,
}

fn kind_of(record: &Value) -> Option<&str> {
    record.get("type").and_then(Value::as_str)
}

/// Duplicate the first billing record's values into the first shipping
/// record, forcing its type to `shipping`. Appends a clone when no shipping
/// record exists yet. A no-op when there is no billing record.
///
/// Idempotent: after any successful call, the shipping record's contents
/// equal billing's contents minus the type field.
pub fn copy_billing_to_shipping(addresses: &FieldArray) -> Result<CopyOutcome, FormError> {
    let items = addresses.items();

    let Some((_, billing)) = items
        .iter()
        .find(|(_, record)| kind_of(record) == Some(AddressKind::Billing.as_str()))
    else {
        tracing::debug!(array = %addresses.path(), "no billing record; copy skipped");
        return Ok(CopyOutcome::NoBilling);
    };

    let mut copied = billing.clone();
    if let Some(object) = copied.as_object_mut() {
        object.insert(
            "type".to_string(),
            Value::String(AddressKind::Shipping.as_str().to_string()),
        );
    }

    let shipping_index = items
        .iter()
        .position(|(_, record)| kind_of(record) == Some(AddressKind::Shipping.as_str()));

    match shipping_index {
        Some(index) => {
            addresses.set_item(index, copied)?;
            Ok(CopyOutcome::Overwrote)
        }
        None => {
            addresses.append(copied);
            Ok(CopyOutcome::Appended)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Form;
    use serde_json::json;

    fn billing() -> Value {
        json!({
            "type": "billing",
            "street": "Rua Augusta 100",
            "city": "Lisbon",
            "state": "LX",
            "zipCode": "11000-000",
            "country": "BR",
        })
    }

    fn without_type(mut record: Value) -> Value {
        record.as_object_mut().unwrap().shift_remove("type");
        record
    }

    #[test]
    fn test_kind_as_str_matches_wire_format() {
        // The copy operation compares `type` strings with `as_str`, so the
        // two representations must agree.
        for kind in [AddressKind::Billing, AddressKind::Shipping] {
            let serialized = serde_json::to_value(kind).unwrap();
            assert_eq!(serialized, json!(kind.as_str()));
        }
    }

    #[test]
    fn test_record_serialization_shape() {
        let record = AddressRecord::blank(AddressKind::Billing, "BR");
        let value = record.to_value().unwrap();
        assert_eq!(value.get("type"), Some(&json!("billing")));
        assert_eq!(value.get("zipCode"), Some(&json!("")));
        assert_eq!(value.get("country"), Some(&json!("BR")));
    }

    #[test]
    fn test_copy_appends_when_no_shipping_exists() {
        let form = Form::new(json!({ "addresses": [billing()] }));
        let addresses = form.array("addresses").unwrap();

        let outcome = copy_billing_to_shipping(&addresses).unwrap();

        assert_eq!(outcome, CopyOutcome::Appended);
        assert_eq!(addresses.len(), 2);

        let appended = addresses.item(1).unwrap();
        assert_eq!(appended.get("type"), Some(&json!("shipping")));
        assert_eq!(without_type(appended), without_type(billing()));
    }

    #[test]
    fn test_copy_overwrites_existing_shipping_in_place() {
        let form = Form::new(json!({ "addresses": [
            billing(),
            { "type": "shipping", "street": "Other St", "city": "Porto",
              "state": "PT", "zipCode": "99999-999", "country": "US" },
        ]}));
        let addresses = form.array("addresses").unwrap();
        let shipping_id = addresses.id_at(1).unwrap();

        let outcome = copy_billing_to_shipping(&addresses).unwrap();

        assert_eq!(outcome, CopyOutcome::Overwrote);
        assert_eq!(addresses.len(), 2);
        // Identity preserved, contents replaced.
        assert_eq!(addresses.id_at(1), Some(shipping_id));
        let shipping = addresses.item(1).unwrap();
        assert_eq!(shipping.get("type"), Some(&json!("shipping")));
        assert_eq!(without_type(shipping), without_type(billing()));
    }

    #[test]
    fn test_copy_twice_is_idempotent() {
        let form = Form::new(json!({ "addresses": [billing()] }));
        let addresses = form.array("addresses").unwrap();

        assert_eq!(copy_billing_to_shipping(&addresses).unwrap(), CopyOutcome::Appended);
        let after_first = addresses.item(1).unwrap();

        assert_eq!(copy_billing_to_shipping(&addresses).unwrap(), CopyOutcome::Overwrote);
        let after_second = addresses.item(1).unwrap();

        assert_eq!(addresses.len(), 2);
        assert_eq!(after_first, after_second);
        assert_eq!(without_type(after_second), without_type(billing()));
    }

    #[test]
    fn test_copy_without_billing_is_a_noop() {
        let form = Form::new(json!({ "addresses": [
            { "type": "shipping", "street": "S", "city": "C",
              "state": "ST", "zipCode": "12345-678", "country": "CA" },
        ]}));
        let addresses = form.array("addresses").unwrap();
        let before = addresses.items();

        let outcome = copy_billing_to_shipping(&addresses).unwrap();

        assert_eq!(outcome, CopyOutcome::NoBilling);
        assert_eq!(addresses.items(), before);
    }
}
