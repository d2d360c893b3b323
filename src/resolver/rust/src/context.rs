/* src/resolver/rust/src/context.rs */

//! Data context placeholders resolve against.
//!
//! The typed structs mirror the JSON shape the editor sends
//! (`company`, `directors`, `shareholders`, `contact`, `custom`, `system`).
//! Absent scalars stay `None` so they read as undefined during resolution
//! instead of as empty strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Numeric fields accept JSON numbers and numeric strings such as
/// `"100000"` or `"100,000"`. Blank or non-numeric text reads as absent.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Number(f64),
    Text(String),
  }

  Ok(match Option::<Raw>::deserialize(deserializer)? {
    Some(Raw::Number(n)) => Some(n),
    Some(Raw::Text(text)) => {
      text.trim().replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite())
    }
    None => None,
  })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataContext {
  pub company: Company,
  pub directors: Vec<Director>,
  pub shareholders: Vec<Shareholder>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact: Option<Contact>,
  pub custom: BTreeMap<String, CustomValue>,
  pub system: SystemFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uen: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub registered_address: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub entity_type: Option<String>,
  #[serde(deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
  pub capital: Option<f64>,
  /// ISO date (`YYYY-MM-DD`) or RFC 3339 timestamp.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub incorporation_date: Option<String>,
  pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub block: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub street: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub level: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub unit: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub building: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Director {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub identification_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub nationality: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shareholder {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub share_class: Option<String>,
  #[serde(deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
  pub number_of_shares: Option<f64>,
  #[serde(deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
  pub percentage_held: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub identification_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub nationality: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub full_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub identification_number: Option<String>,
}

/// `system.currentDate` is not stored; it is computed when resolving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub generated_by: Option<String>,
}

/// Scalar stored under `custom.<key>`. Booleans usually arrive as the
/// strings `"true"`/`"false"`; real JSON booleans are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomValue {
  Bool(bool),
  Number(f64),
  Text(String),
}

impl From<&str> for CustomValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

impl From<String> for CustomValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<f64> for CustomValue {
  fn from(value: f64) -> Self {
    Self::Number(value)
  }
}

impl From<bool> for CustomValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl DataContext {
  /// JSON view used for path lookups. Built fresh on every call so the
  /// resolver can decorate it without touching `self`.
  pub fn to_value(&self) -> Value {
    serde_json::to_value(self).unwrap_or_default()
  }

  pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<CustomValue>) -> Self {
    self.custom.insert(key.into(), value.into());
    self
  }

  /// Static defaults used when the editor has no real company record.
  pub fn sample() -> Self {
    let company = Company {
      name: Some("Acme Pte Ltd".into()),
      uen: Some("202312345A".into()),
      registered_address: Some("10 Anson Road, #12-01 International Plaza, Singapore 079903".into()),
      entity_type: Some("Private Limited Company".into()),
      capital: Some(100_000.0),
      incorporation_date: Some("2023-04-12".into()),
      address: Address {
        block: Some("10".into()),
        street: Some("Anson Road".into()),
        level: Some("12".into()),
        unit: Some("01".into()),
        building: Some("International Plaza".into()),
        postal_code: Some("079903".into()),
      },
    };
    let directors = vec![
      Director {
        name: Some("John Tan".into()),
        identification_number: Some("S1234567A".into()),
        nationality: Some("Singaporean".into()),
        role: Some("Director".into()),
        address: Some("1 Orchard Road, Singapore 238823".into()),
      },
      Director {
        name: Some("Mary Lim".into()),
        identification_number: Some("S7654321B".into()),
        nationality: Some("Malaysian".into()),
        role: Some("Managing Director".into()),
        address: Some("22 Holland Avenue, Singapore 278993".into()),
      },
    ];
    let shareholders = vec![
      Shareholder {
        name: Some("John Tan".into()),
        share_class: Some("Ordinary".into()),
        number_of_shares: Some(60_000.0),
        percentage_held: Some(60.0),
        identification_number: Some("S1234567A".into()),
        nationality: Some("Singaporean".into()),
      },
      Shareholder {
        name: Some("Mary Lim".into()),
        share_class: Some("Ordinary".into()),
        number_of_shares: Some(40_000.0),
        percentage_held: Some(40.0),
        identification_number: Some("S7654321B".into()),
        nationality: Some("Malaysian".into()),
      },
    ];
    let contact = Contact {
      full_name: Some("Grace Ong".into()),
      email: Some("grace.ong@example.com".into()),
      phone: Some("+65 6123 4567".into()),
      identification_number: Some("S2345678C".into()),
    };

    Self {
      company,
      directors,
      shareholders,
      contact: Some(contact),
      custom: BTreeMap::new(),
      system: SystemFields { generated_by: Some("Folio".into()) },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn to_value_uses_camel_case() {
    let value = DataContext::sample().to_value();
    assert_eq!(value["company"]["entityType"], json!("Private Limited Company"));
    assert_eq!(value["company"]["address"]["postalCode"], json!("079903"));
    assert_eq!(value["shareholders"][1]["numberOfShares"], json!(40000.0));
    assert_eq!(value["system"]["generatedBy"], json!("Folio"));
  }

  #[test]
  fn absent_fields_are_omitted() {
    let value = DataContext::default().to_value();
    assert!(value["company"].get("name").is_none());
    assert!(value.get("contact").is_none());
    assert_eq!(value["directors"], json!([]));
  }

  #[test]
  fn deserialize_partial_record() {
    let ctx: DataContext = serde_json::from_value(json!({
      "company": {"name": "Beta LLP", "capital": 5000},
      "directors": [{"name": "Ann"}],
      "custom": {"flag": "true", "amount": 1200.5, "signed": false}
    }))
    .unwrap();
    assert_eq!(ctx.company.name.as_deref(), Some("Beta LLP"));
    assert_eq!(ctx.company.capital, Some(5000.0));
    assert_eq!(ctx.directors.len(), 1);
    assert!(ctx.shareholders.is_empty());
    assert_eq!(ctx.custom["flag"], CustomValue::Text("true".into()));
    assert_eq!(ctx.custom["amount"], CustomValue::Number(1200.5));
    assert_eq!(ctx.custom["signed"], CustomValue::Bool(false));
  }

  #[test]
  fn numeric_strings_accepted() {
    let ctx: DataContext = serde_json::from_value(json!({
      "company": {"capital": "100,000"},
      "shareholders": [
        {"numberOfShares": "60000", "percentageHeld": " 60.5 "},
        {"numberOfShares": null, "percentageHeld": "n/a"},
        {"numberOfShares": ""}
      ]
    }))
    .unwrap();
    assert_eq!(ctx.company.capital, Some(100_000.0));
    assert_eq!(ctx.shareholders[0].number_of_shares, Some(60_000.0));
    assert_eq!(ctx.shareholders[0].percentage_held, Some(60.5));
    assert_eq!(ctx.shareholders[1].number_of_shares, None);
    assert_eq!(ctx.shareholders[1].percentage_held, None);
    assert_eq!(ctx.shareholders[2].number_of_shares, None);
  }

  #[test]
  fn numeric_string_renders_formatted() {
    let ctx: DataContext =
      serde_json::from_str(r#"{"company": {"capital": "100000"}}"#).unwrap();
    assert_eq!(crate::resolve("{{company.capital}}", &ctx, &[]), "$100,000");
  }

  #[test]
  fn with_custom_inserts() {
    let ctx = DataContext::default().with_custom("flag", "false");
    assert_eq!(ctx.to_value()["custom"]["flag"], json!("false"));
  }
}
