/* src/resolver/rust/src/catalog.rs */

//! Registry of the built-in placeholders.
//!
//! The editor palette is generated from these entries, and the renderer uses
//! them to tell a built-in key (missing value renders empty) from an unknown
//! one (left in the document as written). Each entry also fixes the formatter
//! applied to its value.

use serde::Serialize;

use crate::custom::CustomPlaceholder;
use crate::eval::split_index;
use crate::format::FieldFormat;
use crate::partial::Partial;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
  Company,
  Address,
  Directors,
  Shareholders,
  Contact,
  System,
  Blocks,
  Modifiers,
  Custom,
  Partials,
}

impl Category {
  pub fn label(self) -> &'static str {
    match self {
      Self::Company => "Company",
      Self::Address => "Company Address",
      Self::Directors => "Directors",
      Self::Shareholders => "Shareholders",
      Self::Contact => "Contact",
      Self::System => "System",
      Self::Blocks => "Blocks",
      Self::Modifiers => "Text Modifiers",
      Self::Custom => "Custom Fields",
      Self::Partials => "Partials",
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
  pub key: &'static str,
  pub label: &'static str,
  pub example: &'static str,
  pub category: Category,
  pub is_block: bool,
  pub in_loop: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub usage: Option<&'static str>,
  pub format: FieldFormat,
}

const fn field(
  key: &'static str,
  label: &'static str,
  example: &'static str,
  category: Category,
  format: FieldFormat,
) -> CatalogEntry {
  let in_loop = matches!(category, Category::Directors | Category::Shareholders);
  CatalogEntry { key, label, example, category, is_block: false, in_loop, usage: None, format }
}

const fn block(
  key: &'static str,
  label: &'static str,
  usage: &'static str,
  category: Category,
) -> CatalogEntry {
  let is_block = matches!(category, Category::Blocks) && key.as_bytes()[0] == b'#';
  CatalogEntry {
    key,
    label,
    example: "",
    category,
    is_block,
    in_loop: false,
    usage: Some(usage),
    format: FieldFormat::Text,
  }
}

static ENTRIES: &[CatalogEntry] = &[
  field("company.name", "Company Name", "Acme Pte Ltd", Category::Company, FieldFormat::Text),
  field("company.uen", "UEN", "202312345A", Category::Company, FieldFormat::Text),
  field(
    "company.registeredAddress",
    "Registered Address",
    "10 Anson Road, Singapore 079903",
    Category::Company,
    FieldFormat::Text,
  ),
  field(
    "company.entityType",
    "Entity Type",
    "Private Limited Company",
    Category::Company,
    FieldFormat::Text,
  ),
  field("company.capital", "Paid-up Capital", "$100,000", Category::Company, FieldFormat::Currency),
  field(
    "company.incorporationDate",
    "Incorporation Date",
    "12 April 2023",
    Category::Company,
    FieldFormat::Date,
  ),
  field("company.address.block", "Block", "10", Category::Address, FieldFormat::Text),
  field("company.address.street", "Street", "Anson Road", Category::Address, FieldFormat::Text),
  field("company.address.level", "Level", "12", Category::Address, FieldFormat::Text),
  field("company.address.unit", "Unit", "01", Category::Address, FieldFormat::Text),
  field(
    "company.address.building",
    "Building",
    "International Plaza",
    Category::Address,
    FieldFormat::Text,
  ),
  field("company.address.postalCode", "Postal Code", "079903", Category::Address, FieldFormat::Text),
  field("name", "Director Name", "John Tan", Category::Directors, FieldFormat::Text),
  field(
    "identificationNumber",
    "Identification No.",
    "S1234567A",
    Category::Directors,
    FieldFormat::Text,
  ),
  field("nationality", "Nationality", "Singaporean", Category::Directors, FieldFormat::Text),
  field("role", "Role", "Director", Category::Directors, FieldFormat::Text),
  field("address", "Address", "1 Orchard Road", Category::Directors, FieldFormat::Text),
  field("name", "Shareholder Name", "John Tan", Category::Shareholders, FieldFormat::Text),
  field("shareClass", "Share Class", "Ordinary", Category::Shareholders, FieldFormat::Text),
  field(
    "numberOfShares",
    "Number of Shares",
    "60,000",
    Category::Shareholders,
    FieldFormat::Number,
  ),
  field("percentageHeld", "Percentage Held", "60%", Category::Shareholders, FieldFormat::Percent),
  field(
    "identificationNumber",
    "Identification No.",
    "S1234567A",
    Category::Shareholders,
    FieldFormat::Text,
  ),
  field("nationality", "Nationality", "Singaporean", Category::Shareholders, FieldFormat::Text),
  field("contact.fullName", "Full Name", "Grace Ong", Category::Contact, FieldFormat::Text),
  field("contact.email", "Email", "grace.ong@example.com", Category::Contact, FieldFormat::Text),
  field("contact.phone", "Phone", "+65 6123 4567", Category::Contact, FieldFormat::Text),
  field(
    "contact.identificationNumber",
    "Identification No.",
    "S2345678C",
    Category::Contact,
    FieldFormat::Text,
  ),
  field("system.currentDate", "Current Date", "17 October 2026", Category::System, FieldFormat::Date),
  field("system.generatedBy", "Generated By", "Folio", Category::System, FieldFormat::Text),
  block(
    "#each directors",
    "Loop over directors",
    "{{#each directors}}\n{{@number}}. {{name}}\n{{/each}}",
    Category::Blocks,
  ),
  block(
    "#each shareholders",
    "Loop over shareholders",
    "{{#each shareholders}}\n{{name}}: {{numberOfShares}}\n{{/each}}",
    Category::Blocks,
  ),
  block("#if", "Show when true", "{{#if custom.flag}}\n...\n{{else}}\n...\n{{/if}}", Category::Blocks),
  block(
    "#if ==",
    "Show when equal",
    "{{#if company.entityType == 'Private Limited Company'}}\n...\n{{/if}}",
    Category::Blocks,
  ),
  block("#unless", "Show when false", "{{#unless custom.flag}}\n...\n{{/unless}}", Category::Blocks),
  block("@index", "Loop index (from 0)", "{{@index}}", Category::Blocks),
  block("@number", "Loop number (from 1)", "{{@number}}", Category::Blocks),
  block("UCASE", "Uppercase", "UCASE({{company.name}})", Category::Modifiers),
  block("LCASE", "Lowercase", "LCASE({{company.name}})", Category::Modifiers),
  block("PCASE", "Title Case", "PCASE({{company.name}})", Category::Modifiers),
];

pub fn entries() -> &'static [CatalogEntry] {
  ENTRIES
}

/// Collections `{{#each}}` and indexed placeholders iterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
  Directors,
  Shareholders,
}

impl Collection {
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "directors" => Some(Self::Directors),
      "shareholders" => Some(Self::Shareholders),
      _ => None,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Self::Directors => "directors",
      Self::Shareholders => "shareholders",
    }
  }

  fn category(self) -> Category {
    match self {
      Self::Directors => Category::Directors,
      Self::Shareholders => Category::Shareholders,
    }
  }

  /// Catalog entry for a per-element field (`name`, `numberOfShares`, ...).
  pub fn field(self, name: &str) -> Option<&'static CatalogEntry> {
    ENTRIES.iter().find(|e| e.category == self.category() && e.key == name)
  }
}

/// Scalar built-in such as `company.capital` or `system.currentDate`.
pub fn builtin(key: &str) -> Option<&'static CatalogEntry> {
  ENTRIES.iter().find(|e| {
    e.key == key
      && matches!(e.category, Category::Company | Category::Address | Category::Contact | Category::System)
  })
}

/// Syntactic classification of a placeholder path outside of any loop scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind<'a> {
  BuiltIn(&'static CatalogEntry),
  Custom(&'a str),
  Indexed { collection: Collection, index: usize, field: &'static CatalogEntry },
  Unknown,
}

impl PartialEq for CatalogEntry {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key && self.category == other.category
  }
}

impl Eq for CatalogEntry {}

pub fn classify(path: &str) -> PlaceholderKind<'_> {
  if let Some(key) = path.strip_prefix("custom.") {
    return PlaceholderKind::Custom(key);
  }
  if let Some(entry) = builtin(path) {
    return PlaceholderKind::BuiltIn(entry);
  }
  let indexed = path.split_once('.').and_then(|(head, field_name)| {
    let (name, index) = split_index(head)?;
    let collection = Collection::from_name(name)?;
    let field = collection.field(field_name)?;
    Some(PlaceholderKind::Indexed { collection, index, field })
  });
  indexed.unwrap_or(PlaceholderKind::Unknown)
}

/// One insertable item in the editor palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteItem {
  pub token: String,
  pub label: String,
  pub example: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteGroup {
  pub category: Category,
  pub label: &'static str,
  pub items: Vec<PaletteItem>,
}

/// Palette grouped by category, in catalog order, followed by the
/// template's custom fields and the tenant's partials (when non-empty).
pub fn palette(custom: &[CustomPlaceholder], partials: &[Partial]) -> Vec<PaletteGroup> {
  let mut groups: Vec<PaletteGroup> = Vec::new();
  for entry in ENTRIES {
    let token = match (entry.usage, entry.in_loop) {
      (Some(usage), _) => usage.to_string(),
      (None, true) => format!("{{{{this.{}}}}}", entry.key),
      (None, false) => format!("{{{{{}}}}}", entry.key),
    };
    let item =
      PaletteItem { token, label: entry.label.to_string(), example: entry.example.to_string() };
    match groups.last_mut() {
      Some(group) if group.category == entry.category => group.items.push(item),
      _ => groups.push(PaletteGroup {
        category: entry.category,
        label: entry.category.label(),
        items: vec![item],
      }),
    }
  }

  if !custom.is_empty() {
    let items = custom
      .iter()
      .map(|def| PaletteItem {
        token: def.token(),
        label: def.label.clone(),
        example: def.default_value.clone().unwrap_or_default(),
      })
      .collect();
    groups.push(PaletteGroup { category: Category::Custom, label: Category::Custom.label(), items });
  }

  if !partials.is_empty() {
    let items = partials
      .iter()
      .map(|p| PaletteItem {
        token: format!("{{{{> {}}}}}", p.name),
        label: p.name.clone(),
        example: p.description.clone().unwrap_or_default(),
      })
      .collect();
    groups.push(PaletteGroup {
      category: Category::Partials,
      label: Category::Partials.label(),
      items,
    });
  }

  groups
}
