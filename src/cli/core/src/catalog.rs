/* src/cli/core/src/catalog.rs */

use anyhow::{Context, Result};
use folio_resolver::palette;

use crate::ui;

pub fn run_catalog(json: bool) -> Result<()> {
  let groups = palette(&[], &[]);
  if json {
    let out = serde_json::to_string_pretty(&groups).context("failed to serialize catalog")?;
    println!("{out}");
    return Ok(());
  }

  for group in &groups {
    ui::heading(group.label);
    for item in &group.items {
      // block usages span several lines; the opener is enough here
      let token = item.token.lines().next().unwrap_or_default();
      ui::entry(token, &item.label);
    }
  }
  ui::blank();
  Ok(())
}
