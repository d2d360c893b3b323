/* src/resolver/rust/src/tests/mod.rs */


use super::*;
use serde_json::json;

fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn options() -> ResolveOptions {
  ResolveOptions { today: Some(today()), ..ResolveOptions::default() }
}

fn context(value: Value) -> DataContext {
  serde_json::from_value(value).unwrap()
}

fn render_sample(template: &str) -> String {
  Resolver::new(&[]).with_options(options()).try_resolve(template, &DataContext::sample()).unwrap().html
}

// -- Scalars --

#[test]
fn company_fields() {
  assert_eq!(
    render_sample("<p>{{company.name}} ({{company.uen}})</p>"),
    "<p>Acme Pte Ltd (202312345A)</p>"
  );
}

#[test]
fn nested_address_field() {
  assert_eq!(render_sample("#{{company.address.level}}-{{company.address.unit}}"), "#12-01");
}

#[test]
fn formatted_builtins() {
  assert_eq!(
    render_sample("{{company.capital}} / {{company.incorporationDate}}"),
    "$100,000 / 12 April 2023"
  );
}

#[test]
fn system_fields() {
  assert_eq!(render_sample("{{system.currentDate}} by {{system.generatedBy}}"), "17 October 2026 by Folio");
}

#[test]
fn whitespace_inside_braces() {
  assert_eq!(render_sample("{{ company.name }}"), "Acme Pte Ltd");
}

#[test]
fn missing_data_renders_empty() {
  let html = resolve("Name: {{company.name}}; Email: {{contact.email}}.", &DataContext::default(), &[]);
  assert_eq!(html, "Name: ; Email: .");
}

#[test]
fn unknown_placeholder_left_literal() {
  assert_eq!(render_sample("{{company.nickname}} {{foo}}"), "{{company.nickname}} {{foo}}");
}

#[test]
fn values_are_escaped() {
  let ctx = context(json!({"company": {"name": "Smith & <Sons>"}}));
  assert_eq!(resolve("{{company.name}}", &ctx, &[]), "Smith &amp; &lt;Sons&gt;");
}

// -- Indexed --

#[test]
fn indexed_fields() {
  assert_eq!(
    render_sample("{{directors[1].name}}, {{shareholders[0].percentageHeld}}"),
    "Mary Lim, 60%"
  );
}

#[test]
fn indexed_out_of_range_left_literal() {
  assert_eq!(render_sample("{{directors[5].name}}"), "{{directors[5].name}}");
}

// -- Partials --

#[test]
fn partial_placeholders_resolve() {
  let partials = vec![Partial::new("1", "letterhead", "<h1>{{company.name}}</h1>")];
  let html = resolve("{{> letterhead}}<p>Body</p>", &DataContext::sample(), &partials);
  assert_eq!(html, "<h1>Acme Pte Ltd</h1><p>Body</p>");
}

#[test]
fn partial_inclusion_is_one_level() {
  let partials = vec![
    Partial::new("1", "outer", "[{{> inner}}]"),
    Partial::new("2", "inner", "deep"),
  ];
  assert_eq!(resolve("{{> outer}}", &DataContext::sample(), &partials), "[{{> inner}}]");
}

#[test]
fn unknown_partial_marker_does_not_abort() {
  let html = resolve("{{> nonexistent}} {{company.name}}", &DataContext::sample(), &[]);
  assert!(html.contains(r#"class="partial-error""#));
  assert!(html.contains("Partial not found: nonexistent"));
  assert!(html.ends_with("</span> Acme Pte Ltd"));
}

// -- Loops --

#[test]
fn loop_cardinality() {
  let ctx = context(json!({"directors": [{"name": "John"}, {"name": "Mary"}]}));
  assert_eq!(resolve("{{#each directors}}{{@number}}. {{name}}{{/each}}", &ctx, &[]), "1. John2. Mary");
}

#[test]
fn loop_dual_syntax() {
  let bare = render_sample("{{#each directors}}{{name}}|{{/each}}");
  let this = render_sample("{{#each directors}}{{this.name}}|{{/each}}");
  assert_eq!(bare, this);
  assert_eq!(bare, "John Tan|Mary Lim|");
}

#[test]
fn loop_index_zero_based() {
  assert_eq!(render_sample("{{#each shareholders}}{{@index}}{{/each}}"), "01");
}

#[test]
fn loop_field_formats() {
  assert_eq!(
    render_sample("{{#each shareholders}}{{name}}: {{numberOfShares}} ({{percentageHeld}}); {{/each}}"),
    "John Tan: 60,000 (60%); Mary Lim: 40,000 (40%); "
  );
}

#[test]
fn loop_missing_field_empty() {
  let ctx = context(json!({"directors": [{"name": "Ann"}]}));
  assert_eq!(resolve("{{#each directors}}[{{role}}]{{/each}}", &ctx, &[]), "[]");
}

#[test]
fn loop_over_empty_collection() {
  assert_eq!(resolve("a{{#each directors}}x{{/each}}b", &DataContext::default(), &[]), "ab");
}

// -- Conditionals --

#[test]
fn custom_flag_truthiness() {
  let template = "{{#if custom.flag}}A{{else}}B{{/if}}";
  for (flag, expected) in [("true", "A"), ("false", "B"), ("0", "B"), ("yes", "A"), ("", "A")] {
    let ctx = DataContext::default().with_custom("flag", flag);
    assert_eq!(resolve(template, &ctx, &[]), expected, "flag = {flag:?}");
  }
  assert_eq!(resolve(template, &DataContext::default(), &[]), "B");
}

#[test]
fn equality_condition() {
  let template = "{{#if company.entityType == 'Private Limited Company'}}Pte{{else}}Other{{/if}}";
  assert_eq!(render_sample(template), "Pte");
  let ctx = context(json!({"company": {"entityType": "private limited company"}}));
  assert_eq!(resolve(template, &ctx, &[]), "Other");
}

#[test]
fn inequality_condition() {
  assert_eq!(render_sample("{{#if company.uen != 'x'}}yes{{/if}}"), "yes");
  assert_eq!(resolve("{{#if company.uen != 'x'}}yes{{/if}}", &DataContext::default(), &[]), "yes");
}

#[test]
fn unless_block() {
  let ctx = DataContext::default().with_custom("signed", "false");
  assert_eq!(resolve("{{#unless custom.signed}}Unsigned{{/unless}}", &ctx, &[]), "Unsigned");
  assert_eq!(render_sample("{{#unless company.name}}none{{/unless}}"), "");
}

// -- Modifiers and paragraphs --

#[test]
fn modifier_composition() {
  assert_eq!(render_sample("UCASE({{company.name}})"), "ACME PTE LTD");
  assert_eq!(render_sample("PCASE({{contact.fullName}})"), "Grace Ong");
}

#[test]
fn paragraph_preservation() {
  assert_eq!(render_sample("<p>a</p><p></p><p>b</p>"), "<p>a</p><p>&nbsp;</p><p>b</p>");
}

#[test]
fn emptied_paragraph_preserved() {
  assert_eq!(
    resolve("<p>{{company.name}}</p>", &DataContext::default(), &[]),
    "<p>&nbsp;</p>"
  );
}

// -- Degraded input --

#[test]
fn unrecognized_conditions_are_false() {
  let cases = [
    ("{{#if company.capital > 0}}Y{{/if}}rest", "rest"),
    ("{{#if company.entityType == \"Private Limited Company\"}}Y{{/if}}rest", "rest"),
    ("{{#if company.name == Acme}}Y{{/if}}rest", "rest"),
    ("{{#if}}Y{{/if}}rest", "rest"),
    ("{{#if a b}}Y{{else}}N{{/if}}rest", "Nrest"),
    ("{{#unless company.capital > 0}}U{{/unless}}", "U"),
  ];
  for (template, expected) in cases {
    assert_eq!(render_sample(template), expected, "template {template}");
  }
}

#[test]
fn invalid_partial_names_do_not_fail_preview() {
  let partials = vec![
    Partial::new("1", "Bad Name", "x"),
    Partial::new("2", "Header", "<h1/>"),
    Partial::new("3", "sig", "first"),
    Partial::new("4", "sig", "second"),
  ];
  let preview = Resolver::new(&partials).with_options(options()).preview(
    "<p>{{company.name}}</p>{{> Header}}{{> sig}}",
    &DataContext::sample(),
  );
  assert!(preview.is_rendered());
  let html = preview.into_html();
  assert!(html.starts_with("<p>Acme Pte Ltd</p><span"), "got {html}");
  assert!(html.contains("Partial not found: Header"));
  assert!(html.ends_with("</span>first"));
}

#[test]
fn invalid_custom_key_fails_preview() {
  let mut def = CustomPlaceholder::new("1", "Amount", CustomKind::Number);
  def.key = "Bad Key".into();
  let custom = vec![def];
  let preview = Resolver::new(&[]).with_custom_placeholders(&custom).preview("text", &DataContext::sample());
  assert_eq!(preview, Preview::Failed { message: PREVIEW_ERROR_MESSAGE.to_string() });
  assert!(!preview.is_rendered());
}

#[test]
fn try_resolve_reports_cause() {
  let custom = vec![
    CustomPlaceholder::new("1", "Amount", CustomKind::Number),
    CustomPlaceholder::new("2", "amount", CustomKind::Text),
  ];
  let err = Resolver::new(&[])
    .with_custom_placeholders(&custom)
    .try_resolve("{{custom.amount}}", &DataContext::sample())
    .unwrap_err();
  assert_eq!(err, ResolveError::DuplicateCustomKey("amount".into()));
}
