use regex::Regex;
use rstest::rstest;
use similar_asserts::assert_eq;

use super::*;

/// Identity host formatter: returns the masked document unchanged.
struct PassthroughFormatter;

impl HostFormatter for PassthroughFormatter {
	fn format(&self, document: &str, _grammar: HostGrammar) -> AnyResult<String> {
		Ok(document.to_owned())
	}
}

/// Host formatter that always fails.
struct FailingFormatter;

impl HostFormatter for FailingFormatter {
	fn format(&self, _document: &str, _grammar: HostGrammar) -> AnyResult<String> {
		Err("formatter crashed".into())
	}
}

/// Host formatter that discards its input entirely, simulating a formatter
/// that deleted every placeholder.
struct DiscardingFormatter;

impl HostFormatter for DiscardingFormatter {
	fn format(&self, _document: &str, _grammar: HostGrammar) -> AnyResult<String> {
		Ok("<div></div>".to_owned())
	}
}

#[rstest]
#[case::style_value(
	"<style>color: {{ c }};</style>",
	"<style>color: __STYLE_VALUE_1__;</style>"
)]
#[case::style_block(
	"<style>{% if dark %}.a{color:#000}{% endif %}</style>",
	"<style>/*__STYLE_BLOCK_1__*/.a{color:#000}/*__STYLE_BLOCK_2__*/</style>"
)]
#[case::script(
	"<script>if ({{ ok }}) { track({# id #}); }</script>",
	"<script>if (_1_) { track(_2_); }</script>"
)]
#[case::tag_attribute(
	r#"<div class="{% if a %}on{% endif %}">"#,
	r#"<div class="npe1_onnpe2_">"#
)]
#[case::tag_name_duplicate(
	"<{{ tag }}>{{ tag }}</{{ tag }}>",
	"<npe1_><!--placeholder-2--></npe1_>"
)]
#[case::comment("before {# hidden #} after", "before <!--1--> after")]
#[case::json_attribute(
	r#"{% module_attribute "data" is_json="true" %}{"k": "<v>"}{% end_module_attribute %}"#,
	"<!--placeholder-2--><!--placeholder-1--><!--placeholder-3-->"
)]
#[case::generic_tag("{% set a = 1 %}", "<!--placeholder-1-->")]
#[case::generic_expression("{{ title }}", "<!--placeholder-1-->")]
#[case::no_constructs("<div><p>hello</p></div>", "<div><p>hello</p></div>")]
fn masks_constructs(#[case] input: &str, #[case] expected: &str) {
	let mut vault = TokenVault::new();
	let masked = mask(input, &mut vault);
	assert_eq!(masked, expected);
}

#[rstest]
#[case::plain_html("<div>\n\t<p>hello</p>\n</div>")]
#[case::attribute_expression(r#"<div class="{{ a }}">x</div>"#)]
#[case::style_value("<style>color: {{ c }};</style>")]
#[case::style_comment("<style>h1 { {# dark mode #}color: #000; }</style>")]
#[case::script_expression("<script>var a = {{ x }};</script>")]
#[case::comment("{# note #}")]
#[case::tag_block("{% if a %}b{% endif %}")]
#[case::expression_in_content("<p>{{ greeting }}</p>")]
#[case::tag_name_duplicate("<{{ tag }}>{{ tag }}</{{ tag }}>")]
fn masking_round_trips(#[case] input: &str) {
	let mut vault = TokenVault::new();
	let masked = mask(input, &mut vault);
	let restored = restore(&masked, &mut vault);

	assert_eq!(restored, input);
	assert!(vault.is_empty());
}

#[test]
fn masked_output_is_free_of_constructs() {
	let input = r#"<div class="{{ klass }}">
	<style>
		.a { color: {{ c }}; }
	</style>
	<script>
		var x = {{ x }};
	</script>
	{# note #}
	{% if a %}<span>{{ a }}</span>{% endif %}
</div>"#;

	let mut vault = TokenVault::new();
	let masked = mask(input, &mut vault);

	assert!(!masked.contains("{%"));
	assert!(!masked.contains("{{"));
	assert!(!masked.contains("{#"));
	assert_eq!(vault.len(), 7);
}

#[test]
fn multiline_tag_block_collapses_line_breaks() {
	let mut vault = TokenVault::new();
	let masked = mask("<p>{% set x\n= 1 %}</p>", &mut vault);

	assert_eq!(masked, "<p><!--placeholder-1--></p>");
	assert_eq!(restore(&masked, &mut vault), "<p>{% set x = 1 %}</p>");
}

#[test]
fn json_attribute_payload_is_wrapped_and_kept_verbatim() {
	let input = r#"{% widget_attribute "label" is_json=true %}{"a": "<b>", "n": 1}{% end_widget_attribute %}"#;

	let mut vault = TokenVault::new();
	let masked = mask(input, &mut vault);
	// The raw payload must be fully opaque to the host formatter.
	assert!(!masked.contains('"'));
	assert!(!masked.contains("<b>"));

	let restored = restore(&masked, &mut vault);
	assert_eq!(
		restored,
		r#"{% widget_attribute "label" is_json=true %}{% json_block %}{"a": "<b>", "n": 1}{% end_json_block %}{% end_widget_attribute %}"#
	);
}

#[test]
fn format_document_round_trips_mixed_document() {
	let input = r#"<div class="{{ klass }}">
	<style>
		.a { color: {{ c }}; }
	</style>
	<script>
		var x = {{ x }};
	</script>
	{# note #}
	{% if a %}<span>{{ a }}</span>{% endif %}
</div>"#;

	let output = format_document(input, &PassthroughFormatter).unwrap();
	assert_eq!(output, input);
}

#[test]
fn format_document_trims_surrounding_whitespace() {
	let output = format_document("\n\n  <p>{{ a }}</p>  \n", &PassthroughFormatter).unwrap();
	assert_eq!(output, "<p>{{ a }}</p>");
}

#[test]
fn format_document_leaks_no_tokens() {
	let leak = Regex::new(
		r"npe\d+_|__STYLE_(?:BLOCK|VALUE)_\d+__|<!--placeholder-\d+-->|<!--\d+-->|\b_\d+_\b",
	)
	.unwrap();
	let input = r#"<{{ tag }} class="{% if a %}on{% endif %}">{{ tag }}</{{ tag }}>
<style>color: {{ c }};</style>
<script>run({# go #});</script>
{% set x
= 1 %}"#;

	let output = format_document(input, &PassthroughFormatter).unwrap();
	assert!(!leak.is_match(&output), "leaked token in: {output}");
}

#[test]
fn format_document_resolves_duplicate_tag_name_references() {
	let output = format_document("<{{ tag }}>{{ tag }}</{{ tag }}>", &PassthroughFormatter).unwrap();
	assert_eq!(output, "<{{ tag }}>{{ tag }}</{{ tag }}>");
}

#[test]
fn format_document_wraps_pre_regions() {
	let output = format_document("<pre>{{ x }}</pre>", &PassthroughFormatter).unwrap();
	assert_eq!(output, "<pre>{% preserve %}{{ x }}{% endpreserve %}</pre>");
}

#[test]
fn format_document_propagates_formatter_failure() {
	let result = format_document("<p>{{ a }}</p>", &FailingFormatter);

	let error = result.unwrap_err();
	assert!(matches!(&error, HublFmtError::HostFormatter(message) if message.contains("formatter crashed")));
}

#[test]
fn format_document_drops_tokens_deleted_by_formatter() {
	// The formatter threw the placeholders away; restoration must still
	// complete and simply lose the masked constructs.
	let output = format_document("<p>{{ a }}{% if b %}{% endif %}</p>", &DiscardingFormatter).unwrap();
	assert_eq!(output, "<div></div>");
}

#[rstest]
#[case::bare_pre(
	"<pre>text</pre>",
	"<pre>{% preserve %}text{% endpreserve %}</pre>"
)]
#[case::pre_with_attributes(
	r#"<pre class="code">text</pre>"#,
	r#"<pre class="code">{% preserve %}text{% endpreserve %}</pre>"#
)]
#[case::multiple_pre(
	"<pre>a</pre><pre>b</pre>",
	"<pre>{% preserve %}a{% endpreserve %}</pre><pre>{% preserve %}b{% endpreserve %}</pre>"
)]
#[case::already_marked(
	"<pre>{% preserve %}text{% endpreserve %}</pre>",
	"<pre>{% preserve %}text{% endpreserve %}</pre>"
)]
#[case::similar_tag_name_untouched(
	"<presentation>text</presentation>",
	"<presentation>text</presentation>"
)]
#[case::no_pre("<div>text</div>", "<div>text</div>")]
fn inserts_preservation_markers(#[case] input: &str, #[case] expected: &str) {
	assert_eq!(insert_preservation_markers(input), expected);
}

#[test]
fn preservation_markers_are_idempotent() {
	let once = insert_preservation_markers("<pre>line one\nline two</pre>");
	let twice = insert_preservation_markers(&once);
	assert_eq!(twice, once);
}

#[test]
fn vault_tokens_are_unique_and_monotonic() {
	let mut vault = TokenVault::new();

	let first = vault.reserve(TokenKind::Comment, "{# a #}");
	let second = vault.reserve(TokenKind::Comment, "{# a #}");
	let third = vault.reserve(TokenKind::Placeholder, "{% b %}");

	assert_eq!(first, "<!--1-->");
	assert_eq!(second, "<!--2-->");
	assert_eq!(third, "<!--placeholder-3-->");
	assert_eq!(vault.len(), 3);
}

#[test]
fn vault_lookup_is_restricted_to_namespace() {
	let mut vault = TokenVault::new();

	vault.reserve(TokenKind::StyleValue, "{{ a }}");
	assert_eq!(vault.find_by_value(TokenKind::TagAttribute, "{{ a }}"), None);

	let token = vault.reserve(TokenKind::TagAttribute, "{{ a }}");
	assert_eq!(
		vault.find_by_value(TokenKind::TagAttribute, "{{ a }}"),
		Some(token)
	);
	assert_eq!(vault.find_by_value(TokenKind::TagAttribute, "{{ b }}"), None);
}

#[test]
fn vault_restores_every_occurrence_of_a_token() {
	let mut vault = TokenVault::new();
	let token = vault.reserve(TokenKind::TagAttribute, "{{ tag }}");

	let text = format!("<{token}>content</{token}>");
	let restored = vault.drain_and_restore(&text);

	assert_eq!(restored, "<{{ tag }}>content</{{ tag }}>");
	assert!(vault.is_empty());
}

#[test]
fn vault_restores_originals_containing_earlier_tokens() {
	// A late pass can store an original that embeds a token minted by an
	// earlier pass; the sweep must re-expose and resolve it.
	let mut vault = TokenVault::new();
	let inner = vault.reserve(TokenKind::Comment, "{# note #}");
	let outer = vault.reserve(
		TokenKind::Placeholder,
		&format!("{{% json_block %}}{inner}{{% end_json_block %}}"),
	);

	let restored = vault.drain_and_restore(&outer);

	assert_eq!(restored, "{% json_block %}{# note #}{% end_json_block %}");
	assert!(vault.is_empty());
}

#[test]
fn vault_drains_even_when_tokens_are_missing_from_text() {
	let mut vault = TokenVault::new();
	vault.reserve(TokenKind::Comment, "{# gone #}");

	let restored = vault.drain_and_restore("<div></div>");

	assert_eq!(restored, "<div></div>");
	assert!(vault.is_empty());
}

#[test]
fn script_tokens_never_collide_on_shared_prefixes() {
	let mut vault = TokenVault::new();

	// Push the counter past 9 so single- and double-digit script tokens
	// coexist: _1_ must not match inside _12_.
	let tokens: Vec<String> = (0..12)
		.map(|index| vault.reserve(TokenKind::Script, &format!("{{{{ v{index} }}}}")))
		.collect();

	let text = tokens.join(" ");
	let restored = vault.drain_and_restore(&text);

	assert_eq!(
		restored,
		"{{ v0 }} {{ v1 }} {{ v2 }} {{ v3 }} {{ v4 }} {{ v5 }} {{ v6 }} {{ v7 }} {{ v8 }} {{ v9 }} {{ v10 }} {{ v11 }}"
	);
}

#[test]
fn independent_documents_never_share_state() {
	let first = format_document("<p>{{ a }}</p>", &PassthroughFormatter).unwrap();
	let second = format_document("<p>{{ b }}</p>", &PassthroughFormatter).unwrap();

	assert_eq!(first, "<p>{{ a }}</p>");
	assert_eq!(second, "<p>{{ b }}</p>");
}
