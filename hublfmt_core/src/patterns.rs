//! Compiled scanners for every pattern category.
//!
//! All patterns are hard-coded and compiled once on first use. Lookarounds
//! from the original grammar sketches are expressed without lookaround: a
//! lookahead before a lazy tail is simply consumed, and adjacency checks
//! (the `<pre>` marker guard) live in code instead of the pattern.

use std::sync::LazyLock;

use regex::Regex;

fn pattern(source: &str) -> Regex {
	Regex::new(source).expect("hard-coded pattern must compile")
}

/// A HubL tag block: `{% … %}`.
pub(crate) static TAG_BLOCK: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)\{%.+?%\}"));

/// A HubL expression block: `{{ … }}`.
pub(crate) static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)\{\{.+?\}\}"));

/// A HubL comment: `{# … #}`.
pub(crate) static COMMENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)\{#.*?#\}"));

/// Line-break runs collapsed when storing multi-line tag blocks.
pub(crate) static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| pattern(r"[\r\n]+"));

/// Tag block optionally preceded by a CSS declaration lead-in (`prop:`).
pub(crate) static TAG_BLOCK_WITH_LEAD: LazyLock<Regex> =
	LazyLock::new(|| pattern(r"(?s)(:\s*)?(\{%.+?%\})"));

/// Expression block optionally preceded by a CSS declaration lead-in.
pub(crate) static EXPRESSION_WITH_LEAD: LazyLock<Regex> =
	LazyLock::new(|| pattern(r"(?s)(:\s*)?(\{\{.+?\}\})"));

/// Comment optionally preceded by a CSS declaration lead-in.
pub(crate) static COMMENT_WITH_LEAD: LazyLock<Regex> =
	LazyLock::new(|| pattern(r"(?s)(:\s*)?(\{#.*?#\})"));

/// A whole `<style>…</style>` region, attributes included.
pub(crate) static STYLE_REGION: LazyLock<Regex> =
	LazyLock::new(|| pattern(r"(?is)<style\b[^>]*>.*?</style\s*>"));

/// A whole `<script>…</script>` region, attributes included.
pub(crate) static SCRIPT_REGION: LazyLock<Regex> =
	LazyLock::new(|| pattern(r"(?is)<script\b[^>]*>.*?</script\s*>"));

/// An HTML start (or end) tag whose text contains a sublanguage construct
/// before the closing `>`. Constructs in element content never match because
/// `[^>]` cannot cross the end of a preceding tag.
pub(crate) static TAG_WITH_CONSTRUCT: LazyLock<Regex> =
	LazyLock::new(|| pattern(r"(?s)<[^>]*?(?:\{%|\{\{).*?>"));

/// A JSON-bearing attribute region: the `widget_attribute`/`module_attribute`
/// opening delimiter with `is_json=true`, the raw payload, and the matching
/// end delimiter, captured separately so the delimiters stay in the text.
pub(crate) static JSON_REGION: LazyLock<Regex> = LazyLock::new(|| {
	pattern(
		r#"(?is)(\{%\s*(?:widget_attribute|module_attribute)\b[^%]*is_json\s*=\s*"?true"?[^%]*%\})(.*?)(\{%[^%]*end_(?:widget_attribute|module_attribute)[^%]*%\})"#,
	)
});

/// A `<pre>` opening tag.
pub(crate) static PRE_OPEN: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)<pre\b[^>]*>"));

/// A `</pre>` closing tag.
pub(crate) static PRE_CLOSE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)</pre\s*>"));
