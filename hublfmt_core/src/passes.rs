//! The ordered scan-and-replace passes that neutralize sublanguage
//! constructs before the host formatter runs.
//!
//! Each pass is a pure function `(text, &mut vault) -> text` responsible for
//! one syntactic category, consuming the output of the previous pass. The
//! order is load-bearing: constructs nested inside `<style>`/`<script>`
//! bodies and start tags must be masked before the global passes run, or the
//! global tag-block pass would match across HTML tag boundaries.

use regex::Captures;

use crate::patterns;
use crate::vault::TokenKind;
use crate::vault::TokenVault;

/// Whether `text` contains any sublanguage construct opener.
fn has_construct(text: &str) -> bool {
	text.contains("{%") || text.contains("{{") || text.contains("{#")
}

/// Pass 1: constructs inside `<style>` bodies.
///
/// A construct preceded by a CSS declaration lead-in (`color: {{ c }}`)
/// sits in value position and is masked as a bare value identifier, with
/// the lead-in kept verbatim. Anything else becomes a CSS-comment-shaped
/// token so the region stays syntactically valid CSS.
pub(crate) fn mask_style_blocks(input: &str, vault: &mut TokenVault) -> String {
	patterns::STYLE_REGION
		.replace_all(input, |caps: &Captures| {
			let region = &caps[0];

			if !has_construct(region) {
				return region.to_owned();
			}

			let mut masked = region.to_owned();
			for pattern in [
				&patterns::TAG_BLOCK_WITH_LEAD,
				&patterns::EXPRESSION_WITH_LEAD,
				&patterns::COMMENT_WITH_LEAD,
			] {
				masked = pattern
					.replace_all(&masked, |caps: &Captures| {
						let lead = caps.get(1).map_or("", |lead| lead.as_str());
						let construct = &caps[2];
						let token = if lead.is_empty() {
							vault.reserve(TokenKind::StyleBlock, construct)
						} else {
							vault.reserve(TokenKind::StyleValue, construct)
						};
						format!("{lead}{token}")
					})
					.into_owned();
			}
			masked
		})
		.into_owned()
}

/// Pass 2: constructs inside `<script>` bodies, masked as bare identifiers
/// so the script content remains parseable.
pub(crate) fn mask_script_blocks(input: &str, vault: &mut TokenVault) -> String {
	patterns::SCRIPT_REGION
		.replace_all(input, |caps: &Captures| {
			let region = &caps[0];

			if !has_construct(region) {
				return region.to_owned();
			}

			let mut masked = region.to_owned();
			for pattern in [&patterns::TAG_BLOCK, &patterns::EXPRESSION, &patterns::COMMENT] {
				masked = pattern
					.replace_all(&masked, |caps: &Captures| {
						vault.reserve(TokenKind::Script, &caps[0])
					})
					.into_owned();
			}
			masked
		})
		.into_owned()
}

/// Pass 3: constructs inside HTML tags themselves — attribute text, or the
/// tag name. Tag blocks are masked first, then expressions.
///
/// An expression can supply a tag's name (`<{{ tag }}>…</{{ tag }}>`), so
/// before minting a fresh token the vault is asked whether the exact same
/// expression text is already masked in this namespace; both occurrences
/// must share one token or they could drift apart under the host formatter.
pub(crate) fn mask_tag_attributes(input: &str, vault: &mut TokenVault) -> String {
	patterns::TAG_WITH_CONSTRUCT
		.replace_all(input, |caps: &Captures| {
			let masked = patterns::TAG_BLOCK
				.replace_all(&caps[0], |caps: &Captures| {
					vault.reserve(TokenKind::TagAttribute, &caps[0])
				})
				.into_owned();

			patterns::EXPRESSION
				.replace_all(&masked, |caps: &Captures| {
					if let Some(token) = vault.find_by_value(TokenKind::TagAttribute, &caps[0]) {
						return token;
					}
					vault.reserve(TokenKind::TagAttribute, &caps[0])
				})
				.into_owned()
		})
		.into_owned()
}

/// Pass 4: every remaining comment, masked as an HTML comment so the host
/// formatter keeps its position as opaque content.
pub(crate) fn mask_comments(input: &str, vault: &mut TokenVault) -> String {
	patterns::COMMENT
		.replace_all(input, |caps: &Captures| {
			vault.reserve(TokenKind::Comment, &caps[0])
		})
		.into_owned()
}

/// Pass 5: JSON-bearing attribute regions.
///
/// Raw JSON between `widget_attribute`/`module_attribute` delimiters is not
/// valid HTML content and must never be reformatted as markup, so the whole
/// payload becomes a single opaque token. The stored original is wrapped in
/// synthetic `{% json_block %}` markers for the downstream HubL printer; the
/// real delimiters stay in the text and are masked by the tag-block pass.
pub(crate) fn mask_json_attributes(input: &str, vault: &mut TokenVault) -> String {
	patterns::JSON_REGION
		.replace_all(input, |caps: &Captures| {
			let original = format!("{{% json_block %}}{}{{% end_json_block %}}", &caps[2]);
			let token = vault.reserve(TokenKind::Placeholder, &original);
			format!("{}{token}{}", &caps[1], &caps[3])
		})
		.into_owned()
}

/// Pass 6: every remaining tag block, globally.
///
/// Internal line breaks are collapsed to single spaces in the stored
/// original; host HTML formatters can read embedded newlines as
/// structurally significant.
pub(crate) fn mask_tag_blocks(input: &str, vault: &mut TokenVault) -> String {
	patterns::TAG_BLOCK
		.replace_all(input, |caps: &Captures| {
			let original = patterns::LINE_BREAKS.replace_all(&caps[0], " ");
			vault.reserve(TokenKind::Placeholder, &original)
		})
		.into_owned()
}

/// Pass 7: every remaining expression block, globally.
pub(crate) fn mask_expressions(input: &str, vault: &mut TokenVault) -> String {
	patterns::EXPRESSION
		.replace_all(input, |caps: &Captures| {
			vault.reserve(TokenKind::Placeholder, &caps[0])
		})
		.into_owned()
}
