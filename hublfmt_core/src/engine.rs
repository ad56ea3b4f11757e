use tracing::debug;

use crate::error::AnyResult;
use crate::error::HublFmtError;
use crate::error::HublFmtResult;
use crate::passes;
use crate::preserve::insert_preservation_markers;
use crate::vault::TokenVault;

/// The host grammar an external formatter is asked to apply to the masked
/// document. Only HTML exists at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostGrammar {
	Html,
}

impl HostGrammar {
	/// Stable name, suitable as a parser identifier for formatter CLIs.
	pub fn name(self) -> &'static str {
		match self {
			Self::Html => "html",
		}
	}
}

/// An external host-language formatter.
///
/// Treated as an opaque synchronous call: it receives the masked document,
/// returns the reformatted document, and has no access to the vault. Any
/// error it raises propagates unmodified and aborts the masking cycle before
/// restoration — the caller never sees partially masked output.
pub trait HostFormatter {
	fn format(&self, document: &str, grammar: HostGrammar) -> AnyResult<String>;
}

/// Run all masking passes over `input` in their fixed order, registering
/// every replaced construct in `vault`. The returned text is safe to hand to
/// an HTML-only formatter.
pub fn mask(input: &str, vault: &mut TokenVault) -> String {
	let passes: [(&str, fn(&str, &mut TokenVault) -> String); 7] = [
		("style_blocks", passes::mask_style_blocks),
		("script_blocks", passes::mask_script_blocks),
		("tag_attributes", passes::mask_tag_attributes),
		("comments", passes::mask_comments),
		("json_attributes", passes::mask_json_attributes),
		("tag_blocks", passes::mask_tag_blocks),
		("expressions", passes::mask_expressions),
	];

	let mut text = input.to_owned();
	for (name, pass) in passes {
		let registered = vault.len();
		text = pass(&text, vault);
		debug!(
			pass = name,
			masked = vault.len() - registered,
			"masking pass complete"
		);
	}

	text
}

/// Reverse all substitutions recorded in `vault`, leaving it empty.
pub fn restore(input: &str, vault: &mut TokenVault) -> String {
	vault.drain_and_restore(input)
}

/// Format a mixed HubL/HTML document through an external HTML formatter.
///
/// The full round trip: trim the input, mask every sublanguage construct,
/// hand the masked text to `formatter`, wrap `<pre>` regions with
/// `{% preserve %}` markers, then restore the original constructs. The vault
/// is scoped to this call, so concurrent documents can never cross-
/// contaminate each other's placeholders.
pub fn format_document(input: &str, formatter: &dyn HostFormatter) -> HublFmtResult<String> {
	let mut vault = TokenVault::new();

	let masked = mask(input.trim(), &mut vault);
	let formatted = formatter
		.format(&masked, HostGrammar::Html)
		.map_err(|error| HublFmtError::HostFormatter(error.to_string()))?;
	let marked = insert_preservation_markers(&formatted);

	Ok(restore(&marked, &mut vault))
}
