use tracing::warn;

/// Lexical namespaces for generated placeholder tokens.
///
/// Each masking pass mints tokens from its own namespace so that restoring
/// one category can never accidentally match a token produced by another,
/// and so the host formatter reads every token as inert content for the
/// position it lands in (a CSS comment inside `<style>`, a bare identifier
/// inside `<script>`, an HTML comment everywhere else).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	/// `/*__STYLE_BLOCK_n__*/` — a construct in statement position inside a
	/// `<style>` body. Shaped as a CSS comment so the block stays valid CSS.
	StyleBlock,
	/// `__STYLE_VALUE_n__` — a construct in value position inside a CSS
	/// declaration (`property: {{ … }}`).
	StyleValue,
	/// `_n_` — a construct inside a `<script>` body, shaped as a valid
	/// identifier so the script remains parseable.
	Script,
	/// `npen_` — a construct inside an HTML start tag (attribute text or the
	/// tag name itself).
	TagAttribute,
	/// `<!--n-->` — a sublanguage comment.
	Comment,
	/// `<!--placeholder-n-->` — any remaining tag block, expression, or
	/// JSON attribute payload.
	Placeholder,
}

impl TokenKind {
	/// Render the token for identifier `id`.
	///
	/// Every shape is plain ASCII with a delimiting suffix, so no token is a
	/// substring of any other and no host formatter re-encodes it.
	fn render(self, id: u64) -> String {
		match self {
			Self::StyleBlock => format!("/*__STYLE_BLOCK_{id}__*/"),
			Self::StyleValue => format!("__STYLE_VALUE_{id}__"),
			Self::Script => format!("_{id}_"),
			Self::TagAttribute => format!("npe{id}_"),
			Self::Comment => format!("<!--{id}-->"),
			Self::Placeholder => format!("<!--placeholder-{id}-->"),
		}
	}

	/// Whether `token` was minted from this namespace.
	fn owns(self, token: &str) -> bool {
		match self {
			Self::StyleBlock => token.starts_with("/*__STYLE_BLOCK_"),
			Self::StyleValue => token.starts_with("__STYLE_VALUE_"),
			Self::Script => {
				token.starts_with('_') && token.ends_with('_') && !token.starts_with("__")
			}
			Self::TagAttribute => token.starts_with("npe"),
			Self::Comment => token.starts_with("<!--") && !token.starts_with("<!--placeholder-"),
			Self::Placeholder => token.starts_with("<!--placeholder-"),
		}
	}
}

/// A reversible store mapping generated placeholder tokens to the original
/// sublanguage text they replaced.
///
/// One vault covers exactly one document's masking-to-restoration round trip.
/// It is created by [`format_document`](crate::format_document) (or by hand
/// for the lower-level [`mask`](crate::mask)/[`restore`](crate::restore)
/// entry points), threaded through the passes by mutable reference, and
/// drained during restoration. Independent documents never share a vault.
#[derive(Debug, Default)]
pub struct TokenVault {
	/// Token → original text, in generation order.
	entries: Vec<(String, String)>,
	/// Monotonic identifier source. Never reused within a vault's lifetime.
	next_id: u64,
}

impl TokenVault {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of registered tokens.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registered `(token, original)` pairs in generation order.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(token, original)| (token.as_str(), original.as_str()))
	}

	/// Allocate the next identifier, render the namespace-specific token,
	/// and record `token -> original`. Never fails.
	pub fn reserve(&mut self, kind: TokenKind, original: &str) -> String {
		self.next_id += 1;
		let token = kind.render(self.next_id);

		debug_assert!(
			self.entries.iter().all(|(existing, _)| *existing != token),
			"token namespaces must keep generated tokens unique"
		);

		self.entries.push((token.clone(), original.to_owned()));
		token
	}

	/// Find the token under which `original` was already masked in `kind`'s
	/// namespace, if any. Returns the first match in generation order.
	///
	/// Used by the tag-attribute pass so an expression that names an HTML tag
	/// and reappears elsewhere in the same tag resolves to one shared token.
	pub fn find_by_value(&self, kind: TokenKind, original: &str) -> Option<String> {
		self.entries
			.iter()
			.find(|(token, value)| value == original && kind.owns(token))
			.map(|(token, _)| token.clone())
	}

	/// Replace every remaining occurrence of every registered token in `text`
	/// with its original, then clear the vault.
	///
	/// Entries are swept newest-first: an original recorded by a late pass
	/// can itself contain tokens minted by an earlier pass (a JSON attribute
	/// payload holding an already-masked comment), and those inner tokens
	/// only reappear in the text once the outer token has been restored.
	///
	/// A token the host formatter deleted has zero occurrences left; its
	/// original text is unrecoverable at this point, so it is dropped with a
	/// warning rather than failing the whole document.
	pub fn drain_and_restore(&mut self, text: &str) -> String {
		let mut output = text.to_owned();

		for (token, original) in self.entries.drain(..).rev() {
			if output.contains(&token) {
				output = output.replace(&token, &original);
			} else {
				warn!(
					%token,
					%original,
					"masked construct missing after host formatting; dropping it"
				);
			}
		}

		output
	}
}
