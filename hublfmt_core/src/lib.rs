//! `hublfmt_core` is the core library for the hublfmt formatter. HubL
//! templates interleave HTML with a templating sublanguage (`{% … %}` tag
//! blocks, `{{ … }}` expression blocks, `{# … #}` comments) that no HTML
//! formatter understands. This crate makes such documents formattable by a
//! plain HTML formatter: it masks every sublanguage construct behind a
//! stable placeholder token, and restores the original text byte for byte
//! once the formatter has run.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Mixed HubL/HTML document
//!   → Masking engine (seven ordered passes, one per construct category,
//!     registering token → original in a per-document TokenVault)
//!   → External HTML formatter (opaque synchronous collaborator)
//!   → Preservation marker inserter (wraps <pre> regions for the HubL printer)
//!   → Restoration engine (drains the vault, reversing every substitution)
//! ```
//!
//! Constructs are masked wherever they occur: attribute values, tag names,
//! `<style>`/`<script>` bodies, and JSON-bearing attribute regions. Token
//! shapes are chosen per position so the masked document stays valid for the
//! host formatter — CSS comments inside `<style>`, bare identifiers inside
//! `<script>`, HTML comments elsewhere — and are plain ASCII so no formatter
//! re-encodes them before restoration.
//!
//! ## Key Types
//!
//! - [`TokenVault`] — reversible token → original store, scoped to a single
//!   document round trip.
//! - [`HostFormatter`] — the seam for the external HTML formatter.
//! - [`format_document`] — the full mask → format → restore round trip.
//!
//! ## Quick Start
//!
//! ```rust
//! use hublfmt_core::AnyResult;
//! use hublfmt_core::HostFormatter;
//! use hublfmt_core::HostGrammar;
//! use hublfmt_core::format_document;
//!
//! struct PassthroughFormatter;
//!
//! impl HostFormatter for PassthroughFormatter {
//! 	fn format(&self, document: &str, _grammar: HostGrammar) -> AnyResult<String> {
//! 		Ok(document.to_owned())
//! 	}
//! }
//!
//! let output = format_document("<h1>{{ title }}</h1>", &PassthroughFormatter).unwrap();
//! assert_eq!(output, "<h1>{{ title }}</h1>");
//! ```

pub use engine::*;
pub use error::*;
pub use preserve::*;
pub use vault::*;

mod engine;
mod error;
pub(crate) mod passes;
pub(crate) mod patterns;
mod preserve;
mod vault;

#[cfg(test)]
mod __tests;
