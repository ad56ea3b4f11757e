use regex::Regex;

use crate::patterns;

/// Marker telling the HubL printer to start preserving whitespace.
pub const PRESERVE_OPEN: &str = "{% preserve %}";
/// Marker telling the HubL printer to stop preserving whitespace.
pub const PRESERVE_CLOSE: &str = "{% endpreserve %}";

/// Wrap every `<pre>` region with preservation markers: `{% preserve %}`
/// directly after each opening tag and `{% endpreserve %}` directly before
/// each closing tag. The HubL printer (an external collaborator) leaves the
/// whitespace of marked regions untouched.
///
/// Both insertions are guarded against a marker that is already adjacent,
/// so running this twice yields the same document as running it once.
pub fn insert_preservation_markers(input: &str) -> String {
	let opened = append_after_matches(input, &patterns::PRE_OPEN, PRESERVE_OPEN);
	prepend_before_matches(&opened, &patterns::PRE_CLOSE, PRESERVE_CLOSE)
}

fn append_after_matches(input: &str, pattern: &Regex, marker: &str) -> String {
	let mut output = String::with_capacity(input.len());
	let mut last = 0;

	for found in pattern.find_iter(input) {
		output.push_str(&input[last..found.end()]);
		if !input[found.end()..].starts_with(marker) {
			output.push_str(marker);
		}
		last = found.end();
	}

	output.push_str(&input[last..]);
	output
}

fn prepend_before_matches(input: &str, pattern: &Regex, marker: &str) -> String {
	let mut output = String::with_capacity(input.len());
	let mut last = 0;

	for found in pattern.find_iter(input) {
		output.push_str(&input[last..found.start()]);
		if !output.ends_with(marker) {
			output.push_str(marker);
		}
		output.push_str(found.as_str());
		last = found.end();
	}

	output.push_str(&input[last..]);
	output
}
