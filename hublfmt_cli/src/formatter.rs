use std::io::Write;
use std::process::Command;
use std::process::Stdio;

use hublfmt_core::AnyResult;
use hublfmt_core::HostFormatter;
use hublfmt_core::HostGrammar;

/// Runs the configured external formatter as a subprocess: the masked
/// document is written to its stdin and the formatted document read back
/// from its stdout. A non-zero exit status is a formatter failure.
pub struct CommandFormatter {
	command: String,
}

impl CommandFormatter {
	/// The command is split on whitespace; shell quoting is not interpreted.
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
		}
	}
}

impl HostFormatter for CommandFormatter {
	fn format(&self, document: &str, grammar: HostGrammar) -> AnyResult<String> {
		let mut parts = self.command.split_whitespace();
		let Some(program) = parts.next() else {
			return Err("empty formatter command".into());
		};

		let mut child = Command::new(program)
			.args(parts)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.map_err(|error| format!("failed to run `{}`: {error}", self.command))?;

		// The stdin handle must be dropped before waiting, or the child
		// never sees end-of-input.
		let mut stdin = child.stdin.take().ok_or("formatter stdin unavailable")?;
		stdin.write_all(document.as_bytes())?;
		drop(stdin);

		let output = child.wait_with_output()?;

		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr);
			return Err(format!(
				"`{}` exited with {} while formatting {}: {}",
				self.command,
				output.status,
				grammar.name(),
				stderr.trim()
			)
			.into());
		}

		Ok(String::from_utf8(output.stdout)?)
	}
}
