use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

pub mod config;
pub mod formatter;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Format HubL templates with any HTML formatter.",
	long_about = "hublfmt formats HubL templates (.hubl.html) that interleave HTML with HubL tag \
	              blocks, expressions, and comments.\n\nHTML formatters cannot parse HubL, so \
	              hublfmt masks every HubL construct behind a stable placeholder token, pipes the \
	              masked document through an external HTML formatter, wraps <pre> regions with \
	              {% preserve %} markers, and restores the original constructs byte for \
	              byte.\n\nQuick start:\n  hublfmt format page.hubl.html            Print the \
	              formatted document\n  hublfmt format --write src/*.hubl.html   Rewrite files in \
	              place\n  hublfmt format --check src/*.hubl.html   Verify formatting in CI\n  \
	              hublfmt mask page.hubl.html              Inspect the masked intermediate"
)]
pub struct HublFmtCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory (where hublfmt.toml is resolved).
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// External HTML formatter command, fed the masked document on stdin and
	/// read back from stdout. Overrides the `formatter` key in hublfmt.toml.
	/// The command is split on whitespace; shell quoting is not interpreted.
	#[arg(long, global = true)]
	pub formatter: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Format template files through the masking pipeline.
	///
	/// Each file (or stdin when no paths are given) is masked, handed to the
	/// external HTML formatter, and restored. The result goes to stdout by
	/// default; use `--write` to rewrite files in place or `--check` to
	/// verify formatting without modifying anything.
	///
	/// The whole operation is atomic per document: if the external formatter
	/// fails, nothing is written and the error propagates.
	Format {
		/// Files to format. Reads stdin when empty.
		paths: Vec<PathBuf>,

		/// Rewrite files in place instead of printing to stdout.
		#[arg(long, default_value_t = false)]
		write: bool,

		/// Exit with a non-zero status when any file would change, without
		/// writing. Ideal for CI pipelines.
		#[arg(long, default_value_t = false)]
		check: bool,

		/// Show a unified diff for each file that would change. Only
		/// meaningful together with `--check`.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for --check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the masked intermediate document.
	///
	/// Runs only the masking passes and prints the text that would be handed
	/// to the external HTML formatter. With `--verbose`, the registered
	/// token-to-original mapping is listed on stderr. Debugging aid for
	/// masking issues.
	Mask {
		/// File to mask. Reads stdin when omitted.
		path: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption: `{"ok": bool, "changed":
	/// [paths]}`.
	Json,
}
