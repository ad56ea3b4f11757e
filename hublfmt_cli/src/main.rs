use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use hublfmt_cli::Commands;
use hublfmt_cli::HublFmtCli;
use hublfmt_cli::OutputFormat;
use hublfmt_cli::config::DEFAULT_FORMATTER;
use hublfmt_cli::config::HublFmtConfig;
use hublfmt_cli::formatter::CommandFormatter;
use hublfmt_core::AnyResult;
use hublfmt_core::TokenVault;
use hublfmt_core::format_document;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HublFmtCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Format {
			paths,
			write,
			check,
			diff,
			format,
		}) => run_format(&args, paths, *write, *check, *diff, *format),
		Some(Commands::Mask { path }) => run_mask(&args, path.as_deref()),
		None => {
			eprintln!("No subcommand specified. Run `hublfmt --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			// Try to render through miette for rich diagnostics with help
			// text and error codes.
			match e.downcast::<hublfmt_core::HublFmtError>() {
				Ok(core_err) => {
					let report: miette::Report = (*core_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

fn init_tracing(verbose: bool) {
	let default_filter = if verbose { "hublfmt_core=debug" } else { "warn" };
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn resolve_root(args: &HublFmtCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve the external formatter command: `--formatter` flag, then the
/// config file, then the default.
fn resolve_formatter(args: &HublFmtCli, root: &Path) -> AnyResult<String> {
	if let Some(command) = &args.formatter {
		return Ok(command.clone());
	}

	let config = HublFmtConfig::load(root)?;
	Ok(config
		.and_then(|config| config.formatter)
		.unwrap_or_else(|| DEFAULT_FORMATTER.to_owned()))
}

fn read_stdin() -> AnyResult<String> {
	let mut input = String::new();
	std::io::stdin().read_to_string(&mut input)?;
	Ok(input)
}

/// Run the format command. Returns `Ok(false)` when `--check` found files
/// that would change (mapped to exit code 1).
fn run_format(
	args: &HublFmtCli,
	paths: &[PathBuf],
	write: bool,
	check: bool,
	diff: bool,
	format: OutputFormat,
) -> AnyResult<bool> {
	let root = resolve_root(args);
	let formatter = CommandFormatter::new(resolve_formatter(args, &root)?);

	if paths.is_empty() {
		let input = read_stdin()?;
		let output = format_document(&input, &formatter)?;
		print!("{output}");
		return Ok(true);
	}

	let mut changed: Vec<String> = Vec::new();

	for path in paths {
		let current = std::fs::read_to_string(path)?;
		let formatted = format_document(&current, &formatter)?;
		let is_changed = formatted != current;

		if check {
			if is_changed {
				changed.push(path.display().to_string());
				if diff {
					eprintln!("{}:", path.display());
					print_diff(&current, &formatted);
				}
			}
		} else if write {
			if is_changed {
				std::fs::write(path, &formatted)?;
				if args.verbose {
					println!("formatted {}", path.display());
				}
			}
		} else {
			print!("{formatted}");
		}
	}

	if check {
		report_check(&changed, format);
		return Ok(changed.is_empty());
	}

	Ok(true)
}

fn report_check(changed: &[String], format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({ "ok": changed.is_empty(), "changed": changed });
			println!("{output}");
		}
		OutputFormat::Text => {
			if changed.is_empty() {
				println!("Check passed: all files are formatted.");
			} else {
				for path in changed {
					eprintln!("{} {path} is not formatted", colored!("warning:", yellow));
				}
				eprintln!(
					"{} file(s) would be reformatted. Run `hublfmt format --write` to fix.",
					changed.len()
				);
			}
		}
	}
}

fn run_mask(args: &HublFmtCli, path: Option<&Path>) -> AnyResult<bool> {
	let input = match path {
		Some(path) => std::fs::read_to_string(path)?,
		None => read_stdin()?,
	};

	let mut vault = TokenVault::new();
	let masked = hublfmt_core::mask(input.trim(), &mut vault);
	println!("{masked}");

	if args.verbose {
		for (token, original) in vault.entries() {
			eprintln!("{token} -> {original}");
		}
	}

	Ok(true)
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
