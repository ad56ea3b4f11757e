use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HublFmtError {
	#[error(transparent)]
	#[diagnostic(code(hublfmt::io_error))]
	Io(#[from] std::io::Error),

	#[error("external html formatter failed: {0}")]
	#[diagnostic(
		code(hublfmt::host_formatter),
		help("check that the formatter command is installed and accepts a document on stdin")
	)]
	HostFormatter(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(hublfmt::config_parse),
		help("check that hublfmt.toml is valid TOML with a `formatter` key")
	)]
	ConfigParse(String),
}

pub type HublFmtResult<T> = Result<T, HublFmtError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
