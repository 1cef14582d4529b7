use serde::{Deserialize, Serialize};

/// Where a system error or log entry was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
	pub method: Option<String>,
	pub file: String,
	pub line: u32,
}

impl SourceLocation {
	pub fn new(method: Option<String>, file: impl Into<String>, line: u32) -> Self {
		Self {
			method,
			file: file.into(),
			line,
		}
	}

	/// File and line of whoever called the `#[track_caller]` chain.
	/// The method name is unknown here; the `caller!` macro fills it in.
	#[track_caller]
	pub fn caller() -> Self {
		let location = std::panic::Location::caller();
		Self::new(None, location.file(), location.line())
	}

	pub fn with_method(mut self, method: impl Into<String>) -> Self {
		self.method = Some(method.into());
		self
	}
}

impl std::fmt::Display for SourceLocation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[Method: {}; Line: {}; File: {}]", self.method.as_deref().unwrap_or_default(), self.line, self.file)
	}
}

/// Detached snapshot of an error, safe to keep after the error is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionSummary {
	pub message: String,
	pub stack_trace: String,
	pub inner: Option<String>,
}

impl ExceptionSummary {
	pub fn capture(error: &(dyn std::error::Error + 'static)) -> Self {
		Self {
			message: error.to_string(),
			stack_trace: format!("{:?}", backtrace::Backtrace::new()),
			inner: error.source().map(|inner| inner.to_string()),
		}
	}
}

/// Name of the closest frame outside this crate and the runtime, with its file and line.
#[inline]
pub fn get_caller_data() -> Option<String> {
	static BLACKLIST: [&str; 8] = ["backtrace::", "courier_core::", "courier::", "tokio::", "core::", "std::", "test::", "futures::"];

	let stack_trace = backtrace::Backtrace::new();
	let caller = stack_trace
		.frames()
		.iter()
		.filter_map(|frame| frame.symbols().first())
		.find(|symbol| {
			symbol
				.name()
				.and_then(|name| name.as_str())
				.map(|name| !BLACKLIST.iter().any(|prefix| name.starts_with(prefix)))
				.unwrap_or(false)
		})?;

	let mut result = caller.name().and_then(|name| name.as_str()).map(str::to_owned)?;
	if let Some(file_path) = caller.filename().and_then(|file| file.to_str()) {
		result.push(' ');
		result.push_str(file_path);
	}
	if let Some(line_no) = caller.lineno() {
		result.push(':');
		result.push_str(&line_no.to_string());
	}
	Some(result)
}

#[macro_export]
macro_rules! backtrace_error {
    ($($arg:tt)*) => {
        match $crate::backtrace::get_caller_data() {
            Some(caller) => $crate::prelude::tracing::error!(?caller, $($arg)*),
            None => $crate::prelude::tracing::error!($($arg)*),
        }
    };
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug)]
	struct Outer(std::io::Error);
	impl std::fmt::Display for Outer {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			write!(f, "outer failed")
		}
	}
	impl std::error::Error for Outer {
		fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
			Some(&self.0)
		}
	}

	#[test]
	fn test_caller_points_here() {
		let location = SourceLocation::caller();
		assert!(location.file.ends_with("backtrace.rs"));
		assert!(location.method.is_none());
	}

	#[test]
	fn test_summary_keeps_inner_message() {
		let error = Outer(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
		let summary = ExceptionSummary::capture(&error);
		assert_eq!(summary.message, "outer failed");
		assert_eq!(summary.inner.as_deref(), Some("disk gone"));
		assert!(!summary.stack_trace.is_empty());
	}
}
