use std::io::{self, BufRead, IsTerminal, Write};

/// Yes/no prompting on stderr with TTY detection.
///
/// When stdin is not a terminal nothing is read and the prompt's default
/// answer is returned, so piped or CI invocations never block.
#[derive(Debug, Clone, Copy)]
pub struct PromptEngine {
	interactive: bool,
}

impl PromptEngine {
	/// Create engine with automatic TTY detection.
	pub fn new() -> Self {
		Self {
			interactive: io::stdin().is_terminal(),
		}
	}

	/// Force non-interactive mode.
	pub fn non_interactive() -> Self {
		Self { interactive: false }
	}

	pub fn is_interactive(&self) -> bool {
		self.interactive
	}

	/// Ask a yes/no question. Returns `default` if non-interactive or on
	/// empty input.
	pub fn yes_no(&self, question: &str, default: bool) -> bool {
		if !self.interactive {
			return default;
		}

		let suffix = if default { "[Y/n]" } else { "[y/N]" };
		eprint!("{} {}: ", question, suffix);
		io::stderr().flush().ok();

		let mut input = String::new();
		if io::stdin().lock().read_line(&mut input).is_err() {
			return default;
		}

		parse_answer(&input, default)
	}
}

impl Default for PromptEngine {
	fn default() -> Self {
		Self::new()
	}
}

fn parse_answer(input: &str, default: bool) -> bool {
	let trimmed = input.trim().to_lowercase();
	if trimmed.is_empty() {
		return default;
	}
	trimmed.starts_with('y')
}
