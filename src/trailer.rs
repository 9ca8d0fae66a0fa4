use std::io::{Read, Write};

/// The trailer text this tool removes from commit messages.
pub const CURSOR_TRAILER: &str = "Co-authored-by: Cursor";

/// Returns `true` if `message` contains the Cursor trailer text anywhere.
///
/// This is a plain substring test, so a line that merely mentions the
/// trailer in passing matches as well.
pub fn contains_trailer(message: &str) -> bool {
    message.contains(CURSOR_TRAILER)
}

/// Removes every line containing the Cursor trailer from `message`.
///
/// Kept lines stay in their original order, interior blank lines included;
/// the joined result is trimmed of surrounding whitespace. A message whose
/// every line matches becomes the empty string.
///
/// # Arguments
///
/// * `message` - The full commit message.
///
/// # Returns
///
/// * The cleaned message.
pub fn clean_message(message: &str) -> String {
    let kept: Vec<&str> = message
        .split('\n')
        .filter(|line| !line.contains(CURSOR_TRAILER))
        .collect();

    kept.join("\n").trim().to_string()
}

/// Reads a commit message from `input`, cleans it, and writes the result
/// followed by a newline to `output`.
///
/// This is the body of the `--msg-filter` mode: `git filter-branch` pipes
/// each original message through this process and takes its stdout as the
/// rewritten message.
///
/// # Returns
///
/// * `Ok(())` on success.
/// * `Err(String)` if reading or writing fails.
pub fn filter_message<R: Read, W: Write>(mut input: R, mut output: W) -> Result<(), String> {
    let mut body = String::new();
    match input.read_to_string(&mut body) {
        Ok(_) => {}
        Err(e) => return Err(format!("read failed: {}", e)),
    }

    let cleaned = clean_message(&body) + "\n";

    match output.write_all(cleaned.as_bytes()) {
        Ok(_) => Ok(()),
        Err(e) => Err(format!("write failed: {}", e)),
    }
}

/// Entry point for the `--msg-filter` invocation: filters stdin to stdout.
pub fn run() -> Result<(), String> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    filter_message(stdin.lock(), stdout.lock())
}
