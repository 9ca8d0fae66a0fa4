use std::path::Path;
use std::process::{Command, Stdio};

/// Builds the command string handed to `git filter-branch --msg-filter`.
///
/// Wraps `exe_path` in quotes if it contains spaces, and appends the
/// `--msg-filter` argument so that git re-invokes this executable as the
/// message filter.
///
/// # Examples
///
/// ```ignore
/// let path = "/usr/local/bin/git-coauthor-scrub";
/// assert_eq!(
///     build_msg_filter_command(path),
///     "/usr/local/bin/git-coauthor-scrub --msg-filter"
/// );
///
/// let path_with_space = "/path/with space/git-coauthor-scrub";
/// assert_eq!(
///     build_msg_filter_command(path_with_space),
///     "\"/path/with space/git-coauthor-scrub\" --msg-filter"
/// );
/// ```
pub(crate) fn build_msg_filter_command(exe_path: &str) -> String {
    let quoted = if exe_path.contains(' ') {
        format!("\"{}\"", exe_path)
    } else {
        exe_path.to_string()
    };

    format!("{quoted} --msg-filter")
}

/// Runs a Git (or other) command and returns only its exit status.
///
/// Executes the provided [`std::process::Command`] and:
/// - Returns `Ok(())` if the command exits successfully (status code `0`).
/// - Returns `Err("non-zero exit")` if the command exits with a non-zero status.
/// - Returns `Err` containing the I/O error message if the process fails to start.
///
/// # Parameters
///
/// * `cmd` — A fully configured [`std::process::Command`] to run.
fn run_status(mut cmd: Command) -> Result<(), String> {
    let status_res = cmd.status();

    match status_res {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(String::from("non-zero exit"))
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs a command and returns its trimmed standard output on success,
/// or its standard error as an `Err` on failure.
///
/// Executes the provided [`std::process::Command`] and:
/// - If the command exits with a zero status, its `stdout` is captured,
///   converted to UTF-8 (lossy), trimmed, and returned as `Ok(String)`.
/// - If the command exits non-zero, its `stderr` is captured,
///   converted to UTF-8 (lossy), trimmed, and returned as `Err(String)`.
/// - If the process fails to spawn, the I/O error message is returned as
///   `Err(String)`.
///
/// # Parameters
///
/// * `cmd` — A fully configured [`std::process::Command`] ready to execute.
fn run_output(mut cmd: Command) -> Result<String, String> {
    let out_res = cmd.output();
    match out_res {
        Ok(out) => {
            if out.status.success() {
                Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
            } else {
                Err(String::from_utf8_lossy(&out.stderr).trim().to_string())
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs `git rev-parse <flag>` and returns its output as a trimmed string.
///
/// This is a convenience wrapper around `git rev-parse` that captures
/// `stdout` or returns `stderr` as an error. It runs in the current working
/// directory and is the one ambient query in this crate: the CLI uses it to
/// resolve the repository root and `.git` directory before handing an
/// explicit repository handle to everything else.
///
/// # Parameters
///
/// * `flag` — The argument to pass to `git rev-parse`, e.g. `--show-toplevel`
///   or `--git-dir`.
///
/// # Examples
///
/// ```ignore
/// // Ignored because it depends on being inside a Git repository.
/// match git::rev_parse("--show-toplevel") {
///     Ok(path) => println!("Repository root: {}", path),
///     Err(err) => eprintln!("Git error: {}", err),
/// }
/// ```
pub fn rev_parse(flag: &str) -> Result<String, String> {
    let mut cmd = Command::new("git");
    cmd.arg("rev-parse").arg(flag);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
}

/// Returns every commit hash reachable from any ref, newest first.
///
/// Runs `git log --all --format=%H` in `root` and splits the output into
/// one hash per line. A repository without commits yields an empty vector.
///
/// # Parameters
///
/// * `root` — Path to the repository's working tree.
///
/// # Returns
///
/// * `Ok(Vec<String>)` with the hashes in `git log` output order.
/// * `Err(String)` with git's stderr or an I/O error message.
pub fn log_all_hashes(root: &Path) -> Result<Vec<String>, String> {
    let mut cmd = Command::new("git");
    cmd.arg("log").arg("--all").arg("--format=%H");
    cmd.current_dir(root);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let out = run_output(cmd)?;
    Ok(out.lines().map(|l| l.to_string()).collect())
}

/// Returns the full message body of a single commit.
///
/// Runs `git log -1 --format=%B <hash>` in `root`. The message comes back
/// trimmed of surrounding whitespace.
///
/// # Parameters
///
/// * `root` — Path to the repository's working tree.
/// * `hash` — The commit to look up.
///
/// # Returns
///
/// * `Ok(String)` with the commit message.
/// * `Err(String)` if the hash cannot be resolved or git fails.
pub fn commit_message(root: &Path, hash: &str) -> Result<String, String> {
    let mut cmd = Command::new("git");
    cmd.arg("log").arg("-1").arg("--format=%B").arg(hash);
    cmd.current_dir(root);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
}

/// Rewrites every commit message across all refs through a filter command.
///
/// Internally, this executes:
///
/// ```text
/// git filter-branch -f --msg-filter <filter_cmd> -- --all
/// ```
///
/// `filter_cmd` is run by git once per commit with the original message on
/// stdin; its stdout becomes the new message. The `-f` flag overwrites any
/// backup refs a previous run left behind.
///
/// # Parameters
///
/// * `root` — Path to the repository's working tree.
/// * `filter_cmd` — Shell command to pipe each message through, typically
///   built with [`build_msg_filter_command`].
///
/// # Returns
///
/// * `Ok(())` if the rewrite ran successfully.
/// * `Err(String)` if git could not be started or exited non-zero.
///
/// # Notes
///
/// * This rewrites history across every ref; there is no undo once the
///   backup refs and reflog are cleaned up afterwards.
/// * The process inherits standard output/error so git's per-commit
///   progress stays visible.
pub fn filter_branch_messages(root: &Path, filter_cmd: &str) -> Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.arg("filter-branch")
        .arg("-f")
        .arg("--msg-filter")
        .arg(filter_cmd)
        .arg("--")
        .arg("--all");
    cmd.current_dir(root);
    // Without this, git prints a deprecation warning and sleeps before starting.
    cmd.env("FILTER_BRANCH_SQUELCH_WARNING", "1");
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    run_status(cmd).map_err(|_| String::from("`git filter-branch` exited with non-zero status"))
}

/// Expires every reflog entry immediately.
///
/// Runs `git reflog expire --expire=now --all` in `root`, which drops the
/// recovery records pointing at pre-rewrite commits.
pub fn reflog_expire_all(root: &Path) -> Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.arg("reflog").arg("expire").arg("--expire=now").arg("--all");
    cmd.current_dir(root);
    run_status(cmd)
}

/// Garbage-collects objects no longer reachable from any ref.
///
/// Runs `git gc --prune=now --aggressive` in `root`. Progress output is
/// inherited so the user can see the collection run.
pub fn garbage_collect(root: &Path) -> Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.arg("gc").arg("--prune=now").arg("--aggressive");
    cmd.current_dir(root);
    run_status(cmd)
}
