use crate::{
    banner::print_banner,
    git, prompt,
    repo::{GitRepo, SystemGit},
    rewrite::{self, RewriteOutcome},
    scan, trailer,
};

use console::style;
use std::{env, path::PathBuf};

/// Verifies git is available and returns a handle to the enclosing repository.
fn verify_environment() -> Result<SystemGit, ()> {
    // Ensure `git` is available.
    match which::which("git") {
        Ok(_) => {}
        Err(_) => {
            eprintln!("{}", style("Error: `git` not found in PATH.").red().bold());
            return Err(());
        }
    }

    // Resolve repository root.
    let root = match git::rev_parse("--show-toplevel") {
        Ok(s) => PathBuf::from(s),
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Error: not inside a git repo ({})", e))
                    .red()
                    .bold()
            );
            return Err(());
        }
    };

    // Resolve .git directory.
    let git_dir = match git::rev_parse("--git-dir") {
        Ok(s) => {
            let p = PathBuf::from(s);
            if p.is_absolute() {
                p
            } else {
                root.join(p)
            }
        }
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Error: unable to locate .git dir ({})", e))
                    .red()
                    .bold()
            );
            return Err(());
        }
    };

    Ok(SystemGit::new(root, git_dir))
}

/// Runs the scan, confirmation, rewrite and verification pipeline.
fn run<R: GitRepo, P: prompt::ConfirmPrompter>(repo: &R, prompter: &mut P) -> Result<i32, ()> {
    // Initial scan. This is the one step that aborts the run on failure.
    let found = match scan::commits_with_trailer(repo) {
        Ok(hashes) => hashes,
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("❌ Failed to scan commit history: {}", e))
                    .red()
                    .bold()
            );
            return Err(());
        }
    };

    println!("Tìm thấy {} commits có Co-authored-by", found.len());

    if found.is_empty() {
        println!(
            "{}",
            style("✅ Không có commits nào cần sửa").green().bold()
        );
        return Ok(0);
    }

    // Show banner with what is about to happen.
    print_banner(found.len());

    // Confirm before rewriting; the history change cannot be undone.
    match prompt::confirm_rewrite(prompter) {
        Ok(true) => {}
        Ok(false) => {
            println!(
                "{}",
                style("Đã hủy. Không có thay đổi nào.").yellow().bold()
            );
            return Ok(0);
        }
        Err(e) => {
            eprintln!("{}", style(format!("Prompt error: {}", e)).red().bold());
            return Err(());
        }
    }

    match rewrite::scrub(repo) {
        RewriteOutcome::Clean => {
            println!(
                "{}",
                style("✅ Đã xóa hoàn toàn Co-authored-by khỏi git history")
                    .green()
                    .bold()
            );
        }
        RewriteOutcome::Remaining(count) => {
            println!(
                "{}",
                style(format!("⚠️ Vẫn còn {} commits có Co-authored-by", count))
                    .yellow()
                    .bold()
            );
        }
    }

    Ok(0)
}

/// Prints usage information to stdout.
fn print_help() {
    println!(
        "\
git-coauthor-scrub {}

Remove \"Co-authored-by: Cursor\" trailers from every commit in a Git repository.

USAGE:
    git-coauthor-scrub

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information

DESCRIPTION:
    This tool scans every commit reachable from any ref, reports how many
    carry the \"Co-authored-by: Cursor\" trailer, and rewrites history with
    `git filter-branch` to delete those trailer lines. Backup refs created
    by the rewrite are pruned, the reflog is expired and unreachable
    objects are garbage collected, then history is scanned again to
    confirm nothing was left behind.",
        env!("CARGO_PKG_VERSION")
    );
}

/// Main CLI entry point for `git-coauthor-scrub`.
///
/// This function:
/// 1. Handles the special `--msg-filter` invocation.
/// 2. Verifies that `git` is installed and that the current directory is
///    inside a git repository.
/// 3. Scans all refs for commits carrying the trailer.
/// 4. Exits early when the history is already clean.
/// 5. Shows a banner and asks for confirmation.
/// 6. Rewrites history, cleans up, and re-scans to verify.
///
/// Returns `Ok(exit_code)` on success, or `Err(())` on error.
///
/// # Errors
///
/// Returns `Err(())` in the following cases:
/// - `git` is not found in `PATH`.
/// - The current directory is not inside a git repository.
/// - The initial history scan fails.
/// - The confirmation prompt fails.
///
/// # Exit Codes
///
/// * `0` – Successful execution, including the early exit on a clean
///   history, a declined confirmation, and the residual-commits warning.
/// * Non-zero – Any failure along the way.
pub fn entry() -> Result<i32, ()> {
    // Parse command-line arguments.
    let args: Vec<String> = env::args().collect();

    // Handle --help flag.
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(0);
    }

    // Handle --version flag.
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("git-coauthor-scrub {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    // Special case: act as the filter-branch message filter if invoked with
    // that flag.
    if args.len() >= 2 && args[1] == "--msg-filter" {
        match trailer::run() {
            Ok(_) => {
                return Ok(0);
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    style(format!("Message filter error: {}", e)).red().bold()
                );
                return Err(());
            }
        }
    }

    // Verify environment and get the repository handle.
    let repo = verify_environment()?;

    let mut confirm_prompter = prompt::DialoguerConfirmPrompter;
    run(&repo, &mut confirm_prompter)
}
