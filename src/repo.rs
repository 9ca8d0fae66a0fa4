use std::fs;
use std::path::PathBuf;

use crate::git;

/// The repository capabilities the scrub sequence relies on.
///
/// [`SystemGit`] implements this by driving the system `git` binary.
/// Keeping the surface this narrow lets tests substitute an in-memory
/// fake and exercise the whole pipeline without a repository on disk.
pub trait GitRepo {
    /// Every commit hash reachable from any ref, in enumeration order.
    fn list_commits(&self) -> Result<Vec<String>, String>;

    /// The full message body of one commit.
    fn commit_message(&self, hash: &str) -> Result<String, String>;

    /// Rewrites every commit message across all refs, dropping trailer lines.
    fn rewrite_messages(&self) -> Result<(), String>;

    /// Deletes the backup refs a rewrite leaves behind.
    fn prune_backup_refs(&self) -> Result<(), String>;

    /// Expires every reflog entry immediately.
    fn expire_reflog(&self) -> Result<(), String>;

    /// Reclaims objects no longer reachable from any ref.
    fn collect_garbage(&self) -> Result<(), String>;
}

/// A repository on disk, accessed through the `git` binary.
pub struct SystemGit {
    root: PathBuf,
    git_dir: PathBuf,
}

impl SystemGit {
    /// Creates a handle for the repository whose working tree is `root` and
    /// whose git directory is `git_dir`.
    pub fn new(root: PathBuf, git_dir: PathBuf) -> Self {
        SystemGit { root, git_dir }
    }
}

impl GitRepo for SystemGit {
    fn list_commits(&self) -> Result<Vec<String>, String> {
        git::log_all_hashes(&self.root)
    }

    fn commit_message(&self, hash: &str) -> Result<String, String> {
        git::commit_message(&self.root, hash)
    }

    /// Runs `git filter-branch`, re-invoking this executable as the
    /// message filter so every commit message is piped through
    /// [`crate::trailer::clean_message`].
    fn rewrite_messages(&self) -> Result<(), String> {
        let exe_res = std::env::current_exe();
        let exe = match exe_res {
            Ok(path) => path,
            Err(e) => return Err(format!("cannot locate current executable: {}", e)),
        };

        let filter = git::build_msg_filter_command(&exe.to_string_lossy());
        git::filter_branch_messages(&self.root, &filter)
    }

    /// Removes `<git-dir>/refs/original/`, where filter-branch keeps its
    /// pre-rewrite copies of every ref.
    fn prune_backup_refs(&self) -> Result<(), String> {
        let backup = self.git_dir.join("refs").join("original");
        if !backup.exists() {
            return Ok(());
        }

        match fs::remove_dir_all(&backup) {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("{}", e)),
        }
    }

    fn expire_reflog(&self) -> Result<(), String> {
        git::reflog_expire_all(&self.root)
    }

    fn collect_garbage(&self) -> Result<(), String> {
        git::garbage_collect(&self.root)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::GitRepo;
    use crate::trailer;
    use std::cell::RefCell;

    /// In-memory repository double that records which capabilities ran.
    ///
    /// A successful simulated rewrite applies the real message cleaner to
    /// every stored commit, except those listed in `skip_on_rewrite`, which
    /// models a rewrite that misses some commits.
    pub(crate) struct FakeRepo {
        pub(crate) commits: RefCell<Vec<(String, String)>>,
        pub(crate) skip_on_rewrite: Vec<String>,
        pub(crate) list_error: Option<String>,
        pub(crate) rewrite_error: Option<String>,
        pub(crate) calls: RefCell<Vec<&'static str>>,
    }

    impl FakeRepo {
        pub(crate) fn with_commits(entries: &[(&str, &str)]) -> Self {
            let commits = entries
                .iter()
                .map(|(hash, msg)| (hash.to_string(), msg.to_string()))
                .collect();
            FakeRepo {
                commits: RefCell::new(commits),
                skip_on_rewrite: Vec::new(),
                list_error: None,
                rewrite_error: None,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn called(&self, name: &str) -> bool {
            self.calls.borrow().iter().any(|c| *c == name)
        }
    }

    impl GitRepo for FakeRepo {
        fn list_commits(&self) -> Result<Vec<String>, String> {
            self.calls.borrow_mut().push("list_commits");
            match &self.list_error {
                Some(e) => Err(e.clone()),
                None => Ok(self
                    .commits
                    .borrow()
                    .iter()
                    .map(|(hash, _)| hash.clone())
                    .collect()),
            }
        }

        fn commit_message(&self, hash: &str) -> Result<String, String> {
            let commits = self.commits.borrow();
            match commits.iter().find(|(h, _)| h == hash) {
                Some((_, msg)) => Ok(msg.clone()),
                None => Err(format!("unknown commit {}", hash)),
            }
        }

        fn rewrite_messages(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("rewrite_messages");
            if let Some(e) = &self.rewrite_error {
                return Err(e.clone());
            }

            let mut commits = self.commits.borrow_mut();
            for (hash, msg) in commits.iter_mut() {
                if self.skip_on_rewrite.contains(hash) {
                    continue;
                }
                *msg = trailer::clean_message(msg);
            }
            Ok(())
        }

        fn prune_backup_refs(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("prune_backup_refs");
            Ok(())
        }

        fn expire_reflog(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("expire_reflog");
            Ok(())
        }

        fn collect_garbage(&self) -> Result<(), String> {
            self.calls.borrow_mut().push("collect_garbage");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GitRepo, SystemGit};
    use std::fs;

    #[test]
    fn prune_removes_backup_refs_dir() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let git_dir = dir.path().join(".git");
        let backup = git_dir.join("refs").join("original");
        fs::create_dir_all(backup.join("refs/heads")).expect("failed to create backup refs");
        fs::write(backup.join("refs/heads/main"), "0123abcd\n").expect("failed to write ref");

        let repo = SystemGit::new(dir.path().to_path_buf(), git_dir.clone());
        repo.prune_backup_refs().expect("prune failed");

        assert!(!backup.exists());
        assert!(git_dir.exists());
    }

    #[test]
    fn prune_is_a_noop_without_backup_refs() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let git_dir = dir.path().join(".git");
        fs::create_dir_all(&git_dir).expect("failed to create git dir");

        let repo = SystemGit::new(dir.path().to_path_buf(), git_dir);
        assert!(repo.prune_backup_refs().is_ok());
    }
}
