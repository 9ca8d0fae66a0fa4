use crate::repo::GitRepo;
use crate::trailer;

/// Returns the hashes of every commit whose message contains the Cursor
/// trailer.
///
/// Walks the full commit listing in order and keeps the hashes whose
/// message matches [`trailer::contains_trailer`]. Both the listing and the
/// per-commit message lookups are read-only; any failure is propagated to
/// the caller.
pub fn commits_with_trailer<R: GitRepo>(repo: &R) -> Result<Vec<String>, String> {
    let hashes = repo.list_commits()?;

    let mut found = Vec::new();
    for hash in hashes {
        let message = repo.commit_message(&hash)?;
        if trailer::contains_trailer(&message) {
            found.push(hash);
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::commits_with_trailer;
    use crate::repo::fakes::FakeRepo;

    #[test]
    fn keeps_matching_commits_in_listing_order() {
        let repo = FakeRepo::with_commits(&[
            ("aaa", "Fix bug\n\nCo-authored-by: Cursor <bot@example.com>"),
            ("bbb", "Plain commit"),
            ("ccc", "Add feature\nCo-authored-by: Cursor <x>"),
        ]);

        let found = commits_with_trailer(&repo).expect("scan failed");
        assert_eq!(found, vec!["aaa", "ccc"]);
    }

    #[test]
    fn empty_history_scans_clean() {
        let repo = FakeRepo::with_commits(&[]);
        let found = commits_with_trailer(&repo).expect("scan failed");
        assert!(found.is_empty());
    }

    #[test]
    fn repository_without_matches_scans_clean() {
        let repo = FakeRepo::with_commits(&[("aaa", "One"), ("bbb", "Two\n\nDetails.")]);
        let found = commits_with_trailer(&repo).expect("scan failed");
        assert!(found.is_empty());
    }

    #[test]
    fn mid_line_mention_counts_as_match() {
        let repo = FakeRepo::with_commits(&[("aaa", "See Co-authored-by: Cursor in the body")]);
        let found = commits_with_trailer(&repo).expect("scan failed");
        assert_eq!(found, vec!["aaa"]);
    }

    #[test]
    fn listing_failure_propagates() {
        let mut repo = FakeRepo::with_commits(&[("aaa", "One")]);
        repo.list_error = Some("fatal: not a git repository".to_string());
        assert!(commits_with_trailer(&repo).is_err());
    }
}
