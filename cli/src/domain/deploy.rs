//! Git argv construction for the clone-then-push deploy flow.
//!
//! Pure functions only. The vectors built here are handed verbatim to a
//! `CommandRunner`; nothing in this module inspects exit codes.

use std::path::Path;

/// Executable used for every deploy step.
pub const GIT: &str = "git";

/// Branch pushed to the remote. Not configurable.
pub const PRIMARY_BRANCH: &str = "master";

/// Progress of a single deploy invocation.
///
/// `Done` means both steps were attempted, not that they succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStage {
    Start,
    Cloned,
    Pushed,
    Done,
}

impl DeployStage {
    /// The stage reached after the current step is attempted.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Start => Self::Cloned,
            Self::Cloned => Self::Pushed,
            Self::Pushed | Self::Done => Self::Done,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Cloned => "cloned",
            Self::Pushed => "pushed",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for DeployStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments (after `git`) for cloning `source` into `destination`.
#[must_use]
pub fn clone_args(source: &str, destination: &str) -> Vec<String> {
    vec![
        "clone".to_string(),
        source.to_string(),
        destination.to_string(),
    ]
}

/// Arguments (after `git`) for pushing the primary branch of `git_dir` to `remote`.
#[must_use]
pub fn push_args(remote: &str, git_dir: &str) -> Vec<String> {
    vec![
        format!("--git-dir={git_dir}"),
        "push".to_string(),
        remote.to_string(),
        PRIMARY_BRANCH.to_string(),
    ]
}

/// The `.git` metadata directory populated by cloning into `work_dir`.
#[must_use]
pub fn git_dir_for(work_dir: &Path) -> String {
    work_dir.join(".git").to_string_lossy().into_owned()
}
