//! Overwrite policy for files that already exist

use std::path::Path;

/// Answer to an overwrite prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Overwrite this file
    Yes,
    /// Skip this file
    No,
    /// Overwrite this and every later file without asking
    YesToAll,
    /// Skip this and every later existing file without asking
    NoToAll,
    /// Stop the whole generation run now
    Cancel,
}

/// Decides what happens to an existing file. Consulted once per such file.
pub trait OverwritePolicy {
    fn confirm(&mut self, prompt: &str) -> Answer;
}

impl<F> OverwritePolicy for F
where
    F: FnMut(&str) -> Answer,
{
    fn confirm(&mut self, prompt: &str) -> Answer {
        self(prompt)
    }
}

/// Non-interactive policy that always overwrites
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl OverwritePolicy for AlwaysOverwrite {
    fn confirm(&mut self, _prompt: &str) -> Answer {
        Answer::YesToAll
    }
}

/// Non-interactive policy that never touches existing files
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOverwrite;

impl OverwritePolicy for NeverOverwrite {
    fn confirm(&mut self, _prompt: &str) -> Answer {
        Answer::NoToAll
    }
}

/// Batch-scoped overwrite state, threaded through a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteState {
    #[default]
    AskEach,
    ForceYes,
    ForceNo,
    /// Terminal: no further file may be touched
    Aborted,
}

/// What to do with one existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Overwrite,
    Skip,
    Abort,
}

impl OverwriteState {
    /// Apply an answer, returning the new state and the decision for the current file
    pub fn apply(self, answer: Answer) -> (OverwriteState, Decision) {
        match answer {
            Answer::Yes => (self, Decision::Overwrite),
            Answer::No => (self, Decision::Skip),
            Answer::YesToAll => (OverwriteState::ForceYes, Decision::Overwrite),
            Answer::NoToAll => (OverwriteState::ForceNo, Decision::Skip),
            Answer::Cancel => (OverwriteState::Aborted, Decision::Abort),
        }
    }

    /// Decide for an existing file, asking the policy only in `AskEach`
    pub fn decide(
        self,
        path: &Path,
        policy: &mut dyn OverwritePolicy,
    ) -> (OverwriteState, Decision) {
        match self {
            OverwriteState::ForceYes => (self, Decision::Overwrite),
            OverwriteState::ForceNo => (self, Decision::Skip),
            OverwriteState::Aborted => (self, Decision::Abort),
            OverwriteState::AskEach => {
                let prompt = format!("File {} already exists. Overwrite?", path.display());
                self.apply(policy.confirm(&prompt))
            }
        }
    }
}
