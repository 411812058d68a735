use smart_leds::RGB8;

use crate::color::OFF;
use crate::strip::PixelSink;

/// Error returned by a scripted [`MockSink`] commit failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitFailed;

/// In-memory pixel sink for tests and host development.
///
/// The staged buffer and the last committed frame are kept separate so a
/// test can tell written pixels from visible ones, and every commit is
/// counted. A sink built with `failing_after` starts returning errors
/// once the scripted number of commits has succeeded, which gives tests
/// a way to drive an otherwise endless meter loop to termination.
pub struct MockSink<const N: usize> {
    staged: [RGB8; N],
    shown: [RGB8; N],
    commits: usize,
    fail_after: Option<usize>,
}

impl<const N: usize> MockSink<N> {
    pub fn new() -> Self {
        Self {
            staged: [OFF; N],
            shown: [OFF; N],
            commits: 0,
            fail_after: None,
        }
    }

    /// Sink whose `show` fails after `commits` successful commits.
    pub fn failing_after(commits: usize) -> Self {
        Self {
            fail_after: Some(commits),
            ..Self::new()
        }
    }

    /// Colors staged since the last `fill` or `set`, committed or not.
    pub fn staged(&self) -> &[RGB8; N] {
        &self.staged
    }

    /// The frame made visible by the last successful `show`.
    pub fn shown(&self) -> &[RGB8; N] {
        &self.shown
    }

    /// Number of successful commits so far.
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl<const N: usize> Default for MockSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PixelSink for MockSink<N> {
    type Error = CommitFailed;

    fn len(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, color: RGB8) {
        self.staged[index] = color;
    }

    fn fill(&mut self, color: RGB8) {
        self.staged = [color; N];
    }

    fn show(&mut self) -> Result<(), CommitFailed> {
        if let Some(limit) = self.fail_after {
            if self.commits >= limit {
                return Err(CommitFailed);
            }
        }
        self.shown = self.staged;
        self.commits += 1;
        Ok(())
    }
}
