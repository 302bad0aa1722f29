//! Scripted line source for tests.

use super::{LineSource, ReadEvent};
use crate::error::AppResult;
use std::collections::VecDeque;

/// Replays a fixed sequence of read events, then reports `Closed`.
#[derive(Debug, Default)]
pub struct MockLineSource {
    events: VecDeque<ReadEvent>,
}

impl MockLineSource {
    /// A source that yields each line once, in order.
    pub fn from_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            events: lines
                .into_iter()
                .map(|l| ReadEvent::Line(l.into()))
                .collect(),
        }
    }

    /// Queue an arbitrary event, e.g. a timeout between lines.
    pub fn push_event(&mut self, event: ReadEvent) {
        self.events.push_back(event);
    }
}

impl LineSource for MockLineSource {
    fn read_line(&mut self) -> AppResult<ReadEvent> {
        Ok(self.events.pop_front().unwrap_or(ReadEvent::Closed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_then_closes() {
        let mut source = MockLineSource::from_lines(["a", "b"]);
        source.push_event(ReadEvent::TimedOut);
        assert_eq!(source.read_line().unwrap(), ReadEvent::Line("a".into()));
        assert_eq!(source.read_line().unwrap(), ReadEvent::Line("b".into()));
        assert_eq!(source.read_line().unwrap(), ReadEvent::TimedOut);
        assert_eq!(source.read_line().unwrap(), ReadEvent::Closed);
        assert_eq!(source.read_line().unwrap(), ReadEvent::Closed);
    }
}
