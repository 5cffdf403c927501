/// Narrative collaborator notified when the vehicle crosses zone boundaries.
///
/// The simulation guarantees pairing: every `enter_zone` for one zone is
/// followed by an `exit_zone` before the next `enter_zone`.
pub trait Narrator {
    /// The vehicle entered the named zone.
    fn enter_zone(&mut self, name: &str);

    /// The vehicle left the current zone.
    fn exit_zone(&mut self);
}

/// Narrator that ignores every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNarrator;

impl Narrator for NullNarrator {
    fn enter_zone(&mut self, _name: &str) {}

    fn exit_zone(&mut self) {}
}

/// One recorded narrator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarratorCall {
    /// `enter_zone` with the zone name.
    Entered(String),
    /// `exit_zone`.
    Exited,
}

/// Narrator that records the call sequence it receives, for tests and
/// headless hosts.
#[derive(Debug, Clone, Default)]
pub struct RecordingNarrator {
    calls: Vec<NarratorCall>,
}

impl RecordingNarrator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> &[NarratorCall] {
        &self.calls
    }
}

impl Narrator for RecordingNarrator {
    fn enter_zone(&mut self, name: &str) {
        self.calls.push(NarratorCall::Entered(name.to_string()));
    }

    fn exit_zone(&mut self) {
        self.calls.push(NarratorCall::Exited);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_narrator_keeps_order() {
        let mut narrator = RecordingNarrator::new();
        narrator.enter_zone("echo fields");
        narrator.exit_zone();
        narrator.enter_zone("glass road");

        assert_eq!(
            narrator.calls(),
            &[
                NarratorCall::Entered("echo fields".into()),
                NarratorCall::Exited,
                NarratorCall::Entered("glass road".into()),
            ]
        );
    }
}
