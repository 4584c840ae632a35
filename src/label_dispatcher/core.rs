use crate::config::Config;
use std::time::{Duration, Instant};

/// Dwell tracking for the label currently on screen.
///
/// `Tracking` waits out the dwell threshold before the first dispatch.
/// `Rearmed` follows a dispatch and waits out the cooldown threshold before
/// the same label may dispatch again. Either way the candidate is always a
/// target label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    Tracking {
        label: String,
        start_time: Instant,
    },
    Rearmed {
        label: String,
        start_time: Instant,
    },
}

impl State {
    pub fn current_candidate(&self) -> Option<&str> {
        match self {
            State::Idle => None,
            State::Tracking { label, .. } | State::Rearmed { label, .. } => Some(label),
        }
    }

    pub fn candidate_start(&self) -> Option<Instant> {
        match self {
            State::Idle => None,
            State::Tracking { start_time, .. } | State::Rearmed { start_time, .. } => {
                Some(*start_time)
            }
        }
    }
}

/// Top classification for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub label: String,
    pub confidence: f32,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEvent {
    pub label: String,
    pub timestamp: Instant,
}

impl DispatchEvent {
    /// Serial payload: the label's UTF-8 bytes, no framing.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.label.as_bytes().to_vec()
    }
}

pub fn init() -> State {
    State::Idle
}

pub fn transition(
    config: &Config,
    state: State,
    observation: &Observation,
) -> (State, Option<DispatchEvent>) {
    if !config.is_target(&observation.label) {
        return (State::Idle, None);
    }

    match state {
        State::Tracking { label, start_time } if label == observation.label => {
            if held_longer_than(config.dwell_threshold, start_time, observation) {
                dispatch(observation)
            } else {
                (State::Tracking { label, start_time }, None)
            }
        }
        State::Rearmed { label, start_time } if label == observation.label => {
            if held_longer_than(config.cooldown_threshold, start_time, observation) {
                dispatch(observation)
            } else {
                (State::Rearmed { label, start_time }, None)
            }
        }
        _ => (
            State::Tracking {
                label: observation.label.clone(),
                start_time: observation.timestamp,
            },
            None,
        ),
    }
}

// A timestamp earlier than `start_time` counts as zero elapsed.
fn held_longer_than(threshold: Duration, start_time: Instant, observation: &Observation) -> bool {
    observation.timestamp.saturating_duration_since(start_time) > threshold
}

fn dispatch(observation: &Observation) -> (State, Option<DispatchEvent>) {
    (
        State::Rearmed {
            label: observation.label.clone(),
            start_time: observation.timestamp,
        },
        Some(DispatchEvent {
            label: observation.label.clone(),
            timestamp: observation.timestamp,
        }),
    )
}
