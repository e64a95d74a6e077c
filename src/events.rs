use std::collections::VecDeque;

use glam::IVec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::grid::BoxId;
use crate::lifecycle::{LevelStats, LifecycleState};
use crate::movement::Direction;

const MAX_EVENTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadReason {
    Initial,
    Advance,
    Restart,
}

/// Notifications for the presentation layer. The core never reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The looping background track should be playing. Sent once.
    BackgroundMusic,
    LevelLoaded {
        index: usize,
        reason: LoadReason,
    },
    StateChanged {
        from: LifecycleState,
        to: LifecycleState,
    },
    PlayerMoved {
        from: IVec2,
        to: IVec2,
        facing: Direction,
    },
    BoxPushed {
        id: BoxId,
        from: IVec2,
        to: IVec2,
    },
    LevelCompleted {
        index: usize,
        stats: LevelStats,
    },
}

/// Bounded FIFO of pending events. The oldest entries are dropped when the
/// consumer falls behind.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
    dropped: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.pending.push_back(event);
        if self.pending.len() > MAX_EVENTS {
            self.pending.pop_front();
            self.dropped = self.dropped.saturating_add(1);
            if self.dropped.is_power_of_two() {
                warn!("event queue overflow; {} events dropped", self.dropped);
            }
        }
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_events_in_order() {
        let mut queue = EventQueue::new();
        queue.emit(GameEvent::BackgroundMusic);
        queue.emit(GameEvent::LevelLoaded {
            index: 0,
            reason: LoadReason::Initial,
        });
        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::BackgroundMusic);
        assert!(queue.is_empty());
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut queue = EventQueue::new();
        for index in 0..(MAX_EVENTS + 10) {
            queue.emit(GameEvent::LevelLoaded {
                index,
                reason: LoadReason::Restart,
            });
        }
        assert_eq!(queue.len(), MAX_EVENTS);
        assert_eq!(queue.dropped(), 10);
        let first = queue.drain().remove(0);
        assert_eq!(
            first,
            GameEvent::LevelLoaded {
                index: 10,
                reason: LoadReason::Restart
            }
        );
    }
}
