use serde::{Deserialize, Serialize};

/// Handle for one reveal cascade or end-game sequence.
///
/// Only the most recently started episode is live, every step scheduled under an older one is dropped before it can
/// touch the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode(u32);

/// Hands out episodes and remembers which one is live.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episodes {
    current: u32,
    live: bool,
}

impl Episodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new episode, invalidating the previous one.
    pub fn begin(&mut self) -> Episode {
        self.current = self.current.wrapping_add(1);
        self.live = true;
        log::trace!("episode {} started", self.current);
        Episode(self.current)
    }

    /// Invalidates the live episode without starting another.
    pub fn cancel(&mut self) {
        if self.live {
            log::trace!("episode {} cancelled", self.current);
        }
        self.live = false;
    }

    pub fn is_live(&self, episode: Episode) -> bool {
        self.live && self.current == episode.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_episode_invalidates_older() {
        let mut episodes = Episodes::new();
        let first = episodes.begin();
        assert!(episodes.is_live(first));

        let second = episodes.begin();
        assert!(!episodes.is_live(first));
        assert!(episodes.is_live(second));
    }

    #[test]
    fn cancel_invalidates_current() {
        let mut episodes = Episodes::new();
        let episode = episodes.begin();

        episodes.cancel();

        assert!(!episodes.is_live(episode));
        let next = episodes.begin();
        assert!(episodes.is_live(next));
    }
}
