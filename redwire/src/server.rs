//! Headless fixed-step world driver.

use std::sync::Arc;
use std::time::Instant;

use redwire_core::{Level, TickClock, VoxelStore, WorldConfig, demo};
use redwire_registry::TileRegistry;
use tokio::select;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// A world ticking on its own, flushing changed cells every frame.
pub struct RedwireServer {
    /// The cancellation token for graceful shutdown.
    pub cancel_token: CancellationToken,
    level: Level,
    clock: TickClock,
    max_ticks: Option<u64>,
    block_updates: u64,
}

impl RedwireServer {
    /// Creates the world described by `config`.
    pub fn new(config: &WorldConfig) -> Self {
        log::info!(
            "Creating a {}x{} world ({} ms ticks)",
            config.x_size,
            config.z_size,
            config.tick_interval_ms
        );
        let store = VoxelStore::new(config.x_size, config.z_size);
        let mut level = Level::new(store, Arc::new(TileRegistry::vanilla()))
            .with_settings(config.level_settings());
        if config.demo_scene {
            let written = demo::populate_showcase(&mut level);
            log::info!("Placed the showcase scene ({written} cells)");
        }

        Self {
            cancel_token: CancellationToken::new(),
            level,
            clock: TickClock::new(config.tick_interval()),
            max_ticks: config.max_ticks,
            block_updates: 0,
        }
    }

    /// The simulated world.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Block updates flushed so far.
    pub fn block_updates(&self) -> u64 {
        self.block_updates
    }

    /// Runs the world until cancelled or until the tick limit is reached.
    ///
    /// Returns the number of world ticks run.
    pub async fn run(&mut self) -> u64 {
        log::info!("Started ticking");
        let mut interval = time::interval(self.clock.interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            select! {
                () = self.cancel_token.cancelled() => {
                    break;
                }
                _ = interval.tick() => {}
            }
            let now = Instant::now();
            let due = self.clock.advance(now - last_frame);
            last_frame = now;
            if self.step(due) {
                log::info!("Reached the tick limit");
                break;
            }
        }
        self.level.tick_count()
    }

    fn limit_reached(&self) -> bool {
        self.max_ticks
            .is_some_and(|max| self.level.tick_count() >= max)
    }

    /// Runs up to `ticks` world ticks and flushes the cells they changed.
    /// Returns true once the tick limit is reached.
    fn step(&mut self, ticks: u32) -> bool {
        for _ in 0..ticks {
            if self.limit_reached() {
                break;
            }
            let fired = self.level.on_tick();
            if fired > 0 {
                log::trace!(
                    "Tick {}: {fired} scheduled update(s)",
                    self.level.tick_count()
                );
            }
        }

        let updates = self.level.take_block_updates();
        if !updates.is_empty() {
            log::debug!(
                "Tick {}: {} block update(s)",
                self.level.tick_count(),
                updates.len()
            );
            self.block_updates += updates.len() as u64;
        }
        self.limit_reached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_ticks: Option<u64>) -> WorldConfig {
        WorldConfig {
            x_size: 16,
            z_size: 16,
            tick_interval_ms: 1,
            max_ticks,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn test_step_stops_at_limit() {
        let mut server = RedwireServer::new(&config(Some(5)));
        assert!(!server.step(3));
        assert_eq!(server.level().tick_count(), 3);
        assert!(server.step(10));
        assert_eq!(server.level().tick_count(), 5);
    }

    #[test]
    fn test_showcase_stays_still() {
        // The showcase is written raw, so nothing is scheduled to react
        let mut server = RedwireServer::new(&config(None));
        let before = server.level().store().clone();
        server.step(10);
        assert_eq!(server.level().store(), &before);
        assert_eq!(server.block_updates(), 0);
    }

    #[tokio::test]
    async fn test_run_until_limit() {
        let mut server = RedwireServer::new(&config(Some(3)));
        assert_eq!(server.run().await, 3);
    }

    #[tokio::test]
    async fn test_stop() {
        let mut server = RedwireServer::new(&config(None));
        server.cancel_token.cancel();
        assert_eq!(server.run().await, 0);
    }
}
