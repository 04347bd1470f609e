//! The world: block storage plus the reactions that keep circuits consistent.

use std::cell::Cell;
use std::sync::Arc;

use redwire_registry::{Support, TileRegistry, tile_ids};
use redwire_utils::{BlockPos, Direction, UpdateFlags};

use crate::listener::{BlockChangeListener, ChangeLog};
use crate::redstone::{PendingUpdates, torch_attachment};
use crate::storage::VoxelStore;
use crate::ticks::{MAX_SCHEDULED_PER_TICK, ScheduledUpdateQueue, TORCH_UPDATE_DELAY};

/// Tunables of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSettings {
    /// Ticks a redstone torch waits before re-evaluating its input.
    pub torch_delay: u64,
    /// Scheduled ticks processed per world tick, at most
    /// [`MAX_SCHEDULED_PER_TICK`].
    pub tick_budget: usize,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            torch_delay: TORCH_UPDATE_DELAY,
            tick_budget: MAX_SCHEDULED_PER_TICK,
        }
    }
}

/// A voxel world with a running redstone simulation.
///
/// Every mutation goes through [`Level::set_block`] (or its shorthands
/// [`Level::place`] and [`Level::remove`]), which writes the cell, reports it
/// to the listener and then lets the surrounding blocks react. Reactions run
/// synchronously to completion; only torch re-evaluation is deferred to the
/// scheduled tick queue, drained by [`Level::on_tick`].
pub struct Level<L: BlockChangeListener = ChangeLog> {
    pub(crate) store: VoxelStore,
    pub(crate) tiles: Arc<TileRegistry>,
    pub(crate) ticks: ScheduledUpdateQueue,
    /// Cleared while a wire computes its own strength, so wire cannot power
    /// itself through a neighbour.
    pub(crate) wires_provide_power: Cell<bool>,
    pub(crate) pending: PendingUpdates,
    pub(crate) listener: L,
    tick_count: u64,
    settings: LevelSettings,
}

impl Level<ChangeLog> {
    /// Creates a world that records changed cells in a [`ChangeLog`].
    #[must_use]
    pub fn new(store: VoxelStore, tiles: Arc<TileRegistry>) -> Self {
        Self::with_listener(store, tiles, ChangeLog::new())
    }
}

impl<L: BlockChangeListener> Level<L> {
    /// Creates a world reporting changed cells to `listener`.
    pub fn with_listener(store: VoxelStore, tiles: Arc<TileRegistry>, listener: L) -> Self {
        Self {
            store,
            tiles,
            ticks: ScheduledUpdateQueue::new(),
            wires_provide_power: Cell::new(true),
            pending: PendingUpdates::default(),
            listener,
            tick_count: 0,
            settings: LevelSettings::default(),
        }
    }

    /// Replaces the simulation tunables. The tick budget is clamped to
    /// [`MAX_SCHEDULED_PER_TICK`].
    #[must_use]
    pub fn with_settings(mut self, settings: LevelSettings) -> Self {
        self.settings = LevelSettings {
            torch_delay: settings.torch_delay,
            tick_budget: settings.tick_budget.min(MAX_SCHEDULED_PER_TICK),
        };
        self
    }

    /// The block storage.
    #[must_use]
    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    /// The tile registry this world was built with.
    #[must_use]
    pub fn tiles(&self) -> &TileRegistry {
        &self.tiles
    }

    /// Pending scheduled ticks.
    #[must_use]
    pub fn scheduled(&self) -> &ScheduledUpdateQueue {
        &self.ticks
    }

    /// The change listener.
    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// The change listener, mutably.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Number of world ticks run so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The active simulation tunables.
    #[must_use]
    pub fn settings(&self) -> LevelSettings {
        self.settings
    }

    /// Block id at a position, air outside the world.
    #[must_use]
    #[inline]
    pub fn get_id(&self, pos: BlockPos) -> u8 {
        self.store.get_id(pos)
    }

    /// Metadata at a position, 0 outside the world.
    #[must_use]
    #[inline]
    pub fn get_meta(&self, pos: BlockPos) -> u8 {
        self.store.get_meta(pos)
    }

    /// Returns true if the cell holds a full opaque cube.
    #[must_use]
    #[inline]
    pub fn is_opaque(&self, pos: BlockPos) -> bool {
        self.tiles.is_opaque(self.store.get_id(pos))
    }

    /// Writes a cell and runs the side effects selected by `flags`.
    ///
    /// With [`UpdateFlags::MARK_DIRTY`] the cell is reported to the listener.
    /// With [`UpdateFlags::NOTIFY_NEIGHBORS`] the previous block reacts to its
    /// removal and the new block to its placement.
    ///
    /// Returns false, without doing anything, if `pos` lies outside the world.
    pub fn set_block(&mut self, pos: BlockPos, id: u8, meta: u8, flags: UpdateFlags) -> bool {
        if !self.store.contains(pos) {
            return false;
        }
        let old_id = self.store.get_id(pos);
        self.store.set(pos, id, meta);

        if flags.contains(UpdateFlags::MARK_DIRTY) {
            self.listener.mark_dirty(pos);
        }
        if flags.contains(UpdateFlags::NOTIFY_NEIGHBORS) {
            if old_id != tile_ids::AIR {
                self.on_block_remove(pos, old_id);
            }
            if id != tile_ids::AIR {
                self.on_block_add(pos, id);
            }
        }
        true
    }

    /// Places a block and lets the world react to it.
    pub fn place(&mut self, pos: BlockPos, id: u8, meta: u8) -> bool {
        self.set_block(pos, id, meta, UpdateFlags::UPDATE_ALL)
    }

    /// Replaces a block with air and lets the world react to it.
    pub fn remove(&mut self, pos: BlockPos) -> bool {
        self.set_block(pos, tile_ids::AIR, 0, UpdateFlags::UPDATE_ALL)
    }

    /// Reaction to `id` having just been written at `pos`.
    pub fn on_block_add(&mut self, pos: BlockPos, id: u8) {
        match id {
            tile_ids::REDSTONE_WIRE => {
                self.wire_propagation_start(pos);
                self.update_neighbors(pos);
            }
            tile_ids::REDSTONE_TORCH_OFF | tile_ids::REDSTONE_TORCH_ON => {
                self.schedule_update(pos, self.settings.torch_delay);
                self.update_neighbors_deep(pos);
            }
            _ => self.update_neighbors(pos),
        }
    }

    /// Reaction to `id` having just been overwritten at `pos`.
    pub fn on_block_remove(&mut self, pos: BlockPos, id: u8) {
        match id {
            tile_ids::REDSTONE_WIRE => {
                let links = self.wire_links(pos);
                self.propagate_wires(&links);
                self.update_neighbors_deep(pos);
            }
            tile_ids::REDSTONE_TORCH_OFF | tile_ids::REDSTONE_TORCH_ON => {
                self.update_neighbors_deep(pos);
            }
            _ => self.update_neighbors(pos),
        }
    }

    /// Sends [`Level::on_block_update`] to the six cells around `pos`.
    pub fn update_neighbors(&mut self, pos: BlockPos) {
        for dir in Direction::ALL {
            self.on_block_update(dir.relative(pos));
        }
    }

    /// Notifies the neighbours of `pos` and the neighbours of each of them,
    /// reaching blocks that sense power through a solid block.
    fn update_neighbors_deep(&mut self, pos: BlockPos) {
        self.update_neighbors(pos);
        for dir in Direction::ALL {
            self.update_neighbors(dir.relative(pos));
        }
    }

    /// Re-validates the block at `pos` after something next to it changed.
    ///
    /// Blocks that lost their support are removed. Wire recomputes its
    /// strength immediately, redstone torches schedule a re-evaluation.
    pub fn on_block_update(&mut self, pos: BlockPos) {
        let id = self.store.get_id(pos);
        if id == tile_ids::AIR {
            return;
        }
        if !self.is_supported(pos, id) {
            log::trace!("Block {id} at {pos} lost its support");
            self.remove(pos);
            return;
        }
        match id {
            tile_ids::REDSTONE_WIRE => self.wire_propagation_start(pos),
            tile_ids::REDSTONE_TORCH_OFF | tile_ids::REDSTONE_TORCH_ON => {
                self.schedule_update(pos, self.settings.torch_delay);
            }
            _ => {}
        }
    }

    /// Returns true if the block `id` at `pos` has what it needs to rest on.
    #[must_use]
    pub fn is_supported(&self, pos: BlockPos, id: u8) -> bool {
        match self.tiles.support(id) {
            Support::None => true,
            Support::Below => self.is_opaque(pos.below()),
            Support::Attachment => {
                let attach = torch_attachment(self.store.get_meta(pos));
                self.is_opaque(attach.relative(pos))
            }
        }
    }

    /// Schedules a re-evaluation of `pos` in `delay` ticks, guarded by the
    /// block currently there.
    pub fn schedule_update(&mut self, pos: BlockPos, delay: u64) -> bool {
        self.ticks
            .schedule(&self.store, pos, self.tick_count + delay)
    }

    /// Advances the world clock by one tick and fires the scheduled ticks
    /// that became due, up to the configured budget.
    ///
    /// Returns the number of ticks that fired.
    pub fn on_tick(&mut self) -> usize {
        self.tick_count += 1;
        self.drain_scheduled(self.settings.tick_budget)
    }

    /// Fires due scheduled ticks in `(trigger_tick, insertion)` order.
    ///
    /// At most `limit` entries are taken off the queue, and never more than
    /// [`MAX_SCHEDULED_PER_TICK`]. An entry whose cell no longer holds the
    /// expected block is dropped without firing. The check happens right
    /// before each entry runs, so earlier entries of the same batch can
    /// invalidate later ones.
    ///
    /// Returns the number of ticks that fired.
    pub fn drain_scheduled(&mut self, limit: usize) -> usize {
        let limit = limit.min(MAX_SCHEDULED_PER_TICK);
        let mut fired = 0;
        for _ in 0..limit {
            let Some(tick) = self.ticks.poll_due(self.tick_count) else {
                break;
            };
            if self.store.get_id(tick.pos) != tick.expected_id {
                log::trace!("Dropped stale tick at {}", tick.pos);
                continue;
            }
            self.scheduled_tick(tick.pos, tick.expected_id);
            fired += 1;
        }
        fired
    }

    fn scheduled_tick(&mut self, pos: BlockPos, id: u8) {
        if matches!(
            id,
            tile_ids::REDSTONE_TORCH_OFF | tile_ids::REDSTONE_TORCH_ON
        ) {
            self.update_torch(pos, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use redwire_registry::tile_ids::{
        AIR, REDSTONE_TORCH_OFF, REDSTONE_TORCH_ON, REDSTONE_WIRE, ROSE, STONE, TORCH,
    };

    use super::*;
    use crate::listener::NoopListener;

    fn level() -> Level {
        Level::new(VoxelStore::new(32, 32), Arc::new(TileRegistry::vanilla()))
    }

    #[test]
    fn test_set_block_flags() {
        let mut level = level();
        let pos = BlockPos::new(1, 1, 1);

        assert!(level.set_block(pos, STONE, 0, UpdateFlags::empty()));
        assert!(level.listener().is_empty());

        assert!(level.set_block(pos, STONE, 3, UpdateFlags::MARK_DIRTY));
        assert_eq!(level.listener_mut().take(), vec![pos]);
        assert_eq!(level.get_meta(pos), 3);

        assert!(!level.place(BlockPos::new(-1, 0, 0), STONE, 0));
        assert!(!level.place(BlockPos::new(0, 128, 0), STONE, 0));
        assert!(level.listener().is_empty());
    }

    #[test]
    fn test_unsupported_blocks_break() {
        let mut level = level();
        let floor = BlockPos::new(4, 1, 4);
        let flower = floor.above();
        let torch = BlockPos::new(5, 1, 4);

        level.place(floor, STONE, 0);
        level.place(flower, ROSE, 0);
        // Wall torch leaning against the west side
        level.place(torch, TORCH, 1);
        assert_eq!(level.get_id(flower), ROSE);
        assert_eq!(level.get_id(torch), TORCH);

        level.remove(floor);
        assert_eq!(level.get_id(flower), AIR);
        assert_eq!(level.get_id(torch), AIR);
    }

    #[test]
    fn test_block_update_ignores_supported_blocks() {
        let mut level = level();
        let pos = BlockPos::new(2, 1, 2);
        level.set_block(pos.below(), STONE, 0, UpdateFlags::empty());
        level.set_block(pos, ROSE, 0, UpdateFlags::empty());

        level.on_block_update(pos);
        assert_eq!(level.get_id(pos), ROSE);
        assert!(level.scheduled().is_empty());
    }

    #[test]
    fn test_torch_schedules_itself() {
        let mut level = level();
        let support = BlockPos::new(3, 1, 3);
        let torch = support.above();
        level.place(support, STONE, 0);
        level.place(torch, REDSTONE_TORCH_ON, 5);

        assert!(level.scheduled().has_scheduled(torch, REDSTONE_TORCH_ON));
        assert_eq!(level.scheduled().len(), 1);
        assert_eq!(level.on_tick(), 0);
        assert_eq!(level.on_tick(), 1);
        assert_eq!(level.get_id(torch), REDSTONE_TORCH_ON);
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let mut level = level();
        let support = BlockPos::new(3, 1, 3);
        let torch = support.above();
        level.place(support, STONE, 0);
        level.place(torch, REDSTONE_TORCH_ON, 5);
        level.set_block(torch, STONE, 0, UpdateFlags::empty());

        level.on_tick();
        assert_eq!(level.on_tick(), 0);
        assert!(level.scheduled().is_empty());
        assert_eq!(level.get_id(torch), STONE);
    }

    #[test]
    fn test_tick_budget_defers_work() {
        let mut level = Level::with_listener(
            VoxelStore::new(32, 32),
            Arc::new(TileRegistry::vanilla()),
            NoopListener,
        )
        .with_settings(LevelSettings {
            torch_delay: 1,
            tick_budget: 3,
        });
        for x in 0..5 {
            let support = BlockPos::new(x * 2, 1, 0);
            level.set_block(support, STONE, 0, UpdateFlags::empty());
            level.set_block(support.above(), REDSTONE_TORCH_ON, 5, UpdateFlags::empty());
            level.schedule_update(support.above(), 1);
        }

        assert_eq!(level.on_tick(), 3);
        assert_eq!(level.scheduled().len(), 2);
        assert_eq!(level.on_tick(), 2);
        assert!(level.scheduled().is_empty());
    }

    #[test]
    fn test_drain_limit_is_capped() {
        let mut level = Level::with_listener(
            VoxelStore::new(16, 16),
            Arc::new(TileRegistry::vanilla()),
            NoopListener,
        );
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..5 {
                    level.schedule_update(BlockPos::new(x, y, z), 0);
                }
            }
        }
        assert_eq!(level.scheduled().len(), 1280);

        assert_eq!(level.drain_scheduled(usize::MAX), MAX_SCHEDULED_PER_TICK);
        assert_eq!(level.scheduled().len(), 280);
    }

    #[test]
    fn test_wire_placement_notifies_listener() {
        let mut level = level();
        let mut floor = Vec::new();
        for x in 0..3 {
            let pos = BlockPos::new(x, 0, 0);
            level.set_block(pos, STONE, 0, UpdateFlags::empty());
            floor.push(pos);
        }
        level.place(BlockPos::new(0, 1, 0), REDSTONE_TORCH_ON, 5);
        level.listener_mut().take();

        let wire = BlockPos::new(1, 1, 0);
        level.place(wire, REDSTONE_WIRE, 0);
        assert_eq!(level.get_meta(wire), 15);
        assert_eq!(level.listener_mut().take(), vec![wire]);
        assert_eq!(level.get_id(BlockPos::new(0, 1, 0)), REDSTONE_TORCH_ON);
        assert_eq!(level.scheduled().len(), 1);
    }
}
