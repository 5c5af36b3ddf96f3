//! # Barrels Plugin
//!
//! Wires the barrel behaviours from `barrels-core` into a server: handlers
//! are registered on an [`EventBus`], drops are applied through a
//! [`PluginHost`], and stale placement conflicts are swept on a repeating
//! host task.

pub mod dispatch;
pub mod host;
pub mod listeners;
pub mod logger;

use std::sync::Arc;
use std::time::Instant;

use barrels_core::{BarrelSerializer, ConfigError, EventKind, PluginConfig, PoiConflictFilter};
use parking_lot::Mutex;

pub use dispatch::{EventBus, Handler, HandlerList};
pub use host::{PluginHost, Task, TaskId};
pub use listeners::{Clock, LISTENERS, Listeners, Subscription, listener};

/// Name of the config file inside the host's data folder.
pub const CONFIG_FILE: &str = "barrels_config.json5";

/// The plugin: its config, its handlers and the sweep task while enabled.
#[derive(Debug)]
pub struct BarrelsPlugin {
    config: PluginConfig,
    listeners: Listeners,
    sweep_task: Option<TaskId>,
}

impl BarrelsPlugin {
    /// Creates a disabled plugin using the wall clock.
    #[must_use]
    pub fn new(config: PluginConfig) -> Self {
        Self::with_clock(config, Arc::new(Instant::now))
    }

    /// Creates a disabled plugin reading the time from `clock`.
    #[must_use]
    pub fn with_clock(config: PluginConfig, clock: Clock) -> Self {
        let filter = Arc::new(Mutex::new(PoiConflictFilter::from_config(&config)));
        let serializer = BarrelSerializer::new(config.preview_limit);
        Self {
            listeners: Listeners::new(filter, serializer, clock),
            config,
            sweep_task: None,
        }
    }

    /// Loads the config from the host's data folder, creating it if missing,
    /// and installs the logger at the configured level.
    pub fn load(host: &dyn PluginHost) -> Result<Self, ConfigError> {
        let config = PluginConfig::load_or_create(&host.data_folder().join(CONFIG_FILE))?;
        if !logger::init(&config.log_level) {
            log::debug!("Keeping the host's log subscriber");
        }
        Ok(Self::new(config))
    }

    /// The active config.
    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// The handlers, sharing state with those registered on the bus.
    #[must_use]
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Returns true between [`Self::on_enable`] and [`Self::on_disable`].
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sweep_task.is_some()
    }

    /// Registers every handler on `bus` and starts the expiry sweep.
    pub fn on_enable(&mut self, host: &mut dyn PluginHost, bus: &mut EventBus) {
        if self.is_enabled() {
            log::warn!("Barrels plugin is already enabled");
            return;
        }
        log::info!("Enabling barrels plugin");

        self.register_listeners(bus);

        let listeners = self.listeners.clone();
        let task = host.schedule_repeating(
            self.config.sweep_interval_ticks,
            Box::new(move || {
                let now = listeners.now();
                listeners.filter().lock().sweep(now);
            }),
        );
        log::debug!(
            "Sweeping POI conflicts every {} ticks with task {task}",
            self.config.sweep_interval_ticks
        );
        self.sweep_task = Some(task);
    }

    /// Removes the handlers, stops the sweep and forgets pending conflicts.
    pub fn on_disable(&mut self, host: &mut dyn PluginHost, bus: &mut EventBus) {
        if let Some(task) = self.sweep_task.take() {
            host.cancel_task(task);
        }
        bus.clear();

        let mut filter = self.listeners.filter().lock();
        let pending = filter.registry().len();
        filter.clear();
        log::info!("Disabled barrels plugin, dropped {pending} pending POI conflict(s)");
    }

    fn register_listeners(&self, bus: &mut EventBus) {
        let subscription = listener(EventKind::BlockBreak);
        let listeners = self.listeners.clone();
        bus.block_break.register(
            subscription.priority,
            subscription.ignore_cancelled,
            Box::new(move |event| listeners.on_block_break(event)),
        );

        let subscription = listener(EventKind::BlockPlace);
        let listeners = self.listeners.clone();
        bus.block_place.register(
            subscription.priority,
            subscription.ignore_cancelled,
            Box::new(move |event| listeners.on_block_place(event)),
        );

        let subscription = listener(EventKind::ItemSpawn);
        let listeners = self.listeners.clone();
        bus.item_spawn.register(
            subscription.priority,
            subscription.ignore_cancelled,
            Box::new(move |event| listeners.on_item_spawn(event)),
        );

        let subscription = listener(EventKind::InventoryClick);
        let listeners = self.listeners.clone();
        bus.inventory_click.register(
            subscription.priority,
            subscription.ignore_cancelled,
            Box::new(move |event| listeners.on_inventory_click(event)),
        );

        let subscription = listener(EventKind::InventoryDrag);
        let listeners = self.listeners.clone();
        bus.inventory_drag.register(
            subscription.priority,
            subscription.ignore_cancelled,
            Box::new(move |event| listeners.on_inventory_drag(event)),
        );

        let subscription = listener(EventKind::InventoryMoveItem);
        let listeners = self.listeners.clone();
        bus.inventory_move_item.register(
            subscription.priority,
            subscription.ignore_cancelled,
            Box::new(move |event| listeners.on_inventory_move_item(event)),
        );
    }
}
