//! Inventory interaction descriptions delivered with click, drag and transfer events.

/// The kind of inventory a player or hopper is interacting with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryKind {
    /// A furnace.
    Furnace,
    /// A blast furnace.
    BlastFurnace,
    /// A smoker.
    Smoker,
    /// A barrel.
    Barrel,
    /// A chest or trapped chest.
    Chest,
    /// A hopper or hopper minecart.
    Hopper,
    /// A player's own inventory.
    Player,
    /// Anything else.
    Other,
}

impl InventoryKind {
    /// Returns true for every inventory that burns fuel like a furnace.
    #[must_use]
    pub const fn is_furnace(self) -> bool {
        matches!(self, Self::Furnace | Self::BlastFurnace | Self::Smoker)
    }
}

/// The resolved action a click performs.
///
/// The server derives this from the raw click type, button and cursor state
/// before the click event is fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryAction {
    /// Nothing happens.
    Nothing,
    /// All of the clicked stack is moved to the cursor.
    PickupAll,
    /// Some of the clicked stack is moved to the cursor.
    PickupSome,
    /// Half of the clicked stack is moved to the cursor.
    PickupHalf,
    /// One item of the clicked stack is moved to the cursor.
    PickupOne,
    /// The whole cursor is placed into the clicked slot.
    PlaceAll,
    /// Part of the cursor is placed into the clicked slot.
    PlaceSome,
    /// One item of the cursor is placed into the clicked slot.
    PlaceOne,
    /// The cursor and the clicked slot swap stacks.
    SwapWithCursor,
    /// The cursor is dropped into the world.
    DropAllCursor,
    /// One item of the cursor is dropped into the world.
    DropOneCursor,
    /// The clicked stack is dropped into the world.
    DropAllSlot,
    /// One item of the clicked stack is dropped into the world.
    DropOneSlot,
    /// Shift click: the clicked stack moves to the other inventory.
    MoveToOtherInventory,
    /// Number key: the clicked slot swaps with a hotbar slot.
    HotbarSwap,
    /// Middle click in creative: a full copy of the stack goes to the cursor.
    CloneStack,
    /// Double click: matching items are gathered onto the cursor.
    CollectToCursor,
    /// The action could not be determined.
    Unknown,
}

impl InventoryAction {
    /// Returns true if this action puts the cursor's contents into the clicked slot.
    #[must_use]
    pub const fn places_cursor(self) -> bool {
        matches!(
            self,
            Self::PlaceOne | Self::PlaceSome | Self::PlaceAll | Self::SwapWithCursor
        )
    }
}

/// The role of a slot inside its inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotType {
    /// A furnace's output slot or a crafting result.
    Result,
    /// A crafting grid or furnace input slot.
    Crafting,
    /// An armor slot.
    Armor,
    /// A generic container slot.
    Container,
    /// A player's hotbar slot.
    Quickbar,
    /// Outside of any inventory window.
    Outside,
    /// A furnace fuel slot.
    Fuel,
}
