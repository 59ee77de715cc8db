use crate::HolderClosed;

/// A single-slot container with an open/closed gate.
///
/// Storing is rejected while the gate is closed; reading is always allowed.
/// The game rules decide when to open and close the gate (one hold per turn).
#[derive(Debug, Clone)]
pub struct Holder<T> {
    item: Option<T>,
    can_store: bool,
}

impl<T> Default for Holder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Holder<T> {
    /// Creates an empty, open holder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            item: None,
            can_store: true,
        }
    }

    /// Stores an item, replacing any existing one.
    pub fn store(&mut self, item: T) -> Result<(), HolderClosed> {
        if !self.can_store {
            return Err(HolderClosed);
        }
        self.item = Some(item);
        Ok(())
    }

    pub const fn open(&mut self) {
        self.can_store = true;
    }

    pub const fn close(&mut self) {
        self.can_store = false;
    }

    /// Returns the held item regardless of the gate state.
    #[must_use]
    pub const fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    /// Removes and returns the held item regardless of the gate state.
    pub const fn take(&mut self) -> Option<T> {
        self.item.take()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.can_store
    }
}
