use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The lock around the active table.
///
/// Every write replaces or inserts whole entries, so the table is consistent
/// even when a writer panicked. Poisoning is therefore ignored.
#[repr(transparent)]
pub(crate) struct TableLock<T: Send + Sync>(RwLock<T>);

impl<T: Send + Sync> TableLock<T> {
    #[must_use]
    pub(crate) const fn new(value: T) -> Self {
        Self(RwLock::new(value))
    }

    #[inline]
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}
