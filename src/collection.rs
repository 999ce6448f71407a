//! Ordered, name-indexed views of driver-managed item lists.
//!
//! A session holds lists of items (frames, signals) that the driver owns. A
//! [`Collection`] exposes such a list by position and by name. It asks the
//! driver for the item names once, on first use, and keeps them for the rest
//! of its life; the item count is queried live.
//!
//! Changing the driver-side list after the names were cached is not
//! supported. [`Collection::iter`] detects it when the live count no longer
//! matches and fails with [`Error::CacheConsistencyViolation`].
//!
//! # Example
//!
//! ```
//! use nixnet_rs::collection::{Collection, Item};
//! use nixnet_rs::session::LoopbackDriver;
//! use nixnet_rs::Handle;
//!
//! let driver = LoopbackDriver::with_items(["EngineData", "BrakeData"]);
//! let items: Collection<'_, _, Item> = Collection::new(&driver, Handle(1));
//!
//! assert_eq!(items.len()?, 2);
//! assert_eq!(items.get("BrakeData")?, items.get(1usize)?);
//! assert!(!items.contains(2usize)?);
//! # Ok::<(), nixnet_rs::Error>(())
//! ```

use core::cell::OnceCell;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::driver::{Driver, Handle};
use crate::{Error, Result};

/// Key of a collection lookup: a position or an item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKey<'a> {
    /// Position in the list.
    Index(usize),
    /// Item name.
    Name(&'a str),
}

impl From<usize> for ItemKey<'_> {
    fn from(index: usize) -> Self {
        ItemKey::Index(index)
    }
}

impl<'a> From<&'a str> for ItemKey<'a> {
    fn from(name: &'a str) -> Self {
        ItemKey::Name(name)
    }
}

impl<'a> From<&'a String> for ItemKey<'a> {
    fn from(name: &'a String) -> Self {
        ItemKey::Name(name.as_str())
    }
}

/// Keys coming from configuration files or scripts.
///
/// Integers are positions and strings are names; anything else is
/// [`Error::InvalidKeyType`]. Negative integers, and integers too large for
/// `usize`, become a position past the end of any list, so they miss the
/// way any other out-of-range position does.
#[cfg(feature = "serde_json")]
impl<'a> TryFrom<&'a serde_json::Value> for ItemKey<'a> {
    type Error = Error;

    fn try_from(value: &'a serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(name) => Ok(ItemKey::Name(name)),
            serde_json::Value::Number(number) if number.is_u64() || number.is_i64() => {
                let index = number
                    .as_u64()
                    .and_then(|index| usize::try_from(index).ok())
                    .unwrap_or(usize::MAX);
                Ok(ItemKey::Index(index))
            }
            _ => Err(Error::InvalidKeyType(value.to_string())),
        }
    }
}

impl fmt::Display for ItemKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Index(index) => write!(f, "{index}"),
            ItemKey::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// Builds the item a collection hands out for a position.
///
/// Concrete collections differ only in this step.
pub trait CollectionItem<'d, D: ?Sized>: Sized {
    /// Build the item for the entry at `index` named `name`.
    fn create(driver: &'d D, handle: Handle, index: usize, name: &str) -> Self;
}

/// Plain reference to an entry of a driver item list.
///
/// Two items are equal when they refer to the same handle and position; the
/// name is informational.
#[derive(Debug, Clone)]
pub struct Item {
    handle: Handle,
    index: usize,
    name: String,
}

impl Item {
    /// Create a reference to entry `index` of the list behind `handle`.
    pub fn new(handle: Handle, index: usize, name: impl Into<String>) -> Self {
        Self {
            handle,
            index,
            name: name.into(),
        }
    }

    /// Handle of the session the item belongs to.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Position of the item in the session list.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the item.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && self.index == other.index
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<'d, D: ?Sized> CollectionItem<'d, D> for Item {
    fn create(_driver: &'d D, handle: Handle, index: usize, name: &str) -> Self {
        Item::new(handle, index, name)
    }
}

/// Lazily cached, dual-indexed view of a driver item list.
///
/// `T` is the item type produced for each entry.
pub struct Collection<'d, D: ?Sized, T> {
    driver: &'d D,
    handle: Handle,
    names: OnceCell<Vec<String>>,
    _item: PhantomData<fn() -> T>,
}

impl<'d, D: ?Sized, T> Collection<'d, D, T> {
    /// Session handle of the collection.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Driver the collection reads from.
    #[inline]
    pub fn driver(&self) -> &'d D {
        self.driver
    }
}

impl<'d, D, T> Collection<'d, D, T>
where
    D: Driver + ?Sized,
    T: CollectionItem<'d, D>,
{
    /// Create a collection over the list behind `handle`. No driver call is made.
    pub fn new(driver: &'d D, handle: Handle) -> Self {
        Self {
            driver,
            handle,
            names: OnceCell::new(),
            _item: PhantomData,
        }
    }

    /// Live item count reported by the driver.
    pub fn len(&self) -> Result<usize> {
        self.driver.item_count(self.handle)
    }

    /// True if the driver reports no items.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Cached item names, fetched from the driver on first call.
    pub fn names(&self) -> Result<&[String]> {
        if let Some(names) = self.names.get() {
            return Ok(names);
        }
        let fetched = self.driver.item_names(self.handle)?;
        Ok(self.names.get_or_init(|| fetched))
    }

    /// Iterate over the items in list order.
    ///
    /// Each call starts a fresh iteration.
    ///
    /// # Errors
    /// Returns [`Error::CacheConsistencyViolation`] if the live item count
    /// differs from the number of cached names.
    pub fn iter(&self) -> Result<Iter<'_, 'd, D, T>> {
        let count = self.len()?;
        let names = self.names()?;
        if count != names.len() {
            return Err(Error::CacheConsistencyViolation {
                count,
                names: names.to_vec(),
            });
        }
        Ok(Iter {
            driver: self.driver,
            handle: self.handle,
            names: names.iter().enumerate(),
            _item: PhantomData,
        })
    }

    /// Check whether a position lies inside the cached list or a name is part of it.
    pub fn contains<'k>(&self, key: impl Into<ItemKey<'k>>) -> Result<bool> {
        let names = self.names()?;
        Ok(match key.into() {
            ItemKey::Index(index) => index < names.len(),
            ItemKey::Name(name) => names.iter().any(|n| n == name),
        })
    }

    /// Item at `index`.
    pub fn by_index(&self, index: usize) -> Result<T> {
        let names = self.names()?;
        let name = names.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: names.len(),
        })?;
        Ok(T::create(self.driver, self.handle, index, name))
    }

    /// First item called `name`. Names are expected to be unique but this is
    /// not checked.
    pub fn by_name(&self, name: &str) -> Result<T> {
        let index = self
            .position(name)?
            .ok_or_else(|| Error::KeyNotFound(name.to_string()))?;
        Ok(T::create(self.driver, self.handle, index, name))
    }

    /// Item at a position or with a name.
    ///
    /// # Errors
    /// - [`Error::IndexOutOfRange`] for a position past the end
    /// - [`Error::KeyNotFound`] for an unknown name
    pub fn get<'k>(&self, key: impl Into<ItemKey<'k>>) -> Result<T> {
        match key.into() {
            ItemKey::Index(index) => self.by_index(index),
            ItemKey::Name(name) => self.by_name(name),
        }
    }

    /// Like [`Collection::get`], but a missing item is `None`.
    ///
    /// Driver failures are still returned as errors.
    pub fn find<'k>(&self, key: impl Into<ItemKey<'k>>) -> Result<Option<T>> {
        match self.get(key) {
            Ok(item) => Ok(Some(item)),
            Err(Error::IndexOutOfRange { .. } | Error::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`Collection::get`], but a missing item yields `default`.
    pub fn get_or<'k>(&self, key: impl Into<ItemKey<'k>>, default: T) -> Result<T> {
        Ok(self.find(key)?.unwrap_or(default))
    }

    fn position(&self, name: &str) -> Result<Option<usize>> {
        Ok(self.names()?.iter().position(|n| n == name))
    }
}

impl<'d, D, T> PartialEq for Collection<'d, D, T>
where
    D: Driver + ?Sized,
    T: CollectionItem<'d, D>,
{
    /// Same handle and the same cached names in the same order. A collection
    /// whose names cannot be fetched equals nothing.
    fn eq(&self, other: &Self) -> bool {
        if self.handle != other.handle {
            return false;
        }
        match (self.names(), other.names()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl<D: ?Sized, T> fmt::Debug for Collection<'_, D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("handle", &self.handle)
            .field("names", &self.names.get())
            .finish()
    }
}

/// Iterator returned by [`Collection::iter`].
pub struct Iter<'c, 'd, D: ?Sized, T> {
    driver: &'d D,
    handle: Handle,
    names: core::iter::Enumerate<core::slice::Iter<'c, String>>,
    _item: PhantomData<fn() -> T>,
}

impl<'d, D, T> Iterator for Iter<'_, 'd, D, T>
where
    D: ?Sized,
    T: CollectionItem<'d, D>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (index, name) = self.names.next()?;
        Some(T::create(self.driver, self.handle, index, name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}

impl<'d, D, T> ExactSizeIterator for Iter<'_, 'd, D, T>
where
    D: ?Sized,
    T: CollectionItem<'d, D>,
{
}
