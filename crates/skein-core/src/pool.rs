//! Identity interning.
//!
//! An [`IdentityPool`] hands out exactly one [`Identity`] per distinct value.
//! Every later resolution of an equal value returns a handle to the same
//! allocation, so graphs keyed by identities compare by address first and
//! only fall back to the value when two handles come from different pools.
//!
//! ```rust
//! use skein_core::{Identity, IdentityPool};
//!
//! let mut pool = IdentityPool::new();
//! let a = pool.resolve_ref("alice");
//! let b = pool.resolve(String::from("alice"));
//!
//! assert!(Identity::ptr_eq(&a, &b));
//! assert_eq!(pool.len(), 1);
//! ```

use crate::render::Render;
use crate::{Error, Result};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

/// Canonical handle for one interned value.
///
/// Ordering and equality follow the underlying value, with a pointer check
/// as the fast path. Handles issued by the same pool are equal exactly when
/// they point at the same allocation.
pub struct Identity<T>(Rc<T>);

impl<T> Identity<T> {
    /// Whether two handles point at the same interned allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Address of the interned value.
    pub fn as_ptr(this: &Self) -> *const T {
        Rc::as_ptr(&this.0)
    }

    /// Borrow the interned value.
    pub fn get(&self) -> &T {
        &self.0
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> AsRef<T> for Identity<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T> Borrow<T> for Identity<T> {
    fn borrow(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl<T: Eq> Eq for Identity<T> {}

impl<T: Ord> PartialOrd for Identity<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Identity<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        if Self::ptr_eq(self, other) {
            Ordering::Equal
        } else {
            self.0.cmp(&other.0)
        }
    }
}

impl<T: Hash> Hash for Identity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: fmt::Display> fmt::Display for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl<T: Render> Render for Identity<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

/// Registry that owns one canonical allocation per distinct value.
///
/// Entries are only ever added; [`IdentityPool::clear`] drops them all at
/// once. Handles obtained before a clear keep their value alive but are no
/// longer canonical: resolving the same value afterwards yields a new
/// allocation.
///
/// An optional limit caps how many identities the pool may issue. The limit
/// is enforced by the `try_` methods only.
pub struct IdentityPool<T> {
    entries: BTreeMap<T, Rc<T>>,
    limit: Option<usize>,
}

impl<T> Default for IdentityPool<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            limit: None,
        }
    }
}

impl<T> IdentityPool<T> {
    /// Create an empty, unlimited pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pool that issues at most `limit` identities
    /// through [`try_resolve`](Self::try_resolve).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            limit: Some(limit),
        }
    }

    /// Configured identity limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of live identities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds no identities.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every identity. Previously issued handles stop being canonical.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over all identities in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = Identity<T>> + '_ {
        self.entries.values().map(|rc| Identity(Rc::clone(rc)))
    }

    fn check_limit(&self) -> Result<()> {
        match self.limit {
            Some(limit) if self.entries.len() >= limit => Err(Error::ResourceExhaustion { limit }),
            _ => Ok(()),
        }
    }
}

impl<T: Ord + Clone> IdentityPool<T> {
    /// Return the identity for `value`, interning it on first sight.
    pub fn resolve(&mut self, value: T) -> Identity<T> {
        if let Some(rc) = self.entries.get(&value) {
            return Identity(Rc::clone(rc));
        }
        let rc = Rc::new(value.clone());
        self.entries.insert(value, Rc::clone(&rc));
        Identity(rc)
    }

    /// Like [`resolve`](Self::resolve), but only clones `value` into the
    /// pool when it has not been seen before.
    pub fn resolve_ref<Q>(&mut self, value: &Q) -> Identity<T>
    where
        T: Borrow<Q>,
        Q: Ord + ToOwned<Owned = T> + ?Sized,
    {
        match self.entries.get(value) {
            Some(rc) => Identity(Rc::clone(rc)),
            None => self.resolve(value.to_owned()),
        }
    }

    /// Resolve `value`, failing with [`Error::ResourceExhaustion`] when a new
    /// identity would exceed the pool's limit.
    pub fn try_resolve(&mut self, value: T) -> Result<Identity<T>> {
        if let Some(rc) = self.entries.get(&value) {
            return Ok(Identity(Rc::clone(rc)));
        }
        self.check_limit()?;
        Ok(self.resolve(value))
    }

    /// Borrowed counterpart of [`try_resolve`](Self::try_resolve).
    pub fn try_resolve_ref<Q>(&mut self, value: &Q) -> Result<Identity<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ToOwned<Owned = T> + ?Sized,
    {
        if let Some(rc) = self.entries.get(value) {
            return Ok(Identity(Rc::clone(rc)));
        }
        self.check_limit()?;
        Ok(self.resolve(value.to_owned()))
    }
}

impl<T: Ord> IdentityPool<T> {
    /// Look up the identity for `value` without interning it.
    pub fn get<Q>(&self, value: &Q) -> Option<Identity<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(value).map(|rc| Identity(Rc::clone(rc)))
    }

    /// Whether `value` has been interned.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(value)
    }
}

/// Deep copy: the clone owns fresh allocations, one per entry.
impl<T: Ord + Clone> Clone for IdentityPool<T> {
    fn clone(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(key, rc)| (key.clone(), Rc::new(T::clone(rc))))
            .collect();
        Self {
            entries,
            limit: self.limit,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IdentityPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityPool")
            .field("len", &self.entries.len())
            .field("limit", &self.limit)
            .finish()
    }
}
