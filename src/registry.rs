//! Process-wide bookkeeping of live overlay windows.
//!
//! The registry is owned by the control thread; every mutation happens there,
//! so no locking is involved. It is generic over the handle type so the
//! invariants can be tested without a windowing backend.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::config::WindowSpec;

/// One live window: its toolkit handle and the spec it was created from.
#[derive(Debug)]
pub struct Entry<H> {
    pub handle: H,
    pub spec: Rc<WindowSpec>,
}

/// Ordered collection of live windows with O(1) handle lookup.
///
/// Spec lookup is by identity (`Rc::ptr_eq`): two specs with identical fields
/// are distinct entries when they originate from distinct config elements.
pub struct Registry<H> {
    entries: Vec<Entry<H>>,
    by_handle: HashMap<H, usize>,
}

impl<H: Copy + Eq + Hash> Registry<H> {
    pub fn new() -> Self {
        Registry {
            entries: Vec::new(),
            by_handle: HashMap::new(),
        }
    }

    /// Append a live window. Returns false (and changes nothing) if the
    /// handle is already registered.
    pub fn add(&mut self, handle: H, spec: Rc<WindowSpec>) -> bool {
        if self.by_handle.contains_key(&handle) {
            return false;
        }
        self.by_handle.insert(handle, self.entries.len());
        self.entries.push(Entry { handle, spec });
        true
    }

    /// Remove a live window, returning its spec if it was registered.
    pub fn remove(&mut self, handle: H) -> Option<Rc<WindowSpec>> {
        let position = self.by_handle.remove(&handle)?;
        let entry = self.entries.remove(position);
        for (index, later) in self.entries.iter().enumerate().skip(position) {
            self.by_handle.insert(later.handle, index);
        }
        Some(entry.spec)
    }

    pub fn find_by_handle(&self, handle: H) -> Option<&Entry<H>> {
        self.by_handle.get(&handle).map(|&index| &self.entries[index])
    }

    /// Identity lookup: the entry created from exactly this spec object.
    pub fn find_by_spec(&self, spec: &Rc<WindowSpec>) -> Option<&Entry<H>> {
        self.entries.iter().find(|entry| Rc::ptr_eq(&entry.spec, spec))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: Copy + Eq + Hash> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}
