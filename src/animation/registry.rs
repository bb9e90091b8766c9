use rustc_hash::FxHashMap;

use crate::animation::mixer::ActionHandle;

/// Name → handle lookup plus the clip order reported by the loader.
///
/// The registry is either empty or fully populated; [`AnimationRegistry::load`]
/// builds the new contents on the side and swaps them in at the end.
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry {
    lookup: FxHashMap<String, ActionHandle>,
    names: Vec<String>,
}

impl AnimationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the registry from `(name, handle)` pairs in discovery order.
    ///
    /// An empty list leaves the registry empty and returns `false`; an asset
    /// without animations is a valid outcome, not an error. Duplicate names
    /// keep their first occurrence.
    pub fn load<I>(&mut self, clips: I) -> bool
    where
        I: IntoIterator<Item = (String, ActionHandle)>,
    {
        let mut lookup = FxHashMap::default();
        let mut names = Vec::new();

        for (name, handle) in clips {
            if lookup.contains_key(&name) {
                log::warn!("Duplicate animation clip '{name}' ignored");
                continue;
            }
            lookup.insert(name.clone(), handle);
            names.push(name);
        }

        if names.is_empty() {
            return false;
        }

        self.lookup = lookup;
        self.names = names;
        true
    }

    /// Clip names in discovery order. Empty until loaded.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Looks up a handle by name; `None` for unknown names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ActionHandle> {
        self.lookup.get(name).copied()
    }

    #[must_use]
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn handle_at(&self, index: usize) -> Option<ActionHandle> {
        self.name_at(index).and_then(|name| self.get(name))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates handles in discovery order.
    pub fn handles(&self) -> impl Iterator<Item = ActionHandle> + '_ {
        self.names.iter().filter_map(|name| self.get(name))
    }

    pub fn clear(&mut self) {
        self.lookup.clear();
        self.names.clear();
    }
}
