use std::collections::BTreeMap;

/// Port for the slug -> numeric player id mapping's backing store.
pub trait PlayerIdStore {
    fn load(&self) -> Result<BTreeMap<String, u64>, String>;
    fn save(&self, ids: &BTreeMap<String, u64>) -> Result<(), String>;
}

/// Explicit, passed-around id cache. Loaded once per run through an
/// injected store and saved back only when something changed.
#[derive(Debug, Default)]
pub struct PlayerIdCache {
    ids: BTreeMap<String, u64>,
    dirty: bool,
}

impl PlayerIdCache {
    pub fn load(store: &dyn PlayerIdStore) -> Result<Self, String> {
        Ok(Self {
            ids: store.load()?,
            dirty: false,
        })
    }

    pub fn get(&self, slug: &str) -> Option<u64> {
        self.ids.get(slug).copied()
    }

    pub fn insert(&mut self, slug: String, id: u64) {
        let replaced = self.ids.insert(slug, id);
        if replaced != Some(id) {
            self.dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn save_if_dirty(&mut self, store: &dyn PlayerIdStore) -> Result<(), String> {
        if self.dirty {
            store.save(&self.ids)?;
            self.dirty = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerIdCache, PlayerIdStore};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemoryStore {
        ids: RefCell<BTreeMap<String, u64>>,
        saves: RefCell<usize>,
    }

    impl PlayerIdStore for MemoryStore {
        fn load(&self) -> Result<BTreeMap<String, u64>, String> {
            Ok(self.ids.borrow().clone())
        }

        fn save(&self, ids: &BTreeMap<String, u64>) -> Result<(), String> {
            *self.ids.borrow_mut() = ids.clone();
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn save_only_happens_when_dirty() {
        let store = MemoryStore::default();
        let mut cache = PlayerIdCache::load(&store).expect("load");
        cache.save_if_dirty(&store).expect("noop save");
        assert_eq!(*store.saves.borrow(), 0);

        cache.insert("anthony_edwards".to_string(), 1_630_162);
        cache.save_if_dirty(&store).expect("save");
        assert_eq!(*store.saves.borrow(), 1);
        assert_eq!(store.ids.borrow().get("anthony_edwards"), Some(&1_630_162));

        // re-inserting the same mapping does not mark the cache dirty again
        cache.insert("anthony_edwards".to_string(), 1_630_162);
        cache.save_if_dirty(&store).expect("noop save");
        assert_eq!(*store.saves.borrow(), 1);
    }

    #[test]
    fn lookup_round_trips_through_store() {
        let store = MemoryStore::default();
        store
            .ids
            .borrow_mut()
            .insert("jalen_brunson".to_string(), 1_628_973);

        let cache = PlayerIdCache::load(&store).expect("load");
        assert_eq!(cache.get("jalen_brunson"), Some(1_628_973));
        assert_eq!(cache.get("unknown_slug"), None);
        assert_eq!(cache.len(), 1);
    }
}
