use std::marker::PhantomData;

pub trait VecMapKey {
    fn index(&self) -> usize;
}

/// A dense index map, very suitable for consecutive keys.
#[derive(Clone)]
pub struct VecMap<K, T> {
    elements: Vec<Option<T>>,
    _key: PhantomData<K>,
}

impl<K, V> VecMap<K, V> {
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: VecMapKey,
    {
        self.elements.get(key.index())?.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(idx, opt)| opt.as_ref().map(|element| (idx, element)))
    }

    pub fn insert(&mut self, key: K, value: V)
    where
        K: VecMapKey,
    {
        let index = self.grow_to(&key);
        self.elements[index] = Some(value);
    }

    /// Get the value at `key`, inserting the result of `init` if the slot is vacant.
    pub fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V
    where
        K: VecMapKey,
    {
        let index = self.grow_to(&key);
        self.elements[index].get_or_insert_with(init)
    }

    fn grow_to(&mut self, key: &K) -> usize
    where
        K: VecMapKey,
    {
        let index = key.index();
        self.elements
            .resize_with(std::cmp::max(self.elements.len(), index + 1), || None);
        index
    }
}

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self {
        Self {
            elements: vec![],
            _key: PhantomData,
        }
    }
}
