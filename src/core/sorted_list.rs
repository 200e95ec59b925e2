/// Array-backed list kept in ascending order on every insert.
///
/// New items are appended and then moved left past every greater
/// predecessor, so equal items keep their insertion order. Duplicates are
/// not rejected here.
#[derive(Debug, Clone)]
pub struct SortedList<T: Ord> {
    items: Vec<T>,
}

impl<T: Ord> SortedList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Inserts `item` at its sorted position and returns that index.
    pub fn insert(&mut self, item: T) -> usize {
        self.items.push(item);
        let mut index = self.items.len() - 1;
        while index > 0 && self.items[index - 1] > self.items[index] {
            self.items.swap(index - 1, index);
            index -= 1;
        }
        index
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access must not change an item's sort key.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Ord> Default for SortedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Ord> IntoIterator for &'a SortedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Ord> FromIterator<T> for SortedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SortedList::new();
        for item in iter {
            list.insert(item);
        }
        list
    }
}
