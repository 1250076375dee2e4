//! Ordered item set with monotonically minted ids.
//!
//! Ids start at 1 and only ever increase, so an id freed by `remove` can never
//! be handed to a later `add`. A completion that arrives for a deleted id can
//! therefore never be mistaken for one belonging to a newer card.

/// Stable identifier of a card for its whole lifetime.
pub type ItemId = u64;

const SEED_DESCRIPTION: &str =
    "A sample description text that gives more context about this Hello World item.";
const SEED_TAGS: [&str; 2] = ["AI", "Mindfulness"];
const SEED_CREATED_LABEL: &str = "2 days ago";

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Display-only label such as "2 days ago". Not a timestamp.
    pub created_label: String,
}

/// Card contents before an id has been minted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_label: String,
}

impl NewItem {
    /// Placeholder card copy used when seeding the board.
    ///
    /// The number is only used for the title; the id is assigned by [`ItemSet::add`].
    pub fn placeholder(number: ItemId) -> Self {
        Self {
            title: format!("Hello World #{}", number),
            description: SEED_DESCRIPTION.to_string(),
            tags: SEED_TAGS.iter().map(|t| t.to_string()).collect(),
            created_label: SEED_CREATED_LABEL.to_string(),
        }
    }
}

/// Insertion-ordered set of items keyed by id.
#[derive(Debug, Clone)]
pub struct ItemSet {
    items: Vec<Item>,
    next_id: ItemId,
}

impl Default for ItemSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemSet {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a set of `count` placeholder cards with ids `1..=count`.
    pub fn seeded(count: usize) -> Self {
        let mut set = Self::new();
        for _ in 0..count {
            let number = set.next_id;
            set.add(NewItem::placeholder(number));
        }
        set
    }

    /// Append an item at the end and return its freshly minted id.
    pub fn add(&mut self, item: NewItem) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Item {
            id,
            title: item.title,
            description: item.description,
            tags: item.tags,
            created_label: item.created_label,
        });
        id
    }

    /// Remove an item, preserving the order of the rest.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Index of the item in display order.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The id the next `add` will assign.
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_ids_are_sequential() {
        let set = ItemSet::seeded(10);
        let ids: Vec<ItemId> = set.iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(set.get(4).map(|i| i.title.as_str()), Some("Hello World #4"));
    }

    #[test]
    fn test_seeded_card_copy() {
        let set = ItemSet::seeded(1);
        let item = set.get(1).unwrap();
        assert_eq!(item.tags, vec!["AI".to_string(), "Mindfulness".to_string()]);
        assert_eq!(item.created_label, "2 days ago");
        assert!(item.description.starts_with("A sample description"));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut set = ItemSet::seeded(5);
        let removed = set.remove(3).unwrap();
        assert_eq!(removed.id, 3);
        let ids: Vec<ItemId> = set.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
        assert!(!set.contains(3));
    }

    #[test]
    fn test_remove_missing_returns_none() {
        let mut set = ItemSet::seeded(2);
        assert!(set.remove(42).is_none());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut set = ItemSet::seeded(3);
        set.remove(3);
        let id = set.add(NewItem::placeholder(99));
        assert_eq!(id, 4);
        assert_eq!(set.position(4), Some(2));
    }

    #[test]
    fn test_empty_set() {
        let set = ItemSet::seeded(0);
        assert!(set.is_empty());
        assert_eq!(set.next_id(), 1);
    }

    proptest! {
        // Any interleaving of adds and removes keeps ids unique and increasing
        // in insertion order.
        #[test]
        fn prop_ids_unique_and_increasing(ops in prop::collection::vec((any::<bool>(), 0u64..20), 0..60)) {
            let mut set = ItemSet::seeded(3);
            let mut minted = Vec::new();
            for (is_add, target) in ops {
                if is_add {
                    minted.push(set.add(NewItem::placeholder(0)));
                } else {
                    set.remove(target);
                }
            }
            let ids: Vec<ItemId> = set.iter().map(|i| i.id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(minted.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(minted.iter().all(|id| *id > 3));
        }
    }
}
