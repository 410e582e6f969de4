use crate::entity::EntityId;
use foundation::handles::Handle;

/// Registration set for shadow-casting entities, backed by a bitset.
///
/// External mesh owners register their entities here; the lighting code
/// never enumerates the scene itself.
///
/// Ordering contract:
/// - Iteration yields `EntityId`s in ascending index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowCasterSet {
    words: Vec<u64>,
    len: usize,
}

impl ShadowCasterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        let (word, bit) = word_bit(entity.index());
        self.words
            .get(word)
            .is_some_and(|w| (w & (1u64 << bit)) != 0)
    }

    /// Registers `entity` as a shadow caster.
    ///
    /// Returns `true` if the set changed.
    pub fn register(&mut self, entity: EntityId) -> bool {
        let index = entity.index();
        self.ensure_capacity(index);
        let (word, bit) = word_bit(index);
        let mask = 1u64 << bit;
        let w = &mut self.words[word];
        if (*w & mask) != 0 {
            return false;
        }
        *w |= mask;
        self.len += 1;
        true
    }

    /// Removes `entity` from the set.
    ///
    /// Returns `true` if the set changed.
    pub fn unregister(&mut self, entity: EntityId) -> bool {
        let (word, bit) = word_bit(entity.index());
        let Some(w) = self.words.get_mut(word) else {
            return false;
        };
        let mask = 1u64 << bit;
        if (*w & mask) == 0 {
            return false;
        }
        *w &= !mask;
        self.len -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.words.iter().enumerate().flat_map(|(word, bits)| {
            (0..64)
                .filter(move |bit| (bits & (1u64 << bit)) != 0)
                .map(move |bit| EntityId(Handle::new((word * 64 + bit) as u32, 0)))
        })
    }

    fn ensure_capacity(&mut self, index: u32) {
        let words = (index as usize / 64) + 1;
        if self.words.len() < words {
            self.words.resize(words, 0);
        }
    }
}

fn word_bit(index: u32) -> (usize, u32) {
    ((index / 64) as usize, index % 64)
}
