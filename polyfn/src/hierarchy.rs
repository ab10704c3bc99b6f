//! Single-parent nominal type hierarchy.
//!
//! Each tag has at most one declared parent and `derives_from` walks the
//! parent chain. The walk carries a depth guard so an accidentally cyclic
//! registration terminates instead of spinning.

use rustc_hash::FxHashMap;

use crate::value::TypeTag;

/// Upper bound on parent-chain walks.
const MAX_CHAIN_DEPTH: usize = 64;

#[derive(Debug, Clone)]
pub struct TypeHierarchy {
    parents: FxHashMap<TypeTag, TypeTag>,
}

impl TypeHierarchy {
    /// Creates the built-in hierarchy: `int` and `float` under `number`,
    /// everything else directly under `value`.
    pub fn new() -> Self {
        let mut parents = FxHashMap::default();
        parents.insert(TypeTag::NUMBER, TypeTag::VALUE);
        parents.insert(TypeTag::INT, TypeTag::NUMBER);
        parents.insert(TypeTag::FLOAT, TypeTag::NUMBER);
        parents.insert(TypeTag::STR, TypeTag::VALUE);
        parents.insert(TypeTag::BOOL, TypeTag::VALUE);
        parents.insert(TypeTag::UNIT, TypeTag::VALUE);
        parents.insert(TypeTag::TUPLE, TypeTag::VALUE);
        parents.insert(TypeTag::TYPE, TypeTag::VALUE);
        Self { parents }
    }

    /// Declares `parent` as the parent of `child`, replacing any previous
    /// declaration.
    pub fn register(&mut self, child: TypeTag, parent: TypeTag) {
        self.parents.insert(child, parent);
    }

    /// The declared parent of `tag`, if any.
    pub fn parent(&self, tag: TypeTag) -> Option<TypeTag> {
        self.parents.get(&tag).copied()
    }

    /// Whether `tag` derives from `ancestor`, reflexively and
    /// transitively over parent edges.
    pub fn derives_from(&self, tag: TypeTag, ancestor: TypeTag) -> bool {
        if tag == ancestor {
            return true;
        }
        let mut current = tag;
        let mut depth = 0;
        while let Some(parent) = self.parent(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
            depth += 1;
            if depth > MAX_CHAIN_DEPTH {
                return false;
            }
        }
        false
    }
}

impl Default for TypeHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn builtin_chain_derives() {
        let hierarchy = TypeHierarchy::new();
        assert!(hierarchy.derives_from(TypeTag::INT, TypeTag::NUMBER));
        assert!(hierarchy.derives_from(TypeTag::INT, TypeTag::VALUE));
        assert!(hierarchy.derives_from(TypeTag::FLOAT, TypeTag::NUMBER));
        assert!(hierarchy.derives_from(TypeTag::STR, TypeTag::VALUE));
        assert!(!hierarchy.derives_from(TypeTag::STR, TypeTag::NUMBER));
    }

    #[test]
    fn derivation_is_not_symmetric() {
        let hierarchy = TypeHierarchy::new();
        assert!(!hierarchy.derives_from(TypeTag::VALUE, TypeTag::INT));
        assert!(!hierarchy.derives_from(TypeTag::NUMBER, TypeTag::INT));
    }

    #[test]
    fn unregistered_tags_are_only_reflexive() {
        let hierarchy = TypeHierarchy::new();
        let orphan = TypeTag::new("orphan");
        assert!(hierarchy.derives_from(orphan, orphan));
        assert!(!hierarchy.derives_from(orphan, TypeTag::VALUE));
    }

    #[test]
    fn reparenting_replaces_the_edge() {
        let mut hierarchy = TypeHierarchy::new();
        let iterable = TypeTag::new("iterable");
        hierarchy.register(iterable, TypeTag::VALUE);
        hierarchy.register(TypeTag::STR, iterable);

        assert_eq!(hierarchy.parent(TypeTag::STR), Some(iterable));
        assert!(hierarchy.derives_from(TypeTag::STR, iterable));
        assert!(hierarchy.derives_from(TypeTag::STR, TypeTag::VALUE));
    }

    #[test]
    fn cyclic_registration_terminates() {
        let mut hierarchy = TypeHierarchy::new();
        let a = TypeTag::new("a");
        let b = TypeTag::new("b");
        hierarchy.register(a, b);
        hierarchy.register(b, a);

        assert!(!hierarchy.derives_from(a, TypeTag::VALUE));
        assert!(hierarchy.derives_from(a, b));
        assert!(hierarchy.derives_from(b, a));
    }

    const TAGS: [TypeTag; 10] = [
        TypeTag::new("t0"),
        TypeTag::new("t1"),
        TypeTag::new("t2"),
        TypeTag::new("t3"),
        TypeTag::new("t4"),
        TypeTag::new("t5"),
        TypeTag::new("t6"),
        TypeTag::new("t7"),
        TypeTag::new("t8"),
        TypeTag::new("t9"),
    ];

    fn chain() -> TypeHierarchy {
        let mut hierarchy = TypeHierarchy::new();
        for i in 0..TAGS.len() - 1 {
            hierarchy.register(TAGS[i], TAGS[i + 1]);
        }
        hierarchy
    }

    proptest! {
        #[test]
        fn derivation_is_reflexive(i in 0usize..10) {
            prop_assert!(chain().derives_from(TAGS[i], TAGS[i]));
        }

        #[test]
        fn derivation_matches_chain_order(i in 0usize..10, j in 0usize..10) {
            prop_assert_eq!(chain().derives_from(TAGS[i], TAGS[j]), i <= j);
        }

        #[test]
        fn derivation_is_transitive(i in 0usize..10, j in 0usize..10, k in 0usize..10) {
            let hierarchy = chain();
            if hierarchy.derives_from(TAGS[i], TAGS[j]) && hierarchy.derives_from(TAGS[j], TAGS[k]) {
                prop_assert!(hierarchy.derives_from(TAGS[i], TAGS[k]));
            }
        }
    }
}
