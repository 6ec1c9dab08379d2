// ============================================================================
// slotted - Class
// The ordered member layout shared by all instances of one object type
// ============================================================================

use std::rc::Rc;

use crate::core::SlottedError;
use crate::store::member::Member;

// =============================================================================
// CLASS
// =============================================================================

/// The member layout for one object type.
///
/// A class owns its members in declaration order and fixes the slot count
/// for every instance: `member_count()` slots, member `i` driving slot `i`.
/// Classes are immutable after construction and shared between instances
/// via `Rc`.
///
/// Name lookup is a linear scan over the member list. Classes are small,
/// so a scan over one contiguous vector beats a hash map on both memory
/// and locality, the same trade the sorted connection table makes.
pub struct Class {
    name: String,
    members: Vec<(String, Rc<dyn Member>)>,
}

impl Class {
    /// Build a class from named members in declaration order.
    ///
    /// Fails with [`SlottedError::BadLayout`] unless the members' slot
    /// indices form a permutation of `0..members.len()`. That invariant is
    /// what lets every later slot access skip bounds and identity checks.
    pub fn new(
        name: impl Into<String>,
        members: Vec<(String, Rc<dyn Member>)>,
    ) -> Result<Self, SlottedError> {
        let name = name.into();
        let mut seen = vec![false; members.len()];
        for (attr, member) in &members {
            let index = member.index();
            if index >= members.len() {
                return Err(SlottedError::BadLayout {
                    class: name,
                    detail: format!(
                        "member '{attr}' has index {index}, expected < {}",
                        members.len()
                    ),
                });
            }
            if seen[index] {
                return Err(SlottedError::BadLayout {
                    class: name,
                    detail: format!("member '{attr}' reuses index {index}"),
                });
            }
            seen[index] = true;
        }
        Ok(Self { name, members })
    }

    /// The class name, as used by the registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of members, and therefore the slot count of every instance.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Look up a member by attribute name.
    pub fn member(&self, name: &str) -> Option<&Rc<dyn Member>> {
        self.members
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, member)| member)
    }

    /// Iterate `(name, member)` pairs in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Rc<dyn Member>)> {
        self.members
            .iter()
            .map(|(attr, member)| (attr.as_str(), member))
    }
}

impl std::fmt::Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("members", &self.members.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
