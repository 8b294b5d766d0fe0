// Snapshot comparison

//! Address-set comparison and the applied snapshot
//!
//! [`set_equal`] decides whether a fresh reading differs from what is on disk.
//! It compares lengths and then checks that every element of the second list
//! occurs in the first. Lists with duplicates are not counted element by
//! element, so `["a", "b"]` compares equal to `["a", "a"]` while the reverse
//! does not. Readings from the interface table never repeat an address on one
//! interface, so this only matters for hand-built lists.

use crate::types::{HostIdentity, InterfaceAddresses};
use std::collections::HashSet;

/// Length check followed by membership of every `b` element in `a`
pub fn set_equal(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let members: HashSet<&str> = a.iter().map(String::as_str).collect();
    b.iter().all(|addr| members.contains(addr.as_str()))
}

/// What was last rendered into the output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSnapshot {
    /// Addresses used for the last successful write
    pub addresses: InterfaceAddresses,
    /// Identity used for the last successful write
    pub identity: HostIdentity,
}

impl AppliedSnapshot {
    /// Whether `current` differs from the applied addresses in either family
    pub fn differs_from(&self, current: &InterfaceAddresses) -> bool {
        !set_equal(&self.addresses.v4, &current.v4) || !set_equal(&self.addresses.v6, &current.v6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn snapshot(v4: &[&str], v6: &[&str]) -> AppliedSnapshot {
        AppliedSnapshot {
            addresses: InterfaceAddresses::new(v4.iter().copied(), v6.iter().copied()),
            identity: HostIdentity::from_hostname("host"),
        }
    }

    #[test]
    fn test_set_equal_reflexive() {
        for items in [&[][..], &["a"][..], &["10.0.0.5", "10.0.0.6", "fd00::1"][..]] {
            let s = list(items);
            assert!(set_equal(&s, &s));
        }
    }

    #[test]
    fn test_set_equal_symmetric() {
        let pairs = [
            (list(&["a", "b"]), list(&["b", "a"])),
            (list(&["a", "b"]), list(&["a", "c"])),
            (list(&["a"]), list(&["a", "b"])),
            (list(&[]), list(&[])),
        ];

        for (a, b) in &pairs {
            assert_eq!(set_equal(a, b), set_equal(b, a));
        }
    }

    #[test]
    fn test_set_equal_fixed_cases() {
        assert!(set_equal(&list(&["a"]), &list(&["a"])));
        assert!(!set_equal(&list(&["a", "b"]), &list(&["a", "c"])));
        assert!(!set_equal(&list(&["a"]), &list(&["a", "b"])));
    }

    #[test]
    fn test_set_equal_order_insensitive() {
        assert!(set_equal(
            &list(&["10.0.0.5", "10.0.0.6"]),
            &list(&["10.0.0.6", "10.0.0.5"])
        ));
    }

    #[test]
    fn test_set_equal_duplicate_limitation() {
        // Duplicates are not counted: only membership of `b` in `a` is checked
        assert!(set_equal(&list(&["a", "b"]), &list(&["a", "a"])));
        assert!(!set_equal(&list(&["a", "a"]), &list(&["a", "b"])));
    }

    #[test]
    fn test_differs_from_unchanged() {
        let applied = snapshot(&["10.0.0.5"], &["fd00::5"]);
        let current = InterfaceAddresses::new(["10.0.0.5"], ["fd00::5"]);
        assert!(!applied.differs_from(&current));
    }

    #[test]
    fn test_differs_from_v4_change() {
        let applied = snapshot(&["10.0.0.5"], &["fd00::5"]);
        let current = InterfaceAddresses::new(["10.0.0.6"], ["fd00::5"]);
        assert!(applied.differs_from(&current));
    }

    #[test]
    fn test_differs_from_v6_change() {
        let applied = snapshot(&["10.0.0.5"], &[]);
        let current = InterfaceAddresses::new(["10.0.0.5"], ["fd00::5"]);
        assert!(applied.differs_from(&current));
    }
}
