use std::sync::atomic::{AtomicU32, Ordering};

/// The globally shared incumbent value, updated with a single compare-and-
/// swap per improvement.
///
/// For plain max clique the value is the clique size. The labelled solver
/// packs `size << 16 | !cost`, so that "bigger size, then smaller cost"
/// collapses into plain numeric comparison and the lexicographic update is
/// still one CAS.
#[derive(Default)]
pub struct AtomicIncumbent(AtomicU32);

impl AtomicIncumbent {
    pub fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    /// Raises the incumbent to `value` if it is a strict improvement.
    pub fn update(&self, value: u32) -> bool {
        let mut current = self.0.load(Ordering::SeqCst);
        loop {
            if value <= current {
                return false;
            }
            match self
                .0
                .compare_exchange(current, value, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return true,
                Err(seen) => current = seen,
            }
        }
    }

    /// Enumeration variant: reports whether `value` beats the incumbent, and
    /// parks the stored value one below so that further hits of the same size
    /// keep reporting.
    pub fn beaten_by(&self, value: u32) -> bool {
        let mut current = self.0.load(Ordering::SeqCst);
        loop {
            if value <= current {
                return false;
            }
            match self.0.compare_exchange(
                current,
                value - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return true,
                Err(seen) => current = seen,
            }
        }
    }
}

/// Packs a labelled-clique objective for [`AtomicIncumbent`].
pub fn pack_labelled(size: u32, cost: u32) -> u32 {
    (size << 16) | (!cost & 0xffff)
}

/// Recovers `(size, cost)` from the packed encoding.
pub fn unpack_labelled(value: u32) -> (u32, u32) {
    (value >> 16, !value & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_is_monotone() {
        let incumbent = AtomicIncumbent::new();
        assert!(incumbent.update(3));
        assert!(!incumbent.update(3));
        assert!(!incumbent.update(2));
        assert!(incumbent.update(5));
        assert_eq!(incumbent.get(), 5);
    }

    #[test]
    fn beaten_by_reports_repeats_of_the_same_size() {
        let incumbent = AtomicIncumbent::new();
        assert!(incumbent.beaten_by(2));
        assert!(incumbent.beaten_by(2));
        assert!(!incumbent.beaten_by(1));
        assert!(incumbent.beaten_by(3));
        assert_eq!(incumbent.get(), 2);
    }

    #[test]
    fn labelled_packing_orders_lexicographically() {
        // bigger size always wins
        assert!(pack_labelled(3, 10) > pack_labelled(2, 0));
        // same size, smaller cost wins
        assert!(pack_labelled(3, 2) > pack_labelled(3, 5));
        assert_eq!(unpack_labelled(pack_labelled(7, 3)), (7, 3));
        assert_eq!(unpack_labelled(pack_labelled(0, 0)), (0, 0));
    }
}
