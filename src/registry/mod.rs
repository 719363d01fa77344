//! Identity registries used while building a mesh
//!
//! A tessellation reports the same corner once per incident edge, and the
//! same edge once per adjacent cell. The registries collapse those repeats
//! into one canonical vertex or edge with a stable sequential index.
//!
//! Both registries are open-addressed hash tables over a fixed-capacity
//! arena: the table is sized at 1.5x the expected entry count and probed
//! linearly. They are created for one build and discarded afterwards.

mod edges;
mod vertices;

pub use edges::EdgeRegistry;
pub use vertices::VertexRegistry;

/// Slot count for a table expecting `max` entries
///
/// Always larger than `max`, so a probe for a new key finds an empty slot
/// even when the arena is full.
fn table_size(max: usize) -> usize {
    (max * 3 / 2).max(max + 1)
}

/// Next slot in a wrapping linear probe
#[inline]
fn next_slot(slot: usize, table_size: usize) -> usize {
    if slot + 1 == table_size {
        0
    } else {
        slot + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(table_size(0), 1);
        assert_eq!(table_size(1), 2);
        assert_eq!(table_size(2), 3);
        assert_eq!(table_size(1000), 1500);
    }

    #[test]
    fn test_next_slot_wraps() {
        assert_eq!(next_slot(0, 3), 1);
        assert_eq!(next_slot(2, 3), 0);
        assert_eq!(next_slot(0, 1), 0);
    }
}
