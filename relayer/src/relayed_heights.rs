use serde::{Deserialize, Serialize};

/// The cursor threaded through relay iterations. Each field is the highest
/// source height whose events have already been processed for that category;
/// `None` means scan from the beginning.
///
/// Losing the cursor is harmless: earlier heights are re-scanned and their
/// packets filtered out as already received.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayedHeights {
    pub packet_height_a: Option<u64>,
    pub packet_height_b: Option<u64>,
    pub ack_height_a: Option<u64>,
    pub ack_height_b: Option<u64>,
}

impl RelayedHeights {
    /// Advance each field to the maximum of its previous value and the
    /// height observed this iteration. Never moves backwards.
    pub fn advanced(
        self,
        packet_height_a: Option<u64>,
        packet_height_b: Option<u64>,
        ack_height_a: Option<u64>,
        ack_height_b: Option<u64>,
    ) -> Self {
        Self {
            packet_height_a: advance_field(self.packet_height_a, packet_height_a),
            packet_height_b: advance_field(self.packet_height_b, packet_height_b),
            ack_height_a: advance_field(self.ack_height_a, ack_height_a),
            ack_height_b: advance_field(self.ack_height_b, ack_height_b),
        }
    }
}

fn advance_field(previous: Option<u64>, observed: Option<u64>) -> Option<u64> {
    match (previous, observed) {
        (Some(prev), Some(seen)) => Some(prev.max(seen)),
        (Some(prev), None) => Some(prev),
        (None, seen) => seen,
    }
}

#[cfg(test)]
pub mod relayed_heights_tests {
    use super::RelayedHeights;

    #[test]
    pub fn advanced_is_monotonic() {
        let cursor = RelayedHeights {
            packet_height_a: Some(100),
            packet_height_b: None,
            ack_height_a: Some(50),
            ack_height_b: None,
        };

        let advanced = cursor.advanced(Some(90), Some(20), Some(60), None);

        assert_eq!(advanced.packet_height_a, Some(100));
        assert_eq!(advanced.packet_height_b, Some(20));
        assert_eq!(advanced.ack_height_a, Some(60));
        assert_eq!(advanced.ack_height_b, None);
    }

    #[test]
    pub fn advanced_from_empty_takes_observed() {
        let advanced = RelayedHeights::default().advanced(Some(5), None, Some(7), Some(9));

        assert_eq!(advanced.packet_height_a, Some(5));
        assert_eq!(advanced.packet_height_b, None);
        assert_eq!(advanced.ack_height_a, Some(7));
        assert_eq!(advanced.ack_height_b, Some(9));
    }
}
