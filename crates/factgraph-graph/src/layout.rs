//! Initial node placement
//!
//! Positions are hints for whatever renders the graph. They never take part
//! in node identity, so any [`Layout`] can be swapped in.

use factgraph_domain::{NodeType, Position};

/// Where a node sits relative to the record that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Index of the record among records that produced a claim node
    pub record: usize,

    /// Type of the node being placed
    pub node_type: NodeType,

    /// Index of the reference within its list (0 for the claim itself)
    pub item: usize,
}

/// Assigns starting coordinates to newly created nodes
pub trait Layout {
    /// Position for a node created at `slot`
    fn place(&mut self, slot: Slot) -> Position;
}

/// Horizontal band per record: sources above, the claim on the line, evidence below
///
/// Bands are `band_height` apart and rows sit at -`row_offset`, 0 and
/// +`row_offset` within a band, so as long as `2 * row_offset < band_height`
/// no two slots share coordinates.
#[derive(Debug, Clone)]
pub struct BandLayout {
    /// Vertical distance between consecutive records
    pub band_height: f64,

    /// Vertical distance of source/evidence rows from the claim row
    pub row_offset: f64,

    /// Horizontal distance between neighbors in a row
    pub spacing: f64,
}

impl Default for BandLayout {
    fn default() -> Self {
        Self {
            band_height: 40.0,
            row_offset: 10.0,
            spacing: 15.0,
        }
    }
}

impl Layout for BandLayout {
    fn place(&mut self, slot: Slot) -> Position {
        let base_y = slot.record as f64 * self.band_height;
        let x = slot.item as f64 * self.spacing;
        match slot.node_type {
            NodeType::Source => Position::new(x + self.spacing, base_y - self.row_offset),
            NodeType::Evidence => Position::new(x + self.spacing, base_y + self.row_offset),
            NodeType::Claim | NodeType::Clue => Position::new(0.0, base_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_band_layout_never_overlaps() {
        let mut layout = BandLayout::default();
        let mut seen = HashSet::new();

        for record in 0..20 {
            let claim = layout.place(Slot { record, node_type: NodeType::Claim, item: 0 });
            assert!(seen.insert((claim.x.to_bits(), claim.y.to_bits())));

            for item in 0..15 {
                for node_type in [NodeType::Source, NodeType::Evidence] {
                    let p = layout.place(Slot { record, node_type, item });
                    assert!(seen.insert((p.x.to_bits(), p.y.to_bits())), "overlap at {:?}", p);
                }
            }
        }
    }
}
