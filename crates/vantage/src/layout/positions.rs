//! Layout output types.

use vantage_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

/// The computed location of one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    node_id: Id,
    point: Point,
}

impl Position {
    pub fn new(node_id: Id, point: Point) -> Self {
        Self { node_id, point }
    }

    /// Returns the identifier of the positioned node
    pub fn node_id(&self) -> Id {
        self.node_id
    }

    /// Returns the node location
    pub fn point(&self) -> Point {
        self.point
    }
}

/// One position per node, in node insertion order.
///
/// Equality is order-sensitive, which is what reproducibility checks need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positions {
    entries: Vec<Position>,
}

impl Positions {
    /// Creates an empty position list
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the location of `node_id`, if it was positioned
    pub fn get(&self, node_id: Id) -> Option<Point> {
        self.entries
            .iter()
            .find(|position| position.node_id == node_id)
            .map(Position::point)
    }

    /// Iterates over positions in node insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.entries.iter()
    }

    /// Returns the number of positioned nodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no node was positioned
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the bounding box of all positions, or `None` when empty
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.entries.iter().map(Position::point))
    }
}

impl FromIterator<Position> for Positions {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Positions {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_bounds() {
        let positions: Positions = [
            Position::new(Id::new("left"), Point::new(-2.0, 1.0)),
            Position::new(Id::new("right"), Point::new(3.0, -1.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(positions.len(), 2);
        assert_eq!(positions.get(Id::new("right")), Some(Point::new(3.0, -1.0)));
        assert_eq!(positions.get(Id::new("absent")), None);

        let bounds = positions.bounds().unwrap();
        assert_eq!(bounds.width(), 5.0);
        assert_eq!(bounds.height(), 2.0);
    }

    #[test]
    fn test_empty_positions_have_no_bounds() {
        let positions = Positions::new();
        assert!(positions.is_empty());
        assert!(positions.bounds().is_none());
    }
}
