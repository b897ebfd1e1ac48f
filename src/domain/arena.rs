//! Arena zones and point classification.

use std::cmp::Reverse;

use super::basis::Vector2;
use super::shapes::Rect;

/// Named zone categories of the competition arena.
///
/// `TargetBerm` belongs to the training variant's layout and is not
/// part of [`ArenaLayout::competition`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum ZoneKind {
    Starting,
    Excavation,
    Obstacle,
    Construction,
    TargetBerm,
    Column,
    None,
}

/// Axis-aligned scoring region. Zones are immutable once the layout is
/// built; overlaps are allowed and resolved by priority.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Zone {
    bounds: Rect,
    priority: i32,
    kind: ZoneKind,
}

impl Zone {
    pub const fn new(bounds: Rect, priority: i32, kind: ZoneKind) -> Self {
        Self {
            bounds,
            priority,
            kind,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn contains(&self, point: Vector2) -> bool {
        self.bounds.contains(point)
    }
}

/// Priority-ordered list of scoring zones.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaLayout {
    zones: Vec<Zone>,
}

impl ArenaLayout {
    pub fn new(mut zones: Vec<Zone>) -> Self {
        zones.sort_by_key(|zone| Reverse(zone.priority()));
        Self { zones }
    }

    /// Competition arena layout, 9.88 m x 5.0 m: starting zone in the
    /// top-left, excavation below it, the obstacle field in the middle,
    /// the construction zone at the far right and a keep-clear column
    /// in the center of the obstacle field.
    pub fn competition() -> Self {
        Self::new(vec![
            Zone::new(Rect::new(0.0, 2.0, 3.0, 5.0), 3, ZoneKind::Starting),
            Zone::new(Rect::new(0.0, 2.5, 0.0, 3.0), 1, ZoneKind::Excavation),
            Zone::new(Rect::new(2.5, 6.88, 0.0, 5.0), 0, ZoneKind::Obstacle),
            Zone::new(Rect::new(6.88, 9.88, 0.0, 1.5), 2, ZoneKind::Construction),
            Zone::new(Rect::new(3.19, 3.69, 2.25, 2.75), 4, ZoneKind::Column),
        ])
    }

    /// Zones in descending priority order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Highest-priority zone of the given kind, if the layout has one.
    pub fn zone_of(&self, kind: ZoneKind) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.kind() == kind)
    }

    /// Highest-priority zone containing the point, inclusive on all
    /// four edges; `ZoneKind::None` when no zone matches. Pure function
    /// of the layout and the point.
    pub fn classify(&self, point: Vector2) -> ZoneKind {
        self.zones
            .iter()
            .find(|zone| zone.contains(point))
            .map(|zone| zone.kind())
            .unwrap_or(ZoneKind::None)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::starting(Vector2::new(1.0, 4.0), ZoneKind::Starting)]
    #[case::construction(Vector2::new(7.0, 0.5), ZoneKind::Construction)]
    #[case::excavation(Vector2::new(1.0, 1.0), ZoneKind::Excavation)]
    #[case::obstacle(Vector2::new(4.5, 4.0), ZoneKind::Obstacle)]
    #[case::column(Vector2::new(3.44, 2.5), ZoneKind::Column)]
    #[case::none(Vector2::new(9.0, 4.0), ZoneKind::None)]
    fn test_competition_classification(#[case] point: Vector2, #[case] expected: ZoneKind) {
        assert_eq!(ArenaLayout::competition().classify(point), expected);
    }

    #[test]
    fn test_classification_is_inclusive_on_edges() {
        let layout = ArenaLayout::competition();
        // (2.5, 3.0) is the shared corner of excavation and the
        // obstacle field; excavation has the higher priority.
        assert_eq!(layout.classify(Vector2::new(2.5, 3.0)), ZoneKind::Excavation);
        assert_eq!(layout.classify(Vector2::new(0.0, 5.0)), ZoneKind::Starting);
    }

    #[test]
    fn test_priority_resolves_overlap() {
        let layout = ArenaLayout::new(vec![
            Zone::new(Rect::new(0.0, 4.0, 0.0, 4.0), 1, ZoneKind::Excavation),
            Zone::new(Rect::new(1.0, 3.0, 1.0, 3.0), 2, ZoneKind::Construction),
        ]);
        let point = Vector2::new(2.0, 2.0);
        assert_eq!(layout.classify(point), ZoneKind::Construction);
        assert_eq!(layout.classify(Vector2::new(0.5, 0.5)), ZoneKind::Excavation);
    }

    #[test]
    fn test_zone_order_independent_of_construction_order() {
        let a = ArenaLayout::new(vec![
            Zone::new(Rect::new(0.0, 1.0, 0.0, 1.0), 1, ZoneKind::Starting),
            Zone::new(Rect::new(0.0, 1.0, 0.0, 1.0), 2, ZoneKind::Column),
        ]);
        let b = ArenaLayout::new(vec![
            Zone::new(Rect::new(0.0, 1.0, 0.0, 1.0), 2, ZoneKind::Column),
            Zone::new(Rect::new(0.0, 1.0, 0.0, 1.0), 1, ZoneKind::Starting),
        ]);
        assert_eq!(a.zones(), b.zones());
        assert_eq!(a.classify(Vector2::new(0.5, 0.5)), ZoneKind::Column);
    }

    #[test]
    fn test_zone_of() {
        let layout = ArenaLayout::competition();
        let obstacle_zone = layout.zone_of(ZoneKind::Obstacle).unwrap();
        assert_eq!(obstacle_zone.bounds(), Rect::new(2.5, 6.88, 0.0, 5.0));
        assert!(layout.zone_of(ZoneKind::TargetBerm).is_none());
    }
}
