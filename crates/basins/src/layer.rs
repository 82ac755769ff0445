//! Watershed polygons, layers, and containment lookup.

use geo::{Intersects, MultiPolygon, Point};

use crate::error::BasinError;

/// One hydrologic unit: an identifier, a display name, and its boundary.
///
/// Hydrologic-unit codes are fixed-width digit strings, so lexicographic
/// identifier order matches numeric order.
#[derive(Debug, Clone, PartialEq)]
pub struct Watershed {
    id: String,
    name: String,
    boundary: MultiPolygon<f64>,
}

impl Watershed {
    /// Creates a watershed from its code, name, and boundary geometry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, boundary: MultiPolygon<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            boundary,
        }
    }

    /// The hydrologic-unit code.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The boundary geometry.
    pub fn boundary(&self) -> &MultiPolygon<f64> {
        &self.boundary
    }
}

/// One resolution of watershed boundaries, sorted by identifier.
///
/// Sorting at construction is what makes [`WatershedLayer::locate`]
/// deterministic: the first containing watershed in scan order is always
/// the one with the smallest identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct WatershedLayer {
    label: String,
    watersheds: Vec<Watershed>,
}

impl WatershedLayer {
    /// Builds a layer, sorting its watersheds by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BasinError::InvalidLayer`] if the layer is empty or two
    /// watersheds share an identifier.
    pub fn new(
        label: impl Into<String>,
        mut watersheds: Vec<Watershed>,
    ) -> Result<Self, BasinError> {
        let label = label.into();
        if watersheds.is_empty() {
            return Err(BasinError::InvalidLayer {
                label,
                reason: "no watersheds".to_string(),
            });
        }
        watersheds.sort_by(|a, b| a.id.cmp(&b.id));
        for pair in watersheds.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(BasinError::InvalidLayer {
                    label,
                    reason: format!("duplicate watershed id '{}'", pair[0].id),
                });
            }
        }
        Ok(Self { label, watersheds })
    }

    /// The layer label (e.g. `huc6`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of watersheds in the layer.
    pub fn len(&self) -> usize {
        self.watersheds.len()
    }

    /// Whether the layer has no watersheds (never true once constructed).
    pub fn is_empty(&self) -> bool {
        self.watersheds.is_empty()
    }

    /// The watersheds in identifier order.
    pub fn watersheds(&self) -> &[Watershed] {
        &self.watersheds
    }

    /// Looks up a watershed by identifier.
    pub fn get(&self, id: &str) -> Option<&Watershed> {
        self.watersheds
            .binary_search_by(|ws| ws.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.watersheds[i])
    }

    /// The watershed containing `point`, or `None` if every boundary misses
    /// it.
    ///
    /// Containment is boundary-inclusive; a point on a shared edge belongs
    /// to the containing watershed with the smallest identifier.
    pub fn locate(&self, point: &Point<f64>) -> Option<&Watershed> {
        self.watersheds
            .iter()
            .find(|ws| ws.boundary.intersects(point))
    }

    /// Like [`WatershedLayer::locate`], but an unassigned point is an error
    /// carrying the point and the layer label.
    pub fn assign(&self, point: &Point<f64>) -> Result<&Watershed, BasinError> {
        self.locate(point).ok_or_else(|| BasinError::NoContainingBasin {
            lon: point.x(),
            lat: point.y(),
            label: self.label.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon, point};

    /// Axis-aligned rectangle from (x0, y0) to (x1, y1).
    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![Polygon::new(
            LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        )])
    }

    fn two_square_layer() -> WatershedLayer {
        WatershedLayer::new(
            "huc6",
            vec![
                Watershed::new("170103", "East Fork", rect(1.0, 0.0, 2.0, 1.0)),
                Watershed::new("170102", "West Fork", rect(0.0, 0.0, 1.0, 1.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn layer_sorts_by_id() {
        let layer = two_square_layer();
        let ids: Vec<&str> = layer.watersheds().iter().map(Watershed::id).collect();
        assert_eq!(ids, vec!["170102", "170103"]);
    }

    #[test]
    fn empty_layer_rejected() {
        let err = WatershedLayer::new("huc6", vec![]).unwrap_err();
        assert_eq!(
            err,
            BasinError::InvalidLayer {
                label: "huc6".to_string(),
                reason: "no watersheds".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = WatershedLayer::new(
            "huc6",
            vec![
                Watershed::new("170102", "A", rect(0.0, 0.0, 1.0, 1.0)),
                Watershed::new("170102", "B", rect(1.0, 0.0, 2.0, 1.0)),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, BasinError::InvalidLayer { .. }));
    }

    #[test]
    fn get_by_id() {
        let layer = two_square_layer();
        assert_eq!(layer.get("170103").unwrap().name(), "East Fork");
        assert!(layer.get("999999").is_none());
    }

    #[test]
    fn interior_point_locates() {
        let layer = two_square_layer();
        let ws = layer.locate(&point!(x: 1.5, y: 0.5)).unwrap();
        assert_eq!(ws.id(), "170103");
    }

    #[test]
    fn outside_point_is_none() {
        let layer = two_square_layer();
        assert!(layer.locate(&point!(x: 5.0, y: 5.0)).is_none());
    }

    #[test]
    fn boundary_point_is_inside() {
        let layer = two_square_layer();
        // On the outer edge of the western square only.
        let ws = layer.locate(&point!(x: 0.0, y: 0.5)).unwrap();
        assert_eq!(ws.id(), "170102");
    }

    #[test]
    fn shared_edge_resolves_to_smallest_id() {
        let layer = two_square_layer();
        // x = 1.0 is the edge both squares share.
        let ws = layer.locate(&point!(x: 1.0, y: 0.5)).unwrap();
        assert_eq!(ws.id(), "170102");
    }

    #[test]
    fn assign_reports_unassigned_point() {
        let layer = two_square_layer();
        let err = layer.assign(&point!(x: -110.5, y: 43.9)).unwrap_err();
        assert_eq!(
            err,
            BasinError::NoContainingBasin {
                lon: -110.5,
                lat: 43.9,
                label: "huc6".to_string(),
            }
        );
    }

    #[test]
    fn multipolygon_watershed() {
        // A watershed split into two disjoint lobes still contains points
        // in either lobe.
        let lobes = MultiPolygon::new(vec![
            Polygon::new(
                LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
                vec![],
            ),
            Polygon::new(
                LineString::from(vec![(3.0, 0.0), (4.0, 0.0), (4.0, 1.0), (3.0, 1.0), (3.0, 0.0)]),
                vec![],
            ),
        ]);
        let layer =
            WatershedLayer::new("huc8", vec![Watershed::new("17010101", "Lobes", lobes)]).unwrap();
        assert!(layer.locate(&point!(x: 0.5, y: 0.5)).is_some());
        assert!(layer.locate(&point!(x: 3.5, y: 0.5)).is_some());
        assert!(layer.locate(&point!(x: 2.0, y: 0.5)).is_none());
    }
}
