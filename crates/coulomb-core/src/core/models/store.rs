use super::charge::Charge;
use super::ids::ChargeId;
use crate::core::sampling::grid::Viewport;
use nalgebra::Point2;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

pub const DEFAULT_CAPACITY: usize = 5;
pub const DEFAULT_MAGNITUDE_NC: f64 = 10.0;
pub const DEFAULT_POSITION: (f64, f64) = (150.0, 150.0);
pub const DEFAULT_MARKER_SIZE: f64 = 20.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum StoreError {
    #[error("Charge {0} not found in the store")]
    ChargeNotFound(ChargeId),
    #[error("Charge id {0} appears more than once")]
    DuplicateId(ChargeId),
    #[error("Store holds at most {capacity} charges, got {requested}")]
    CapacityExceeded { capacity: usize, requested: usize },
    #[error("No charge ids are left after {0}")]
    IdSpaceExhausted(ChargeId),
}

/// Parameters governing how a [`ChargeStore`] creates and bounds its charges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSettings {
    /// Maximum number of charges held at once.
    pub capacity: usize,
    /// Magnitude (nC) given to charges created by [`ChargeStore::add`].
    pub default_magnitude: f64,
    /// Position given to charges created by [`ChargeStore::add`].
    pub default_position: Point2<f64>,
    /// Edge length of the square marker drawn for a charge; bounds dragging.
    pub marker_size: f64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_magnitude: DEFAULT_MAGNITUDE_NC,
            default_position: Point2::new(DEFAULT_POSITION.0, DEFAULT_POSITION.1),
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

/// An ordered, bounded collection of charges.
///
/// Insertion order is preserved across removals. Ids come from a counter that only
/// ever grows, so an id is never reused for a different charge, and gaps left by
/// removals are not renumbered.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeStore {
    charges: Vec<Charge>,
    next_id: u64,
    settings: StoreSettings,
}

impl Default for ChargeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargeStore {
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    pub fn with_settings(settings: StoreSettings) -> Self {
        Self {
            charges: Vec::with_capacity(settings.capacity),
            next_id: 1,
            settings,
        }
    }

    /// Builds a store from an externally supplied, ordered list of charges.
    ///
    /// The id counter resumes after the largest supplied id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExceeded`] if the list is longer than the
    /// configured capacity, [`StoreError::DuplicateId`] if two charges share an id, and
    /// [`StoreError::IdSpaceExhausted`] if the largest id leaves no successor.
    pub fn from_charges(settings: StoreSettings, charges: Vec<Charge>) -> Result<Self, StoreError> {
        if charges.len() > settings.capacity {
            return Err(StoreError::CapacityExceeded {
                capacity: settings.capacity,
                requested: charges.len(),
            });
        }

        let mut seen = HashSet::with_capacity(charges.len());
        for charge in &charges {
            if !seen.insert(charge.id) {
                return Err(StoreError::DuplicateId(charge.id));
            }
        }

        let next_id = match charges.iter().map(|c| c.id).max() {
            Some(last) => last
                .get()
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted(last))?,
            None => 1,
        };
        Ok(Self {
            charges,
            next_id,
            settings,
        })
    }

    #[inline]
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Appends a charge with the default magnitude and position.
    ///
    /// Returns `None` without touching the store when it is already full.
    pub fn add(&mut self) -> Option<ChargeId> {
        self.add_charge(self.settings.default_position, self.settings.default_magnitude)
    }

    /// Appends a charge with the given position and magnitude (nC).
    ///
    /// Returns `None` without touching the store when it is already full, or when the
    /// id counter has no successor left to hand out.
    pub fn add_charge(&mut self, position: Point2<f64>, magnitude: f64) -> Option<ChargeId> {
        if self.is_full() {
            debug!(
                capacity = self.settings.capacity,
                "Store is full, ignoring request to add a charge."
            );
            return None;
        }
        let id = ChargeId(self.next_id);
        let Some(next_id) = self.next_id.checked_add(1) else {
            debug!(%id, "Charge ids exhausted, ignoring request to add a charge.");
            return None;
        };
        self.next_id = next_id;
        self.charges.push(Charge::new(id, position, magnitude));
        debug!(%id, x = position.x, y = position.y, magnitude, "Added charge.");
        Some(id)
    }

    /// Removes a charge, keeping the order of the remaining ones.
    pub fn remove(&mut self, id: ChargeId) -> Option<Charge> {
        let index = self.charges.iter().position(|c| c.id == id)?;
        let removed = self.charges.remove(index);
        debug!(%id, "Removed charge.");
        Some(removed)
    }

    pub fn move_to(&mut self, id: ChargeId, position: Point2<f64>) -> Result<(), StoreError> {
        let charge = self.get_mut(id)?;
        charge.position = position;
        trace!(%id, x = position.x, y = position.y, "Moved charge.");
        Ok(())
    }

    /// Moves a charge as a drag gesture would, keeping its marker inside the viewport.
    ///
    /// Each coordinate becomes `max(0, min(extent - marker, v))`, so a viewport smaller
    /// than the marker pins the charge to the origin edge. Returns the position the
    /// charge landed on, or `None` if the viewport is not laid out yet, in which case
    /// the charge stays where it is.
    pub fn drag_to(
        &mut self,
        id: ChargeId,
        position: Point2<f64>,
        viewport: &Viewport,
    ) -> Result<Option<Point2<f64>>, StoreError> {
        if !viewport.is_known() {
            self.get_mut(id)?;
            trace!(%id, "Viewport unknown, ignoring drag.");
            return Ok(None);
        }
        let marker = self.settings.marker_size;
        let clamped = Point2::new(
            position.x.min(viewport.width - marker).max(0.0),
            position.y.min(viewport.height - marker).max(0.0),
        );
        self.move_to(id, clamped)?;
        Ok(Some(clamped))
    }

    pub fn set_magnitude(&mut self, id: ChargeId, magnitude: f64) -> Result<(), StoreError> {
        let charge = self.get_mut(id)?;
        charge.magnitude = magnitude;
        debug!(%id, magnitude, "Updated charge magnitude.");
        Ok(())
    }

    pub fn toggle_polarity(&mut self, id: ChargeId) -> Result<(), StoreError> {
        let charge = self.get_mut(id)?;
        charge.flip_polarity();
        debug!(%id, magnitude = charge.magnitude, "Toggled charge polarity.");
        Ok(())
    }

    pub fn get(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: ChargeId) -> Result<&mut Charge, StoreError> {
        self.charges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::ChargeNotFound(id))
    }

    /// The current charges in insertion order.
    #[inline]
    pub fn snapshot(&self) -> &[Charge] {
        &self.charges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Charge> {
        self.charges.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.charges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.charges.len() >= self.settings.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64, height: f64) -> Viewport {
        Viewport::new(width, height)
    }

    #[test]
    fn add_uses_default_magnitude_and_position() {
        let mut store = ChargeStore::new();
        let id = store.add().unwrap();
        let charge = store.get(id).unwrap();
        assert_eq!(charge.magnitude, 10.0);
        assert_eq!(charge.position, Point2::new(150.0, 150.0));
        assert_eq!(id, ChargeId(1));
    }

    #[test]
    fn add_beyond_capacity_is_a_no_op() {
        let mut store = ChargeStore::new();
        for _ in 0..DEFAULT_CAPACITY {
            assert!(store.add().is_some());
        }
        let before = store.clone();

        assert!(store.is_full());
        assert_eq!(store.add(), None);
        assert_eq!(store.add_charge(Point2::origin(), 1.0), None);
        assert_eq!(store, before);
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut store = ChargeStore::new();
        let a = store.add().unwrap();
        let b = store.add().unwrap();
        assert!(store.remove(b).is_some());
        let c = store.add().unwrap();

        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(c, ChargeId(3));
    }

    #[test]
    fn remove_preserves_insertion_order_of_the_rest() {
        let mut store = ChargeStore::new();
        let ids: Vec<_> = (0..4).map(|_| store.add().unwrap()).collect();
        store.remove(ids[1]).unwrap();

        let remaining: Vec<_> = store.iter().map(|c| c.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn remove_unknown_id_returns_none() {
        let mut store = ChargeStore::new();
        store.add();
        assert!(store.remove(ChargeId(42)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mutations_on_unknown_id_report_not_found() {
        let mut store = ChargeStore::new();
        let missing = ChargeId(9);
        assert_eq!(
            store.move_to(missing, Point2::origin()),
            Err(StoreError::ChargeNotFound(missing))
        );
        assert_eq!(
            store.set_magnitude(missing, 1.0),
            Err(StoreError::ChargeNotFound(missing))
        );
        assert_eq!(
            store.toggle_polarity(missing),
            Err(StoreError::ChargeNotFound(missing))
        );
    }

    #[test]
    fn toggle_polarity_and_set_magnitude_update_in_place() {
        let mut store = ChargeStore::new();
        let id = store.add().unwrap();
        store.toggle_polarity(id).unwrap();
        assert_eq!(store.get(id).unwrap().magnitude, -10.0);
        store.set_magnitude(id, 2.5).unwrap();
        assert_eq!(store.get(id).unwrap().magnitude, 2.5);
    }

    #[test]
    fn drag_to_clamps_marker_inside_viewport() {
        let mut store = ChargeStore::new();
        let id = store.add().unwrap();
        let view = viewport(300.0, 200.0);

        let placed = store.drag_to(id, Point2::new(500.0, -40.0), &view).unwrap();
        assert_eq!(placed, Some(Point2::new(280.0, 0.0)));
        assert_eq!(store.get(id).unwrap().position, Point2::new(280.0, 0.0));

        let placed = store.drag_to(id, Point2::new(120.5, 60.0), &view).unwrap();
        assert_eq!(placed, Some(Point2::new(120.5, 60.0)));
    }

    #[test]
    fn drag_to_in_viewport_smaller_than_marker_pins_to_zero() {
        let mut store = ChargeStore::new();
        let id = store.add().unwrap();
        let placed = store
            .drag_to(id, Point2::new(8.0, 8.0), &viewport(10.0, 10.0))
            .unwrap();
        assert_eq!(placed, Some(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn drag_before_layout_leaves_the_charge_in_place() {
        let mut store = ChargeStore::new();
        let id = store.add().unwrap();

        let placed = store
            .drag_to(id, Point2::new(160.0, 170.0), &Viewport::default())
            .unwrap();
        assert_eq!(placed, None);
        assert_eq!(store.get(id).unwrap().position, Point2::new(150.0, 150.0));

        assert_eq!(
            store.drag_to(ChargeId(7), Point2::origin(), &Viewport::default()),
            Err(StoreError::ChargeNotFound(ChargeId(7)))
        );
    }

    #[test]
    fn from_charges_resumes_id_counter_after_largest_id() {
        let charges = vec![
            Charge::new(ChargeId(4), Point2::origin(), 1.0),
            Charge::new(ChargeId(2), Point2::new(1.0, 0.0), -1.0),
        ];
        let mut store = ChargeStore::from_charges(StoreSettings::default(), charges).unwrap();
        assert_eq!(store.add(), Some(ChargeId(5)));
        let order: Vec<_> = store.iter().map(|c| c.id.get()).collect();
        assert_eq!(order, vec![4, 2, 5]);
    }

    #[test]
    fn largest_possible_id_leaves_no_successor() {
        let last = vec![Charge::new(ChargeId(u64::MAX), Point2::origin(), 1.0)];
        assert_eq!(
            ChargeStore::from_charges(StoreSettings::default(), last),
            Err(StoreError::IdSpaceExhausted(ChargeId(u64::MAX)))
        );
    }

    #[test]
    fn add_refuses_once_the_counter_cannot_advance() {
        let near_end = vec![Charge::new(ChargeId(u64::MAX - 1), Point2::origin(), 1.0)];
        let mut store = ChargeStore::from_charges(StoreSettings::default(), near_end).unwrap();
        let before = store.clone();

        assert_eq!(store.add(), None);
        assert_eq!(store, before);
        assert!(!store.is_full());
    }

    #[test]
    fn from_charges_rejects_duplicates_and_overflow() {
        let dup = vec![
            Charge::new(ChargeId(1), Point2::origin(), 1.0),
            Charge::new(ChargeId(1), Point2::new(1.0, 1.0), 1.0),
        ];
        assert_eq!(
            ChargeStore::from_charges(StoreSettings::default(), dup),
            Err(StoreError::DuplicateId(ChargeId(1)))
        );

        let settings = StoreSettings {
            capacity: 1,
            ..StoreSettings::default()
        };
        let two = vec![
            Charge::new(ChargeId(1), Point2::origin(), 1.0),
            Charge::new(ChargeId(2), Point2::new(1.0, 1.0), 1.0),
        ];
        assert_eq!(
            ChargeStore::from_charges(settings, two),
            Err(StoreError::CapacityExceeded {
                capacity: 1,
                requested: 2
            })
        );
    }
}
