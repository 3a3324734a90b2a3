//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items one per line and prints a notice when the
//! collection is empty.

use std::{fmt, ops::Index};

use crate::models::{Marker, TripListing};

/// Newtype wrapper for displaying the trip index.
///
/// # Examples
///
/// ```rust
/// use waymark_core::{display::TripSummaries, models::TripListing};
///
/// let trips = TripSummaries(vec![TripListing {
///     id: "alpine-loop".to_string(),
///     title: "Alpine Loop".to_string(),
///     planned_items: 0,
///     updated_at: None,
/// }]);
/// assert!(trips.to_string().contains("Alpine Loop"));
/// ```
#[derive(Debug)]
pub struct TripSummaries(pub Vec<TripListing>);

impl TripSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&TripListing> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripListing> {
        self.0.iter()
    }
}

impl Index<usize> for TripSummaries {
    type Output = TripListing;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for TripSummaries {
    type Item = TripListing;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripSummaries {
    type Item = &'a TripListing;
    type IntoIter = std::slice::Iter<'a, TripListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TripSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No trips found.")
        } else {
            for trip in &self.0 {
                writeln!(f, "{trip}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the map markers of a trip.
#[derive(Debug)]
pub struct Markers(pub Vec<Marker>);

impl Markers {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Markers {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Markers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No located sections.")
        } else {
            for marker in &self.0 {
                writeln!(f, "{marker}")?;
            }
            Ok(())
        }
    }
}
