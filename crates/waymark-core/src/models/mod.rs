//! Data models for trips and day plans.
//!
//! This module contains the domain models of the Waymark itinerary planner:
//! the trip content loaded from YAML files and the items a user schedules
//! onto days. Display implementations live in [`crate::display`] so data
//! structures stay separate from presentation.
//!
//! # Trip content
//!
//! - [`TripDocument`] holds the title, description, map defaults and an
//!   ordered list of [`Section`]s, each with optional [`Subsection`]s.
//! - Locations are normalized to [`GeoPoint`] at load time, whatever spelling
//!   the trip file used.
//!
//! # Plan items
//!
//! - [`PlanItem`] is a tagged variant: a section reference, a subsection
//!   reference, or a custom free-text entry, each with an optional
//!   [`TimeOfDay`].
//! - [`ItemKey`] is the identity used to keep a section or subsection from
//!   being scheduled twice.
//! - [`PlanSnapshot`] is the serialized day → items mapping.
//!
//! # Examples
//!
//! ```rust
//! use waymark_core::models::{PlanItem, TripDocument};
//!
//! let trip: TripDocument = serde_yaml::from_str(
//!     r#"
//! title: Alpine loop
//! sections:
//!   - id: s1
//!     title: Lake Bled
//!     location: [46.36, 14.09]
//! "#,
//! )
//! .unwrap();
//!
//! let item = PlanItem::section("s1");
//! assert_eq!(trip.resolve_display_title(&item), "Lake Bled");
//! assert_eq!(trip.markers().len(), 1);
//! ```

pub mod geo;
pub mod item;
pub mod snapshot;
pub mod time;
pub mod trip;


pub use geo::{GeoPoint, MapView, Marker};
pub use item::{ItemKey, ItemKind, PlanItem};
pub use snapshot::PlanSnapshot;
pub use time::TimeOfDay;
pub use trip::{ItemDetails, Section, Subsection, TripDocument, TripListing, TripSummary};
