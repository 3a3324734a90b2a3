//! Markdown rendering of trip content.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{GeoPoint, Marker, TripDocument, TripListing};

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl fmt::Display for TripDocument {
    /// The content tree: sections in order, subsections nested under them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.display_title())?;
        writeln!(f)?;
        writeln!(f, "- Trip: `{}`", self.id)?;
        if let Some(view) = self.map_view() {
            writeln!(f, "- Map: {} (zoom {})", view.center, view.zoom)?;
        }

        if let Some(description) = self.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                writeln!(f)?;
                writeln!(f, "{description}")?;
            }
        }

        if self.sections.is_empty() {
            writeln!(f, "\nThis trip has no sections.")?;
            return Ok(());
        }

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "## {} `{}`", section.display_title(), section.id)?;
            writeln!(f)?;
            if let Some(description) = &section.description {
                writeln!(f, "{}", description.trim())?;
                writeln!(f)?;
            }
            if let Some(point) = section.location {
                writeln!(f, "- Location: {point}")?;
            }
            if !section.images.is_empty() {
                writeln!(f, "- Images: {}", section.images.join(", "))?;
            }
            for sub in &section.subsections {
                let location = sub
                    .location
                    .map(|point| format!(" ({point})"))
                    .unwrap_or_default();
                writeln!(f, "- {} `{}/{}`{location}", sub.display_title(), section.id, sub.id)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "- **{}** in {parent}: {}", self.title, self.point),
            None => write!(f, "- **{}**: {}", self.title, self.point),
        }
    }
}

impl fmt::Display for TripListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** `{}`", self.title, self.id)?;
        match &self.updated_at {
            Some(updated_at) if self.planned_items > 0 => write!(
                f,
                ": {} planned item(s), updated {}",
                self.planned_items,
                LocalDateTime(updated_at)
            ),
            _ => write!(f, ": no plan yet"),
        }
    }
}
