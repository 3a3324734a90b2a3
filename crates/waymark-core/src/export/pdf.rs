//! Printable A4 rendition of a day plan.
//!
//! Layout and drawing are separate steps. [`PdfLayout::build`] places every
//! line of text on a page, measuring in millimetres from the top-left corner;
//! [`PdfLayout::render`] hands the result to `printpdf`. Tests inspect the
//! layout without parsing PDF bytes.

use std::{path::Path, slice};

use jiff::Zoned;
use log::debug;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use unicode_width::UnicodeWidthStr;

use crate::{
    error::{Result, WaymarkError},
    plan::TripSession,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const TOP: f32 = 15.0;
/// Content never starts below this line; a new page is opened instead
const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 30.0;

const TITLE_SIZE: f32 = 18.0;
const GENERATED_SIZE: f32 = 12.0;
const DAY_SIZE: f32 = 14.0;
const ITEM_SIZE: f32 = 11.0;
const DETAIL_SIZE: f32 = 9.0;

/// Space between a day heading and its first item, in mm
const DAY_GAP: f32 = 8.0;
const ITEM_INDENT: f32 = 5.0;
const DETAIL_INDENT: f32 = 10.0;

const PT_TO_MM: f32 = 0.352_778;
const LINE_HEIGHT_FACTOR: f32 = 1.15;
/// Average Helvetica glyph advance, in em
const AVERAGE_GLYPH_EM: f32 = 0.5;

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Font size in points
    pub size: f32,
    pub bold: bool,
    /// Distance from the left edge, in mm
    pub x: f32,
    /// Baseline distance from the top edge, in mm
    pub y: f32,
}

/// A plan laid out on A4 pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    title: String,
    pages: Vec<Vec<TextLine>>,
}

impl PdfLayout {
    /// Lays out the session's plan.
    ///
    /// Empty days are skipped. Each item shows its time and live title, then
    /// the description, location and first image of the content it points at.
    /// Image paths are resolved under `trips_root`.
    pub fn build(session: &TripSession, trips_root: &Path, generated_at: &Zoned) -> Result<Self> {
        let plan = session.plan();
        if plan.is_empty() {
            return Err(WaymarkError::invalid_input("plan")
                .with_reason("the plan is empty, add something before exporting to PDF"));
        }

        let trip = session.trip();
        let title = format!("Trip plan: {}", trip.display_title());
        let mut writer = PageWriter::new();

        writer.line(&title, TITLE_SIZE, true, MARGIN);
        writer.advance(10.0);
        writer.line(
            &format!("Generated: {}", generated_at.strftime("%Y-%m-%d %H:%M")),
            GENERATED_SIZE,
            false,
            MARGIN,
        );
        writer.advance(15.0);

        let detail_width = PAGE_WIDTH - 2.0 * MARGIN - DETAIL_INDENT;
        for (day, items) in plan.days() {
            if items.is_empty() {
                continue;
            }

            // Keep the heading together with its first item.
            if !writer.has_room(DAY_GAP) {
                writer.new_page();
            }
            writer.line(&format!("Day {day}"), DAY_SIZE, true, MARGIN);
            writer.advance(DAY_GAP);
            writer.continued = Some(format!("Day {day} (cont.)"));

            for item in items {
                writer.break_if_full();

                let heading = match item.time() {
                    Some(time) => format!("{time} - {}", session.resolve_title(item)),
                    None => session.resolve_title(item),
                };
                writer.line(&heading, ITEM_SIZE, false, MARGIN + ITEM_INDENT);
                writer.advance(6.0);

                if let Some(details) = trip.item_details(item) {
                    let description = details.description.map(str::trim);
                    if let Some(description) = description.filter(|d| !d.is_empty()) {
                        writer.wrapped(&format!("Description: {description}"), detail_width);
                    }
                    if let Some(point) = details.location {
                        writer.wrapped(
                            &format!("Location: {}, {}", point.lat, point.lng),
                            detail_width,
                        );
                    }
                    if let Some(image) = details.image.map(str::to_string) {
                        let mut paths = trip.image_paths(trips_root, slice::from_ref(&image));
                        if let Some(path) = paths.next() {
                            writer.wrapped(&format!("Image: {}", path.display()), detail_width);
                        }
                    }
                }
                writer.advance(5.0);
            }
            writer.advance(10.0);
            writer.continued = None;
        }

        let layout = Self {
            title,
            pages: writer.finish(),
        };
        debug!(
            "Laid out plan for '{}' on {} page(s)",
            trip.id,
            layout.page_count()
        );
        Ok(layout)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pages(&self) -> &[Vec<TextLine>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All lines, page after page.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.pages.iter().flatten()
    }

    /// Draws the layout into a PDF document.
    pub fn render(&self) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        for (number, lines) in self.pages.iter().enumerate() {
            let (page, layer) = if number == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1")
            };
            let layer = doc.get_page(page).get_layer(layer);

            for line in lines {
                let font: &IndirectFontRef = if line.bold { &bold } else { &regular };
                layer.use_text(
                    line.text.clone(),
                    line.size,
                    Mm(line.x),
                    Mm(PAGE_HEIGHT - line.y),
                    font,
                );
            }
        }

        doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(e: printpdf::Error) -> WaymarkError {
    WaymarkError::Pdf {
        message: e.to_string(),
    }
}

/// Cursor over the pages being filled.
struct PageWriter {
    pages: Vec<Vec<TextLine>>,
    y: f32,
    /// Heading repeated at the top of a page opened mid-day
    continued: Option<String>,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: TOP,
            continued: None,
        }
    }

    fn is_full(&self) -> bool {
        self.y > BOTTOM_LIMIT
    }

    /// Whether content placed `mm` further down still starts above the limit.
    fn has_room(&self, mm: f32) -> bool {
        self.y + mm <= BOTTOM_LIMIT
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = TOP;
    }

    /// Opens a new page when the current one is full, repeating the day
    /// heading if a day is in progress.
    fn break_if_full(&mut self) {
        if !self.is_full() {
            return;
        }
        self.new_page();
        if let Some(heading) = self.continued.clone() {
            self.line(&heading, DAY_SIZE, true, MARGIN);
            self.advance(DAY_GAP);
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn line(&mut self, text: &str, size: f32, bold: bool, x: f32) {
        let line = TextLine {
            text: text.to_string(),
            size,
            bold,
            x,
            y: self.y,
        };
        if let Some(page) = self.pages.last_mut() {
            page.push(line);
        }
    }

    /// Writes detail text wrapped to `width` mm, one line-height per line.
    fn wrapped(&mut self, text: &str, width: f32) {
        for line in wrap(text, width, DETAIL_SIZE) {
            self.break_if_full();
            self.line(&line, DETAIL_SIZE, false, MARGIN + DETAIL_INDENT);
            self.advance(DETAIL_SIZE * LINE_HEIGHT_FACTOR * PT_TO_MM);
        }
    }

    fn finish(self) -> Vec<Vec<TextLine>> {
        self.pages
    }
}

/// Splits `text` into lines no wider than `width` mm at `size` pt.
///
/// Breaks at whitespace; words longer than a line are cut.
fn wrap(text: &str, width: f32, size: f32) -> Vec<String> {
    let glyph = size * PT_TO_MM * AVERAGE_GLYPH_EM;
    let max_columns = ((width / glyph).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed <= max_columns {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            if current.width() + ch.to_string().width() > max_columns {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
