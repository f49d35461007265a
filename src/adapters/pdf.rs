use crate::core::layout::render_roster;
use crate::core::{Canvas, RenderedReport, ReportLayout, TeamRoster, TextStyle};
use crate::utils::error::{Result, RosterError};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Pt,
};

const LAYER_NAME: &str = "Roster";

// Helvetica has no metrics table here; average glyph width is close enough
// for sizing the underline.
const AVERAGE_GLYPH_WIDTH: f32 = 0.55;

fn render_error(e: printpdf::Error) -> RosterError {
    RosterError::RenderFailure {
        message: e.to_string(),
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    heading_font: IndirectFontRef,
    body_font: IndirectFontRef,
    layout: ReportLayout,
}

impl PdfCanvas {
    pub fn new(layout: &ReportLayout) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            layout.title.as_str(),
            mm(layout.page_width),
            mm(layout.page_height),
            LAYER_NAME,
        );
        let heading_font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?;
        let body_font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            heading_font,
            body_font,
            layout: layout.clone(),
        })
    }

    /// PDF origin is bottom-left; the renderer measures from the top.
    fn baseline(&self, y: f32, size: f32) -> Mm {
        mm(self.layout.page_height - y - size)
    }

    fn underline(&self, text: &str, size: f32, x: f32, y: f32) {
        let width = text.chars().count() as f32 * size * AVERAGE_GLYPH_WIDTH;
        let rule_y = mm(self.layout.page_height - y - size - 2.0);
        let line = Line {
            points: vec![
                (Point::new(mm(x), rule_y), false),
                (Point::new(mm(x + width), rule_y), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(0.75);
        self.layer.add_line(line);
    }
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self) -> Result<()> {
        let (page, layer) = self.doc.add_page(
            mm(self.layout.page_width),
            mm(self.layout.page_height),
            LAYER_NAME,
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, style: TextStyle, x: f32, y: f32) -> Result<()> {
        match style {
            TextStyle::Heading => {
                let size = self.layout.heading_size;
                self.layer
                    .use_text(text, size, mm(x), self.baseline(y, size), &self.heading_font);
                self.underline(text, size, x, y);
            }
            TextStyle::Body => {
                let size = self.layout.body_size;
                self.layer
                    .use_text(text, size, mm(x), self.baseline(y, size), &self.body_font);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().map_err(render_error)
    }
}

/// Renders the roster into a complete PDF document.
pub fn render_pdf(roster: &TeamRoster, layout: &ReportLayout) -> Result<RenderedReport> {
    let canvas = PdfCanvas::new(layout)?;
    render_roster(roster, layout, canvas)
}
