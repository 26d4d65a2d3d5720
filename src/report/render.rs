//! PDF output through `printpdf`. A4 portrait, coordinates in millimetres
//! from the bottom-left corner.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Polygon, Rgb,
};

use super::chart::{BLACK, NAVY, PieChart, RgbColor, WHITE, wedge_outline};
use super::document::{ReportBody, ReportDocument, Table};
use crate::error::{AppError, AppResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const BANNER_HEIGHT: f32 = 16.0;
const FOOTER_HEIGHT: f32 = 10.0;
const ROW_HEIGHT: f32 = 8.0;
const BODY_FONT_SIZE: f32 = 10.0;
const PT_TO_MM: f32 = 0.3528;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn render_error(e: impl std::fmt::Display) -> AppError {
    AppError::Report(e.to_string())
}

pub fn render_pdf(doc: &ReportDocument) -> AppResult<Vec<u8>> {
    let (pdf, page, layer) = PdfDocument::new(
        doc.heading.clone(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?,
    };
    let first = pdf.get_page(page).get_layer(layer);

    match &doc.body {
        ReportBody::Table(table) => draw_table_pages(&pdf, first, doc, table, &fonts),
        ReportBody::Chart(chart) => {
            draw_page_frame(&first, doc, &fonts);
            draw_pie_chart(&first, chart, &fonts);
        }
    }

    pdf.save_to_bytes().map_err(render_error)
}

fn color(c: RgbColor) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(c.r) / 255.0,
        f32::from(c.g) / 255.0,
        f32::from(c.b) / 255.0,
        None,
    ))
}

/// Rough Helvetica advance width; good enough for centring and clipping.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

fn clip(text: &str, width_mm: f32, size: f32) -> String {
    let max_chars = (width_mm / (size * 0.5 * PT_TO_MM)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn polygon(points: &[(f32, f32)], mode: PaintMode) -> Polygon {
    Polygon {
        rings: vec![
            points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
        ],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}

fn rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, mode: PaintMode) {
    layer.add_polygon(polygon(
        &[(x, y), (x + w, y), (x + w, y + h), (x, y + h)],
        mode,
    ));
}

fn centered_text(
    layer: &PdfLayerReference,
    text: &str,
    size: f32,
    cx: f32,
    y: f32,
    font: &IndirectFontRef,
) {
    let x = cx - text_width(text, size) / 2.0;
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

/// Navy banner with the heading on top, navy footer strip at the bottom.
fn draw_page_frame(layer: &PdfLayerReference, doc: &ReportDocument, fonts: &Fonts) {
    let banner_y = PAGE_HEIGHT - MARGIN - BANNER_HEIGHT;
    layer.set_fill_color(color(NAVY));
    rect(
        layer,
        MARGIN,
        banner_y,
        PAGE_WIDTH - 2.0 * MARGIN,
        BANNER_HEIGHT,
        PaintMode::Fill,
    );
    rect(
        layer,
        MARGIN,
        MARGIN,
        PAGE_WIDTH - 2.0 * MARGIN,
        FOOTER_HEIGHT,
        PaintMode::Fill,
    );

    layer.set_fill_color(color(WHITE));
    centered_text(
        layer,
        &doc.heading,
        16.0,
        PAGE_WIDTH / 2.0,
        banner_y + 5.5,
        &fonts.bold,
    );
    centered_text(
        layer,
        &doc.footer,
        10.0,
        PAGE_WIDTH / 2.0,
        MARGIN + 3.5,
        &fonts.regular,
    );
}

fn rows_per_page() -> usize {
    let top = PAGE_HEIGHT - MARGIN - BANNER_HEIGHT - 10.0;
    let bottom = MARGIN + FOOTER_HEIGHT + 5.0;
    // one row is taken by the column headings
    (((top - bottom) / ROW_HEIGHT).floor() as usize).saturating_sub(1).max(1)
}

fn draw_table_pages(
    pdf: &PdfDocumentReference,
    first: PdfLayerReference,
    doc: &ReportDocument,
    table: &Table,
    fonts: &Fonts,
) {
    let per_page = rows_per_page();
    let mut chunks: Vec<&[Vec<String>]> = table.rows.chunks(per_page).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }

    let mut layer = first;
    for (index, rows) in chunks.into_iter().enumerate() {
        if index > 0 {
            let (page, layer_index) =
                pdf.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = pdf.get_page(page).get_layer(layer_index);
        }
        draw_page_frame(&layer, doc, fonts);
        draw_table(&layer, table, rows, fonts);
    }
}

fn draw_table(layer: &PdfLayerReference, table: &Table, rows: &[Vec<String>], fonts: &Fonts) {
    let top = PAGE_HEIGHT - MARGIN - BANNER_HEIGHT - 10.0;
    let width: f32 = table.columns.iter().map(|c| c.width_mm).sum();
    let left = (PAGE_WIDTH - width) / 2.0;

    // heading row
    let mut y = top - ROW_HEIGHT;
    layer.set_fill_color(color(NAVY));
    rect(layer, left, y, width, ROW_HEIGHT, PaintMode::Fill);
    layer.set_fill_color(color(WHITE));
    let mut x = left;
    for column in &table.columns {
        layer.use_text(column.title, BODY_FONT_SIZE, Mm(x + 1.5), Mm(y + 2.5), &fonts.bold);
        x += column.width_mm;
    }

    layer.set_outline_color(color(BLACK));
    layer.set_outline_thickness(0.75);
    for row in rows {
        y -= ROW_HEIGHT;
        let mut x = left;
        for (cell, column) in row.iter().zip(&table.columns) {
            rect(layer, x, y, column.width_mm, ROW_HEIGHT, PaintMode::Stroke);
            layer.set_fill_color(color(BLACK));
            let text = clip(cell, column.width_mm - 3.0, BODY_FONT_SIZE);
            layer.use_text(text, BODY_FONT_SIZE, Mm(x + 1.5), Mm(y + 2.5), &fonts.regular);
            x += column.width_mm;
        }
    }
}

fn draw_pie_chart(layer: &PdfLayerReference, chart: &PieChart, fonts: &Fonts) {
    let cx = PAGE_WIDTH / 2.0;
    let cy = 165.0;
    let radius = 55.0;

    layer.set_fill_color(color(BLACK));
    centered_text(layer, &chart.title, 16.0, cx, cy + radius + 12.0, &fonts.bold);

    let wedges = chart.wedges();
    if wedges.is_empty() {
        centered_text(layer, "No employees on record", 12.0, cx, cy, &fonts.regular);
    }

    for wedge in &wedges {
        let slice = &chart.slices[wedge.slice];
        layer.set_fill_color(color(slice.color));
        layer.add_polygon(polygon(
            &wedge_outline(cx, cy, radius, wedge),
            PaintMode::Fill,
        ));
    }

    // counts inside the wedges, half way out
    layer.set_fill_color(color(WHITE));
    for wedge in &wedges {
        let slice = &chart.slices[wedge.slice];
        let angle = wedge.mid_angle();
        let (lx, ly) = if wedges.len() == 1 {
            (cx, cy)
        } else {
            (cx + radius * 0.5 * angle.cos(), cy + radius * 0.5 * angle.sin())
        };
        centered_text(layer, &slice.value.to_string(), 14.0, lx, ly - 2.0, &fonts.bold);
    }

    // legend
    let mut y = cy - radius - 20.0;
    for slice in &chart.slices {
        layer.set_fill_color(color(slice.color));
        rect(layer, cx - 35.0, y, 6.0, 6.0, PaintMode::Fill);
        layer.set_fill_color(color(BLACK));
        let label = format!("{} ({})", slice.label, slice.value);
        layer.use_text(label, 12.0, Mm(cx - 26.0), Mm(y + 1.2), &fonts.regular);
        y -= 10.0;
    }
}
