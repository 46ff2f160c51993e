use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("document unavailable")]
    Dom,
    #[error("canvas 2d context unavailable")]
    Canvas,
    #[error("jpeg encoding failed: {0}")]
    Encode(String),
}

// Logical layout of the exported grid; everything is drawn at SCALE times
// these dimensions.
#[cfg(target_arch = "wasm32")]
mod layout {
    pub const SCALE: f64 = 3.0;
    pub const CELL_W: f64 = 260.0;
    pub const CELL_H: f64 = 180.0;
    pub const GAP: f64 = 16.0;
    pub const MARGIN: f64 = 24.0;
    pub const TITLE_H: f64 = 56.0;
    pub const JPEG_QUALITY: f64 = 0.95;
}

/// Draws the month grid on an offscreen canvas from the same data the view
/// renders, encodes it as JPEG and triggers a download named
/// `cronograma-<mes>-<año>.jpg`.
#[cfg(target_arch = "wasm32")]
pub fn download_month_jpeg(
    year: i32,
    month: u32,
    records: &[crate::store::AssignmentRecord],
    config: &crate::config::ScheduleConfig,
) -> Result<(), ExportError> {
    use layout::*;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{window, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

    use crate::{calendar, locale};

    let days = calendar::service_days(year, month, config);
    let columns = config.services().count().max(1);
    let rows = days.len().div_ceil(columns).max(1);
    let width = MARGIN * 2.0 + columns as f64 * CELL_W + (columns - 1) as f64 * GAP;
    let height = MARGIN * 2.0
        + TITLE_H
        + rows as f64 * CELL_H
        + rows.saturating_sub(1) as f64 * GAP;

    let document = window().and_then(|w| w.document()).ok_or(ExportError::Dom)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| ExportError::Dom)?
        .dyn_into()
        .map_err(|_| ExportError::Dom)?;
    canvas.set_width((width * SCALE) as u32);
    canvas.set_height((height * SCALE) as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| ExportError::Canvas)?
        .ok_or(ExportError::Canvas)?
        .dyn_into()
        .map_err(|_| ExportError::Canvas)?;
    ctx.scale(SCALE, SCALE).map_err(|_| ExportError::Canvas)?;

    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, width, height);

    // title band
    ctx.set_fill_style_str("#1f2937");
    ctx.set_font("600 22px sans-serif");
    let title = format!(
        "CRONOGRAMA DE ILUMINACIÓN — {}",
        locale::month_year_label(year, month).to_uppercase()
    );
    let _ = ctx.fill_text(&title, MARGIN, MARGIN + 22.0);

    // one column header per configured service, weekday order
    ctx.set_font("600 14px sans-serif");
    ctx.set_fill_style_str("#374151");
    for (col, service) in config.services().enumerate().take(columns) {
        let x = MARGIN + col as f64 * (CELL_W + GAP);
        let _ = ctx.fill_text(&service.name.to_uppercase(), x, MARGIN + TITLE_H - 8.0);
    }

    for (i, day) in days.iter().enumerate() {
        use chrono::Datelike;

        let x = MARGIN + (i % columns) as f64 * (CELL_W + GAP);
        let y = MARGIN + TITLE_H + (i / columns) as f64 * (CELL_H + GAP);
        let record = records.iter().find(|r| r.date == *day);
        let style = &config.service_for_day(*day).style;

        let (fill, border) = match record {
            Some(_) => (style.fill_hex, style.border_hex),
            None => ("#f8fafc", "#e2e8f0"),
        };
        ctx.set_fill_style_str(fill);
        ctx.fill_rect(x, y, CELL_W, CELL_H);
        ctx.set_stroke_style_str(border);
        ctx.set_line_width(1.5);
        ctx.stroke_rect(x, y, CELL_W, CELL_H);

        ctx.set_fill_style_str("#1f2937");
        ctx.set_font("700 20px sans-serif");
        let _ = ctx.fill_text(&day.day().to_string(), x + 12.0, y + 26.0);

        match record {
            Some(record) => {
                ctx.set_font("600 15px sans-serif");
                let _ = ctx.fill_text(&record.service, x + 12.0, y + 52.0);
                ctx.set_fill_style_str("#475569");
                ctx.set_font("500 13px sans-serif");
                let _ = ctx.fill_text(&record.coordinator, x + 12.0, y + 70.0);

                ctx.set_stroke_style_str("#e5e7eb");
                ctx.set_line_width(1.0);
                ctx.begin_path();
                ctx.move_to(x + 12.0, y + 80.0);
                ctx.line_to(x + CELL_W - 12.0, y + 80.0);
                ctx.stroke();

                for (idx, name) in record.slots.iter().enumerate() {
                    let shown = if name.is_empty() { "---" } else { name.as_str() };
                    let line = format!("Serv. {}: {}", idx + 1, shown);
                    let _ = ctx.fill_text(&line, x + 12.0, y + 100.0 + idx as f64 * 18.0);
                }
            }
            None => {
                ctx.set_fill_style_str("#9ca3af");
                ctx.set_font("500 14px sans-serif");
                let _ = ctx.fill_text("Sin programar", x + 12.0, y + CELL_H / 2.0);
            }
        }
    }

    let url = canvas
        .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(JPEG_QUALITY))
        .map_err(|err| ExportError::Encode(format!("{err:?}")))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| ExportError::Dom)?
        .dyn_into()
        .map_err(|_| ExportError::Dom)?;
    anchor.set_download(&locale::export_file_name(year, month));
    anchor.set_href(&url);
    anchor.click();
    Ok(())
}

// No export path on the native build; tests exercise the data side only.
#[cfg(not(target_arch = "wasm32"))]
pub fn download_month_jpeg(
    _year: i32,
    _month: u32,
    _records: &[crate::store::AssignmentRecord],
    _config: &crate::config::ScheduleConfig,
) -> Result<(), ExportError> {
    Ok(())
}
