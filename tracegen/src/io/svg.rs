//! SVG output: one polyline per line plus a ring marker at its end.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;

use crate::core::line::Line;
use crate::io::config::{CanvasConfig, RenderConfig};

/// Render `lines` as a standalone SVG document.
///
/// Single-point lines get only their end marker.
pub fn render_svg(lines: &[Line], canvas: &CanvasConfig, style: &RenderConfig) -> Result<String> {
    let mut out = String::new();
    let stroke = escape_attr(&style.stroke);

    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
         width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = canvas.width,
        h = canvas.height
    )?;
    writeln!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\" />",
        canvas.width,
        canvas.height,
        escape_attr(&style.background)
    )?;

    for line in lines {
        let path = line.path();
        if path.len() >= 2 {
            out.push_str("<polyline points=\"");
            for (index, point) in path.iter().enumerate() {
                if index > 0 {
                    out.push(' ');
                }
                write!(out, "{},{}", point.x, point.y)?;
            }
            writeln!(
                out,
                "\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" />",
                stroke, style.stroke_width
            )?;
        }
        if let Some(end) = path.last() {
            writeln!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" />",
                end.x, end.y, style.marker_radius, stroke, style.marker_stroke_width
            )?;
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}

/// Render and atomically write the drawing to `path`.
pub fn write_svg(
    path: &Path,
    lines: &[Line],
    canvas: &CanvasConfig,
    style: &RenderConfig,
) -> Result<()> {
    let document = render_svg(lines, canvas, style)?;
    super::write_atomic(path, &document)
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
