//! SVG serialization of a [`Scene`], used for image export.

use std::fmt::Write;

use crate::view::scene::{DrawCommand, Scene, Stroke};

const BACKGROUND: &str = "#ffffff";
const FONT_FAMILY: &str = "Arial, sans-serif";

/// Renders the scene as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let [a, b, c, d, e, f] = scene.transform.as_coeffs();
    // write! into a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        BACKGROUND
    );
    let _ = writeln!(out, r#"  <g transform="matrix({a} {b} {c} {d} {e} {f})">"#);
    for command in &scene.commands {
        write_command(&mut out, command);
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

fn write_command(out: &mut String, command: &DrawCommand) {
    match command {
        DrawCommand::Line { from, to, stroke } => {
            let _ = writeln!(
                out,
                r#"    <line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_attrs(Some(stroke))
            );
        }
        DrawCommand::Circle {
            circle,
            fill,
            stroke,
        } => {
            let _ = writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                circle.center.x,
                circle.center.y,
                circle.radius,
                fill.as_deref().unwrap_or("none"),
                stroke_attrs(stroke.as_ref())
            );
        }
        DrawCommand::Text {
            at,
            text,
            size,
            color,
        } => {
            let _ = writeln!(
                out,
                r#"    <text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="bold" fill="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                at.x,
                at.y,
                FONT_FAMILY,
                size,
                color,
                escape(text)
            );
        }
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        None => String::new(),
        Some(s) => {
            let dash = if s.dashed {
                r#" stroke-dasharray="5 5""#
            } else {
                ""
            };
            format!(r#" stroke="{}" stroke-width="{}"{}"#, s.color, s.width, dash)
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BinaryTree;
    use crate::view::scene::{render, RenderOptions, RenderState};
    use crate::view::style::ColorScheme;
    use crate::view::viewport::Viewport;

    #[test]
    fn given_label_with_markup_when_exporting_then_escapes_text() {
        let mut tree = BinaryTree::new();
        tree.set_root("<a&b>".into()).unwrap();
        tree.calculate_positions(true);
        let scene = render(
            &tree,
            &RenderState::default(),
            &ColorScheme::default(),
            &Viewport::default(),
            &RenderOptions {
                canvas_width: 300.0,
                canvas_height: 200.0,
                show_placeholders: false,
            },
        );

        let svg = to_svg(&scene);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("&lt;a&amp;b&gt;"));
        assert!(svg.contains(r##"<circle cx="100" cy="50" r="25" fill="#2196F3""##));
        assert!(svg.contains("matrix(1 0 0 1 0 0)"));
    }
}
