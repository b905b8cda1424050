//! SVG markup for scenes.
//!
//! `Document` is a standalone image of one scene. `Body` is the same scene
//! without the outer `<svg>` element and shared definitions, for embedding
//! several frames in one file.

use std::fmt::{self, Display, Formatter, Write};

use crate::graph::EdgeKind;
use crate::render::style::{self, IMPLICIT_NODE_FILL, NODE_FILL};
use crate::render::{EdgeMark, EdgePath, NodeMark, Scene};

/// Escapes text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn marker_id(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Successor => "arrow-successor",
        EdgeKind::Predecessor => "arrow-predecessor",
        EdgeKind::Finger => "arrow-finger",
    }
}

fn kind_class(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Successor => "successor",
        EdgeKind::Predecessor => "predecessor",
        EdgeKind::Finger => "finger",
    }
}

fn kind_color(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Successor => style::SUCCESSOR_COLOR,
        EdgeKind::Predecessor => style::PREDECESSOR_COLOR,
        EdgeKind::Finger => style::FINGER_COLOR,
    }
}

/// Opening `<svg>` tag for a canvas of the given size.
pub struct Open {
    pub width: u32,
    pub height: u32,
}

impl Display for Open {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = self.width,
            h = self.height
        )
    }
}

/// Arrowhead markers, one per edge kind.
pub struct Defs;

impl Display for Defs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<defs>")?;
        for kind in EdgeKind::ALL {
            writeln!(
                f,
                r#"<marker id="{}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="7" markerHeight="7" orient="auto-start-reverse"><path d="M0,0 L10,5 L0,10 z" fill="{}"/></marker>"#,
                marker_id(kind),
                kind_color(kind)
            )?;
        }
        writeln!(f, "</defs>")
    }
}

/// Scene content without the outer element.
pub struct Body<'a>(pub &'a Scene);

impl Display for Body<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        writeln!(
            f,
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            scene.width(),
            scene.height()
        )?;

        // Fingers underneath so they never hide ring links.
        let (fingers, ring): (Vec<&EdgeMark>, Vec<&EdgeMark>) =
            scene.edges().iter().partition(|e| e.kind == EdgeKind::Finger);
        for edge in fingers.into_iter().chain(ring) {
            write_edge(f, edge)?;
        }
        for node in scene.nodes() {
            write_node(f, node)?;
        }
        write_title(f, scene)?;
        write_legend(f, scene)
    }
}

/// A complete standalone SVG image of one scene.
pub struct Document<'a>(pub &'a Scene);

impl Display for Document<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        writeln!(
            f,
            "{}{}{}</svg>",
            Open {
                width: scene.width(),
                height: scene.height()
            },
            Defs,
            Body(scene)
        )
    }
}

fn path_data(path: &EdgePath) -> String {
    let mut d = String::new();
    // Writing into a String cannot fail.
    let _ = match path {
        EdgePath::Quadratic { from, ctrl, to } => write!(
            d,
            "M{:.2},{:.2} Q{:.2},{:.2} {:.2},{:.2}",
            from.x, from.y, ctrl.x, ctrl.y, to.x, to.y
        ),
        EdgePath::Loop { from, ctrl1, ctrl2, to } => write!(
            d,
            "M{:.2},{:.2} C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            from.x, from.y, ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
        ),
    };
    d
}

fn write_edge(f: &mut Formatter<'_>, edge: &EdgeMark) -> fmt::Result {
    writeln!(
        f,
        r#"<path class="edge {}" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}" marker-end="url(#{})"><title>{} {} &#8594; {}</title></path>"#,
        kind_class(edge.kind),
        path_data(&edge.path),
        edge.style.color,
        edge.style.width,
        edge.style.opacity,
        marker_id(edge.kind),
        edge.kind,
        escape(&edge.from.to_string()),
        escape(&edge.to.to_string())
    )
}

fn write_node(f: &mut Formatter<'_>, node: &NodeMark) -> fmt::Result {
    let (fill, dash) = if node.implicit {
        (IMPLICIT_NODE_FILL, r#" stroke-dasharray="4,3""#)
    } else {
        (NODE_FILL, "")
    };
    writeln!(
        f,
        r##"<circle class="node" cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="#4a6f80" stroke-width="1.5"{}/>"##,
        node.center.x, node.center.y, node.radius, fill, dash
    )?;
    writeln!(
        f,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central" font-size="14" font-weight="bold">{}</text>"#,
        node.center.x,
        node.center.y,
        escape(&node.id.to_string())
    )?;
    if let Some(annotation) = node.annotation() {
        writeln!(
            f,
            r##"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="11" fill="#555">{}</text>"##,
            node.center.x,
            node.center.y + node.radius + 14.0,
            annotation
        )?;
    }
    Ok(())
}

fn write_title(f: &mut Formatter<'_>, scene: &Scene) -> fmt::Result {
    let x = f64::from(scene.width()) / 2.0;
    writeln!(
        f,
        r#"<text x="{:.1}" y="32" text-anchor="middle" font-size="22" font-weight="bold">{}</text>"#,
        x,
        escape(scene.title())
    )?;
    if let Some(caption) = scene.caption() {
        writeln!(
            f,
            r##"<text class="caption" x="{:.1}" y="56" text-anchor="middle" font-size="15" fill="#333">{}</text>"##,
            x,
            escape(caption)
        )?;
    }
    Ok(())
}

fn write_legend(f: &mut Formatter<'_>, scene: &Scene) -> fmt::Result {
    if scene.legend().is_empty() {
        return Ok(());
    }
    let x = f64::from(scene.width()) - 170.0;
    let rows = scene.legend().len() as f64;
    writeln!(
        f,
        r##"<g class="legend"><rect x="{:.1}" y="16" width="154" height="{:.1}" fill="white" stroke="#999" rx="4"/>"##,
        x,
        12.0 + rows * 22.0
    )?;
    for (i, kind) in scene.legend().iter().enumerate() {
        let y = 32.0 + i as f64 * 22.0;
        writeln!(
            f,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/><text x="{:.1}" y="{:.1}" font-size="13" dominant-baseline="central">{}</text>"#,
            x + 10.0,
            y,
            x + 40.0,
            y,
            kind_color(*kind),
            x + 50.0,
            y,
            kind.label()
        )?;
    }
    writeln!(f, "</g>")
}
