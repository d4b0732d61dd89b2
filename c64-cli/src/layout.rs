//! Generate an HTML/SVG picture of the C64 keyboard, one panel per target.
//! Each key shows its keycap legend and the host symbol it sends.

use c64_keymap::{C64Key, Target, TranslationTable};

use C64Key::*;

/// A keycap placed on the drawing, in SVG pixels.
struct Key {
    x: f64,
    y: f64,
    w: f64,
    key: C64Key,
}

/// Width of a 1u keycap.
const UNIT: f64 = 54.0;
const GAP: f64 = 4.0;
/// Distance between neighbouring 1u keycaps.
const STEP: f64 = UNIT + GAP;
const RADIUS: f64 = 4.0;
/// Space around each panel.
const MARGIN: f64 = 20.0;
/// Column of the function key block, right of the main block.
const FKEY_X: f64 = 16.75;

/// Rows of the main block: (x offset in units, [(key, width in units)]).
#[rustfmt::skip]
const ROWS: [(f64, &[(C64Key, f64)]); 5] = [
    (0.0, &[
        (LeftArrow, 1.0), (N1, 1.0), (N2, 1.0), (N3, 1.0), (N4, 1.0), (N5, 1.0),
        (N6, 1.0), (N7, 1.0), (N8, 1.0), (N9, 1.0), (N0, 1.0), (Plus, 1.0),
        (Minus, 1.0), (Pound, 1.0), (ClrHome, 1.0), (InstDel, 1.0),
    ]),
    (0.0, &[
        (Ctrl, 1.5), (Q, 1.0), (W, 1.0), (E, 1.0), (R, 1.0), (T, 1.0), (Y, 1.0),
        (U, 1.0), (I, 1.0), (O, 1.0), (P, 1.0), (At, 1.0), (Asterisk, 1.0),
        (UpArrow, 1.0), (Restore, 1.5),
    ]),
    // SHIFT LOCK latches left shift mechanically and has no cell of its own.
    (0.0, &[
        (RunStop, 1.0), (A, 1.0), (S, 1.0), (D, 1.0), (F, 1.0), (G, 1.0), (H, 1.0),
        (J, 1.0), (K, 1.0), (L, 1.0), (Colon, 1.0), (Semicolon, 1.0), (Equals, 1.0),
        (Return, 2.0),
    ]),
    (0.0, &[
        (Commodore, 1.0), (LeftShift, 1.5), (Z, 1.0), (X, 1.0), (C, 1.0), (V, 1.0),
        (B, 1.0), (N, 1.0), (M, 1.0), (Comma, 1.0), (Period, 1.0), (Slash, 1.0),
        (RightShift, 1.5), (CursorDown, 1.0), (CursorRight, 1.0),
    ]),
    (3.5, &[(Space, 9.0)]),
];

const FUNCTION_KEYS: [C64Key; 4] = [F1, F3, F5, F7];

/// Build all physical key positions.
fn build_keys() -> Vec<Key> {
    let mut keys = Vec::with_capacity(C64Key::COUNT);

    for (row, (offset, row_keys)) in ROWS.iter().enumerate() {
        let mut x = *offset;
        for &(key, w) in row_keys.iter() {
            keys.push(Key { x: x * STEP, y: row as f64 * STEP, w: w * UNIT + (w - 1.0) * GAP, key });
            x += w;
        }
    }

    for (row, key) in FUNCTION_KEYS.into_iter().enumerate() {
        keys.push(Key { x: FKEY_X * STEP, y: row as f64 * STEP, w: 1.5 * UNIT, key });
    }

    keys
}

/// Right and bottom edge of the drawing.
fn extent(keys: &[Key]) -> (f64, f64) {
    keys.iter().fold((0.0_f64, 0.0_f64), |(right, bottom), k| {
        (right.max(k.x + k.w), bottom.max(k.y + UNIT))
    })
}

/// Keys whose symbol is not the same on every target.
fn is_divergent(key: C64Key, tables: &[TranslationTable]) -> bool {
    tables.windows(2).any(|pair| pair[0].symbol(key) != pair[1].symbol(key))
}

/// Render a single target as an SVG group.
fn render_target(
    keys: &[Key],
    target: Target,
    tables: &[TranslationTable],
    y_offset: f64,
) -> String {
    let table = &tables[target.number() as usize - 1];
    let mut svg = String::new();

    svg.push_str(&format!(r#"<g transform="translate({MARGIN}, {y_offset})">"#));
    svg.push_str(&format!(
        r#"<text x="0" y="-10" class="target-title">Target {} ({}){}</text>"#,
        target.number(),
        target.name(),
        if target == Target::DEFAULT { " default" } else { "" }
    ));

    for key in keys {
        let symbol = table.symbol(key.key);
        let key_class = if symbol.is_modifier() {
            "key modifier"
        } else if is_divergent(key.key, tables) {
            "key divergent"
        } else {
            "key"
        };

        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{UNIT}" rx="{RADIUS}" class="{key_class}"/>"#,
            key.x, key.y, key.w,
        ));

        let cx = key.x + key.w / 2.0;
        let legend = key.key.label();
        let legend_class = if legend.chars().count() > 3 { "legend small" } else { "legend" };
        svg.push_str(&format!(
            r#"<text x="{cx}" y="{}" class="{legend_class}">{}</text>"#,
            key.y + UNIT * 0.33,
            escape(legend),
        ));
        svg.push_str(&format!(
            r#"<text x="{cx}" y="{}" class="symbol">{}</text>"#,
            key.y + UNIT * 0.72,
            escape(&symbol.to_string()),
        ));
    }

    svg.push_str("</g>");
    svg
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { background: #40318d; color: #f0ead6; font-family: sans-serif; margin: 0; padding: 24px; }
.key { fill: #4a3f36; stroke: #2b241f; stroke-width: 1.5; }
.key.modifier { fill: #5c4f45; stroke: #a79fd8; }
.key.divergent { fill: #6b4a2e; stroke: #e0a060; stroke-width: 2; }
text { text-anchor: middle; dominant-baseline: middle; }
.legend { fill: #f0ead6; font: 13px monospace; }
.legend.small { font-size: 9px; }
.symbol { fill: #a79fd8; font: 9px monospace; }
.target-title { fill: #a79fd8; font: bold 16px sans-serif; text-anchor: start; }
"#;

/// One HTML page with an SVG panel per target.
pub fn generate_html() -> String {
    let keys = build_keys();
    let tables: Vec<TranslationTable> = Target::ALL.into_iter().map(TranslationTable::build).collect();
    let (content_w, content_h) = extent(&keys);
    let panel_height = content_h + 60.0;
    let width = content_w + 2.0 * MARGIN;
    let height = Target::ALL.len() as f64 * panel_height + 2.0 * MARGIN;

    let mut html = format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>C64 Keyboard Targets</title>\
         <style>{STYLE}</style></head><body>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n"
    );

    for (i, target) in Target::ALL.into_iter().enumerate() {
        let y_offset = MARGIN + i as f64 * panel_height + 30.0;
        html.push_str(&render_target(&keys, target, &tables, y_offset));
        html.push('\n');
    }

    html.push_str("</svg></body></html>\n");
    html
}
