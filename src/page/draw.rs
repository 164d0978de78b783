//! Canvas rendering: the floating hearts backdrop and the letter field.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::hearts::{HEART_OPACITY, HEARTS};
use crate::letters::{LetterField, TOKEN_RADIUS_PX};

const PRIMARY: &str = "#e11d48";
const PRIMARY_TEXT: &str = "#ffffff";
const SECONDARY: &str = "#fce7f3";
const SECONDARY_TEXT: &str = "#881337";
const MUTED: &str = "rgba(136,19,55,0.55)";

pub(crate) fn draw_hearts(ctx: &CanvasRenderingContext2d, width: f64, height: f64, t_secs: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_global_alpha(HEART_OPACITY);
    ctx.set_fill_style_str(PRIMARY);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for heart in HEARTS.iter() {
        let Some(top) = heart.top_percent(t_secs) else {
            continue;
        };
        ctx.set_font(&format!("{}px sans-serif", heart.size));
        let x = heart.left / 100.0 * width;
        let y = top / 100.0 * height;
        ctx.fill_text("♥", x, y).ok();
    }
    ctx.set_global_alpha(1.0);
}

pub(crate) fn draw_field(ctx: &CanvasRenderingContext2d, field: &LetterField, width: f64, height: f64) {
    ctx.set_fill_style_str("#fff5f7");
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.set_stroke_style_str("rgba(225,29,72,0.2)");
    ctx.set_line_width(2.0);
    ctx.stroke_rect(1.0, 1.0, width - 2.0, height - 2.0);

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    if field.is_empty() {
        ctx.set_font("16px sans-serif");
        ctx.set_fill_style_str(MUTED);
        ctx.fill_text("Letters are coming...", width / 2.0, height / 2.0).ok();
        return;
    }

    let needed = field.needed_glyph();
    ctx.set_font("bold 20px sans-serif");
    for token in field.tokens() {
        let (cx, cy) = token.center_px(width, height);
        let highlight = Some(token.glyph) == needed;
        ctx.set_shadow_color(if highlight { "rgba(225,29,72,0.45)" } else { "transparent" });
        ctx.set_shadow_blur(if highlight { 10.0 } else { 0.0 });
        ctx.set_fill_style_str(if highlight { PRIMARY } else { SECONDARY });
        ctx.begin_path();
        if ctx.arc(cx, cy, TOKEN_RADIUS_PX, 0.0, TAU).is_err() {
            continue;
        }
        ctx.fill();
        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style_str(if highlight { PRIMARY_TEXT } else { SECONDARY_TEXT });
        let mut buf = [0u8; 4];
        ctx.fill_text(token.glyph.encode_utf8(&mut buf), cx, cy).ok();
    }
}

/// Target word with collected glyphs lit up.
pub(crate) fn progress_html(field: &LetterField) -> String {
    let done = field.collected().len();
    field
        .target()
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let color = if i < done { PRIMARY } else { "rgba(136,19,55,0.25)" };
            format!("<span style='color:{color};'>{g}</span>")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::LetterToken;

    #[test]
    fn progress_marks_collected_prefix() {
        let mut field = LetterField::new(vec!['L', 'O']);
        field.push(LetterToken {
            id: 0,
            glyph: 'L',
            x: 50.0,
            y: 50.0,
            speed: 0.3,
        });
        field.collect(0);
        let html = progress_html(&field);
        assert_eq!(
            html,
            "<span style='color:#e11d48;'>L</span><span style='color:rgba(136,19,55,0.25);'>O</span>"
        );
    }
}
