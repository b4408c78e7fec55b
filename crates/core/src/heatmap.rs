// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Renders binned daily/hourly activity as an SVG heatmap: one row per day,
//! one column per hour, colored by the active-seconds fraction of that
//! hour. Rasterizing this to PNG is an external collaborator (see
//! `awa-adapters::rasterize`); this module only ever produces the SVG text.

use crate::metrics::DailyHourlyBuckets;

const CELL_SIZE: u32 = 18;
const CELL_GAP: u32 = 2;
const LABEL_WIDTH: u32 = 90;
const TOP_MARGIN: u32 = 24;

/// Renders `days` (oldest first, as produced by [`crate::binner::bin_afk_events`])
/// as a standalone SVG document.
pub fn render_heatmap_svg(days: &[DailyHourlyBuckets]) -> String {
    let width = LABEL_WIDTH + 24 * (CELL_SIZE + CELL_GAP);
    let height = TOP_MARGIN + days.len() as u32 * (CELL_SIZE + CELL_GAP);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="#111827"/>"#);

    for hour in 0..24u32 {
        let x = LABEL_WIDTH + hour * (CELL_SIZE + CELL_GAP);
        if hour % 3 == 0 {
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="9" fill="#9ca3af">{hour:02}</text>"#,
                x,
                TOP_MARGIN - 8
            ));
        }
    }

    for (row, day) in days.iter().enumerate() {
        let y = TOP_MARGIN + row as u32 * (CELL_SIZE + CELL_GAP);
        svg.push_str(&format!(
            r#"<text x="4" y="{}" font-size="11" fill="#e5e7eb">{}</text>"#,
            y + CELL_SIZE - 4,
            day.date
        ));

        for (hour, bucket) in day.hours.iter().enumerate() {
            let x = LABEL_WIDTH + hour as u32 * (CELL_SIZE + CELL_GAP);
            let total = bucket.active_seconds + bucket.afk_seconds;
            let fraction = if total > 0.0 {
                (bucket.active_seconds / total).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let color = active_color(fraction);
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" rx="3" fill="{color}"/>"#
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Sequential scale from near-background (idle) to a saturated accent
/// (fully active), interpolated in a flat RGB space for simplicity.
fn active_color(fraction: f64) -> String {
    let low = (31.0, 41.0, 55.0); // #1f2937 — idle
    let high = (56.0, 189.0, 248.0); // #38bdf8 — fully active
    let lerp = |a: f64, b: f64| (a + (b - a) * fraction).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        lerp(low.0, high.0),
        lerp(low.1, high.1),
        lerp(low.2, high.2)
    )
}

#[cfg(test)]
#[path = "heatmap_tests.rs"]
mod tests;
