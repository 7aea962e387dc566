//! Section progress rings.
//!
//! A ring is a full track circle with a fill arc starting at 12 o'clock and
//! sweeping clockwise by the section's completion.

use chapnav::{SectionProgress, StripPalette};
use eframe::egui;
use egui::{Pos2, Stroke};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::presentation::color_mapping;

/// Segments used for a full circle.
const FULL_CIRCLE_SEGMENTS: usize = 64;

/// Points along an arc from 12 o'clock, clockwise, covering `sweep_degrees`.
pub fn arc_points(center: Pos2, radius: f32, sweep_degrees: f32) -> Vec<Pos2> {
    let sweep = sweep_degrees.clamp(0.0, 360.0) / 360.0;
    if sweep <= 0.0 {
        return Vec::new();
    }

    let segments = ((FULL_CIRCLE_SEGMENTS as f32 * sweep).ceil() as usize).max(2);
    (0..=segments)
        .map(|i| {
            // Screen y grows downwards, so adding the angle runs clockwise
            let angle = -FRAC_PI_2 + TAU * sweep * (i as f32 / segments as f32);
            Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Paints one progress ring with its `completed/total` caption.
pub fn paint_progress_ring(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    progress: &SectionProgress,
    palette: &StripPalette,
) {
    let thickness = (radius * 0.22).max(2.0);
    painter.circle_stroke(center, radius, Stroke::new(thickness, palette.ring_track));

    let points = arc_points(center, radius, progress.sweep_degrees());
    if !points.is_empty() {
        let fill = color_mapping::ring_fill(progress, palette);
        painter.add(egui::Shape::line(points, Stroke::new(thickness, fill)));
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        format!("{}/{}", progress.completed, progress.total),
        egui::FontId::proportional((radius * 0.55).clamp(8.0, 14.0)),
        palette.text,
    );
}
