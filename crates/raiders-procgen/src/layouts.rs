//! The eight layout algorithms.
//!
//! Every layout returns top-left enemy positions. Element counts scale
//! linearly with the frame's `scale`: one-dimensional layouts scale their
//! count, triangle and diamond scale their side by `sqrt(scale)`, and the
//! wave scales its layer count. Spacing shrinks when a large instance would
//! not fit the formation band.

use std::f32::consts::PI;

use glam::Vec2;

use raiders_core::constants::*;
use raiders_core::enums::FormationKind;
use raiders_core::types::PlayField;

/// Geometry shared by all layouts.
#[derive(Debug, Clone, Copy)]
pub struct LayoutFrame {
    pub field: PlayField,
    /// Formation size multiplier for the level.
    pub scale: f32,
}

impl LayoutFrame {
    pub fn new(field: PlayField, scale: f32) -> Self {
        Self { field, scale }
    }

    fn center_x(&self) -> f32 {
        self.field.center_x()
    }

    /// Lowest y a formation element may occupy.
    pub fn max_y(&self) -> f32 {
        (self.field.height * FORMATION_DEPTH_FRACTION).max(FORMATION_TOP)
    }

    /// Usable distance either side of the center line.
    fn half_span(&self) -> f32 {
        (self.center_x() - FORMATION_EDGE_MARGIN).max(0.0)
    }

    fn depth(&self) -> f32 {
        self.max_y() - FORMATION_TOP
    }

    /// Linear element count. The epsilon keeps exact products such as
    /// `8 * 1.5` from truncating one short.
    fn scaled(&self, base: usize) -> usize {
        (base as f32 * self.scale + 1e-4).floor().max(1.0) as usize
    }

    /// Side length for layouts whose count grows with the square of the side.
    fn scaled_side(&self, base: usize) -> usize {
        (base as f32 * self.scale.max(0.0).sqrt() + 1e-4)
            .floor()
            .max(1.0) as usize
    }

    /// Clamp a position so the enemy lies inside the field and the band.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.field.clamp_x(position.x, ENEMY_WIDTH),
            position.y.clamp(0.0, self.max_y()),
        )
    }
}

/// Positions for a layout, before clamping.
pub fn positions(kind: FormationKind, frame: &LayoutFrame) -> Vec<Vec2> {
    match kind {
        FormationKind::Line => line(frame),
        FormationKind::V => v_shape(frame),
        FormationKind::Arc => arc(frame),
        FormationKind::Triangle => triangle(frame),
        FormationKind::Diamond => diamond(frame),
        FormationKind::Spiral => spiral(frame),
        FormationKind::Cross => cross(frame),
        FormationKind::Wave => wave(frame),
    }
}

/// Evenly spaced across the field on one row.
pub fn line(frame: &LayoutFrame) -> Vec<Vec2> {
    let count = frame.scaled(LINE_BASE_COUNT);
    let spacing = frame.field.width / (count + 1) as f32;
    (0..count)
        .map(|i| {
            Vec2::new(
                spacing * (i + 1) as f32 - ENEMY_WIDTH * 0.5,
                FORMATION_TOP,
            )
        })
        .collect()
}

/// Alternating left and right of center, each rank one step lower.
pub fn v_shape(frame: &LayoutFrame) -> Vec<Vec2> {
    let count = frame.scaled(V_BASE_COUNT);
    let ranks = count.div_ceil(2) as f32;
    let step_x = V_STEP_X.min(frame.half_span() / ranks);
    let step_y = V_STEP_Y.min(frame.depth() / ranks);

    (0..count)
        .map(|i| {
            let rank = (i / 2) as f32;
            let side = if i % 2 == 0 { -1.0 } else { 1.0 };
            Vec2::new(
                frame.center_x() + side * (rank + 1.0) * step_x - ENEMY_WIDTH * 0.5,
                FORMATION_TOP + rank * step_y,
            )
        })
        .collect()
}

/// Half circle from angle 0 to PI, flattened vertically.
pub fn arc(frame: &LayoutFrame) -> Vec<Vec2> {
    let count = frame.scaled(ARC_BASE_COUNT);
    let radius = ARC_RADIUS.min(frame.half_span());

    (0..count)
        .map(|i| {
            let t = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.5
            };
            let angle = PI * t;
            Vec2::new(
                frame.center_x() + radius * angle.cos() - ENEMY_WIDTH * 0.5,
                ARC_CENTER_Y + radius * ARC_FLATTEN * angle.sin(),
            )
        })
        .collect()
}

/// Row `r` holds `r + 1` enemies, centered.
pub fn triangle(frame: &LayoutFrame) -> Vec<Vec2> {
    let rows = frame.scaled_side(TRIANGLE_BASE_ROWS);
    let usable = frame.field.width - 2.0 * FORMATION_EDGE_MARGIN;
    let col_spacing = TRIANGLE_COL_SPACING.min(usable.max(0.0) / rows as f32);
    let row_spacing = TRIANGLE_ROW_SPACING.min(frame.depth() / rows as f32);

    let mut out = Vec::with_capacity(rows * (rows + 1) / 2);
    for row in 0..rows {
        let in_row = row + 1;
        let start_x = (frame.field.width - in_row as f32 * col_spacing) * 0.5;
        for col in 0..in_row {
            out.push(Vec2::new(
                start_x + col as f32 * col_spacing,
                FORMATION_TOP + row as f32 * row_spacing,
            ));
        }
    }
    out
}

/// Rows of 1..=size then size-1..=1, centered: a rhombus of `size^2` enemies.
pub fn diamond(frame: &LayoutFrame) -> Vec<Vec2> {
    let size = frame.scaled_side(DIAMOND_BASE_SIZE);
    let total_rows = 2 * size - 1;
    let col_spacing = DIAMOND_COL_SPACING.min(2.0 * frame.half_span() / size as f32);
    let row_spacing = DIAMOND_ROW_SPACING.min(frame.depth() / total_rows as f32);

    let row_counts = (1..=size).chain((1..size).rev());
    let mut out = Vec::with_capacity(size * size);
    for (row, in_row) in row_counts.enumerate() {
        let half = (in_row - 1) as f32 * 0.5;
        for col in 0..in_row {
            out.push(Vec2::new(
                frame.center_x() + (col as f32 - half) * col_spacing - ENEMY_WIDTH * 0.5,
                FORMATION_TOP + row as f32 * row_spacing,
            ));
        }
    }
    out
}

/// Polar placement, fixed angle step, radius growing linearly.
pub fn spiral(frame: &LayoutFrame) -> Vec<Vec2> {
    let count = frame.scaled(SPIRAL_BASE_COUNT);
    let max_radius = frame
        .half_span()
        .min((frame.max_y() - SPIRAL_CENTER_Y) / SPIRAL_FLATTEN)
        .min(SPIRAL_CENTER_Y / SPIRAL_FLATTEN)
        .max(SPIRAL_START_RADIUS);
    let radius_step = if count > 1 {
        SPIRAL_RADIUS_STEP.min((max_radius - SPIRAL_START_RADIUS) / (count - 1) as f32)
    } else {
        SPIRAL_RADIUS_STEP
    };

    (0..count)
        .map(|i| {
            let angle = i as f32 * SPIRAL_ANGLE_STEP;
            let radius = SPIRAL_START_RADIUS + i as f32 * radius_step;
            Vec2::new(
                frame.center_x() + radius * angle.cos() - ENEMY_WIDTH * 0.5,
                SPIRAL_CENTER_Y + radius * angle.sin() * SPIRAL_FLATTEN,
            )
        })
        .collect()
}

/// Horizontal and vertical arms through a shared center.
pub fn cross(frame: &LayoutFrame) -> Vec<Vec2> {
    let arm = frame.scaled(CROSS_BASE_ARM_LENGTH);
    let spacing_x = CROSS_SPACING_X.min(frame.half_span() / arm as f32);
    let spacing_y = CROSS_SPACING_Y.min(frame.depth() / (2 * arm) as f32);
    let center = Vec2::new(
        frame.center_x() - ENEMY_WIDTH * 0.5,
        CROSS_CENTER_Y.max(FORMATION_TOP + arm as f32 * spacing_y),
    );
    let arm = arm as i32;

    let horizontal = (-arm..=arm).map(|i| center + Vec2::new(i as f32 * spacing_x, 0.0));
    let vertical = (-arm..=arm)
        .filter(|&i| i != 0)
        .map(|i| center + Vec2::new(0.0, i as f32 * spacing_y));
    horizontal.chain(vertical).collect()
}

/// Fixed x-step rows whose y follows a sine, one row per layer.
pub fn wave(frame: &LayoutFrame) -> Vec<Vec2> {
    let layers = frame.scaled(WAVE_BASE_LAYERS);
    let step_x = (frame.field.width - 2.0 * FORMATION_EDGE_MARGIN).max(0.0) / WAVE_PER_LAYER as f32;
    let layer_spacing = WAVE_LAYER_SPACING
        .min((frame.max_y() - WAVE_TOP - WAVE_AMPLITUDE) / layers as f32)
        .max(0.0);

    let mut out = Vec::with_capacity(layers * WAVE_PER_LAYER);
    for layer in 0..layers {
        for i in 0..WAVE_PER_LAYER {
            out.push(Vec2::new(
                FORMATION_EDGE_MARGIN + step_x * i as f32,
                WAVE_TOP
                    + layer as f32 * layer_spacing
                    + WAVE_AMPLITUDE * (i as f32 * WAVE_PHASE_STEP).sin(),
            ));
        }
    }
    out
}
