// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Scroll offset and scrollbar math shared by every scrolling view.

pub const SCROLLBAR_THUMB: &str = "█";
pub const SCROLLBAR_TRACK: &str = "│";

/// Keeps `start` as close to where it was while making sure the current row
/// is on screen.
pub fn clamp_start(current: Option<usize>, start: usize, height: usize, total: usize) -> usize {
    let Some(current) = current else {
        return 0;
    };
    let height = height.max(1);
    let min = (current + 1).saturating_sub(height);
    let max = current.min(total.saturating_sub(height)).max(min);
    start.clamp(min, max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumb {
    pub offset: usize,
    pub len: usize,
}

/// No thumb when every row fits; the column is all track.
pub fn scrollbar_thumb(start: usize, visible: usize, total: usize, track: usize) -> Thumb {
    if track == 0 || total == 0 || visible >= total {
        return Thumb { offset: 0, len: 0 };
    }
    let len = rounded_ratio(visible, track, total).clamp(1, track);
    let offset = rounded_ratio(start, track, total).min(track - len);
    Thumb { offset, len }
}

/// One glyph per track cell, top to bottom.
pub fn scrollbar_glyphs(
    start: usize,
    visible: usize,
    total: usize,
    track: usize,
) -> Vec<&'static str> {
    let thumb = scrollbar_thumb(start, visible, total, track);
    (0..track)
        .map(|index| {
            if index >= thumb.offset && index < thumb.offset + thumb.len {
                SCROLLBAR_THUMB
            } else {
                SCROLLBAR_TRACK
            }
        })
        .collect()
}

fn rounded_ratio(value: usize, numerator: usize, denominator: usize) -> usize {
    (value * numerator + denominator / 2) / denominator
}

#[cfg(test)]
mod tests {
    use super::{
        SCROLLBAR_THUMB, SCROLLBAR_TRACK, Thumb, clamp_start, scrollbar_glyphs, scrollbar_thumb,
    };

    #[test]
    fn empty_rows_reset_start() {
        assert_eq!(clamp_start(None, 7, 5, 0), 0);
    }

    #[test]
    fn start_follows_cursor_down_and_up() {
        assert_eq!(clamp_start(Some(9), 0, 5, 20), 5);
        assert_eq!(clamp_start(Some(2), 5, 5, 20), 2);
        assert_eq!(clamp_start(Some(7), 5, 5, 20), 5);
    }

    #[test]
    fn start_never_leaves_blank_rows_at_bottom() {
        assert_eq!(clamp_start(Some(19), 17, 5, 20), 15);
        assert_eq!(clamp_start(Some(18), 18, 5, 20), 15);
    }

    #[test]
    fn zero_height_is_treated_as_one_row() {
        assert_eq!(clamp_start(Some(4), 0, 0, 10), 4);
    }

    #[test]
    fn cursor_stays_inside_window_for_any_walk() {
        let total = 37;
        let height = 6;
        let mut current = 0usize;
        let mut start = 0usize;
        let mut seed = 17u64;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let step = (seed >> 33) as usize % 15;
            current = if seed & 1 == 0 {
                (current + step).min(total - 1)
            } else {
                current.saturating_sub(step)
            };
            start = clamp_start(Some(current), start, height, total);
            assert!(start <= current && current < start + height);
            assert!(start + height <= total);
        }
    }

    #[test]
    fn no_thumb_when_everything_fits() {
        assert_eq!(scrollbar_thumb(0, 10, 10, 8), Thumb { offset: 0, len: 0 });
        assert_eq!(scrollbar_thumb(0, 0, 0, 8), Thumb { offset: 0, len: 0 });
        assert!(
            scrollbar_glyphs(0, 3, 3, 5)
                .iter()
                .all(|glyph| *glyph == SCROLLBAR_TRACK)
        );
    }

    #[test]
    fn thumb_scales_with_visible_share() {
        assert_eq!(scrollbar_thumb(0, 10, 100, 10), Thumb { offset: 0, len: 1 });
        assert_eq!(scrollbar_thumb(90, 10, 100, 10), Thumb { offset: 9, len: 1 });
        assert_eq!(scrollbar_thumb(50, 20, 40, 10), Thumb { offset: 5, len: 5 });
        assert_eq!(scrollbar_thumb(1, 1, 1000, 4), Thumb { offset: 0, len: 1 });
    }

    #[test]
    fn glyphs_mark_the_thumb() {
        let glyphs = scrollbar_glyphs(20, 20, 40, 4);
        assert_eq!(glyphs.len(), 4);
        assert_eq!(
            glyphs.iter().filter(|glyph| **glyph == SCROLLBAR_THUMB).count(),
            2
        );
        assert_eq!(glyphs[2], SCROLLBAR_THUMB);
    }
}
