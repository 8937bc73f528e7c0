//! Pan/zoom state for the detail view.

use std::time::{Duration, Instant};

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;

/// Controls come back this long after the last gesture.
pub const CONTROLS_HIDE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    controls_visible: bool,
    last_gesture: Option<Instant>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            controls_visible: true,
            last_gesture: None,
        }
    }

    /// Apply one transform gesture: multiply the scale by `zoom`, move by
    /// the pan delta, then clamp. Hides the controls.
    pub fn transform(&mut self, pan_x: f32, pan_y: f32, zoom: f32, now: Instant) {
        let scaled = self.scale * zoom;
        if scaled.is_finite() {
            self.scale = scaled.clamp(MIN_SCALE, MAX_SCALE);
        }

        let max_x = Self::max_offset(self.width, self.scale);
        let max_y = Self::max_offset(self.height, self.scale);
        self.offset_x = (self.offset_x + pan_x).clamp(-max_x, max_x);
        self.offset_y = (self.offset_y + pan_y).clamp(-max_y, max_y);

        self.controls_visible = false;
        self.last_gesture = Some(now);
    }

    /// Half of the overflow on one axis; zero once the image fits.
    fn max_offset(extent: f32, scale: f32) -> f32 {
        ((extent * (scale - 1.0)) / 2.0).max(0.0)
    }

    /// Bring the controls back once the hide duration has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.last_gesture {
            if now.saturating_duration_since(at) >= CONTROLS_HIDE_DURATION {
                self.controls_visible = true;
                self.last_gesture = None;
            }
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        let v = Viewport::new(400.0, 300.0);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.offset(), (0.0, 0.0));
        assert!(v.controls_visible());
    }

    #[test]
    fn test_scale_clamped() {
        let now = Instant::now();
        let mut v = Viewport::new(400.0, 300.0);
        v.transform(0.0, 0.0, 10.0, now);
        assert_eq!(v.scale(), MAX_SCALE);
        v.transform(0.0, 0.0, 0.01, now);
        assert_eq!(v.scale(), MIN_SCALE);
    }

    #[test]
    fn test_pan_clamped_to_overflow() {
        let now = Instant::now();
        let mut v = Viewport::new(400.0, 300.0);
        v.transform(1000.0, -1000.0, 2.0, now);
        // overflow at 2x: 400/2 = 200 horizontally, 300/2 = 150 vertically
        assert_eq!(v.offset(), (200.0, -150.0));
    }

    #[test]
    fn test_no_pan_when_not_zoomed_in() {
        let now = Instant::now();
        let mut v = Viewport::new(400.0, 300.0);
        v.transform(50.0, 50.0, 1.0, now);
        assert_eq!(v.offset(), (0.0, 0.0));
        v.transform(50.0, 50.0, 0.5, now);
        assert_eq!(v.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_zoom_out_pulls_offset_back_in() {
        let now = Instant::now();
        let mut v = Viewport::new(400.0, 300.0);
        v.transform(200.0, 0.0, 2.0, now);
        assert_eq!(v.offset().0, 200.0);
        v.transform(0.0, 0.0, 0.75, now);
        // 1.5x: 400 * 0.5 / 2 = 100
        assert_eq!(v.offset().0, 100.0);
    }

    #[test]
    fn test_controls_hidden_then_restored() {
        let start = Instant::now();
        let mut v = Viewport::new(400.0, 300.0);
        v.transform(0.0, 0.0, 1.2, start);
        assert!(!v.controls_visible());

        v.tick(start + Duration::from_secs(2));
        assert!(!v.controls_visible());

        v.tick(start + CONTROLS_HIDE_DURATION);
        assert!(v.controls_visible());
    }

    #[test]
    fn test_new_gesture_restarts_hide_timer() {
        let start = Instant::now();
        let mut v = Viewport::new(400.0, 300.0);
        v.transform(0.0, 0.0, 1.2, start);
        v.transform(0.0, 0.0, 1.0, start + Duration::from_secs(2));
        v.tick(start + Duration::from_secs(4));
        assert!(!v.controls_visible());
        v.tick(start + Duration::from_secs(5));
        assert!(v.controls_visible());
    }
}
