/// Downward drag distance needed to trigger a refresh.
pub const PULL_THRESHOLD: f32 = 120.0;

/// Pull-to-refresh gesture tracker for the photo grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullToRefresh {
    delta_y: f32,
    pulling: bool,
}

impl PullToRefresh {
    pub fn drag_start(&mut self) {
        self.pulling = true;
    }

    /// Only downward movement counts toward the threshold.
    pub fn drag(&mut self, dy: f32) {
        if self.pulling && dy > 0.0 {
            self.delta_y += dy;
        }
    }

    /// Returns true when the caller should start a refresh.
    pub fn drag_end(&mut self, is_refreshing: bool) -> bool {
        let trigger = self.pulling && self.delta_y > PULL_THRESHOLD && !is_refreshing;
        self.reset();
        trigger
    }

    pub fn drag_cancel(&mut self) {
        self.reset();
    }

    /// Whether a progress indicator should be shown for the gesture itself.
    pub fn is_pulling(&self) -> bool {
        self.pulling
    }

    fn reset(&mut self) {
        self.delta_y = 0.0;
        self.pulling = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_past_threshold() {
        let mut p = PullToRefresh::default();
        p.drag_start();
        assert!(p.is_pulling());
        p.drag(80.0);
        p.drag(50.0);
        assert!(p.drag_end(false));
        assert!(!p.is_pulling());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut p = PullToRefresh::default();
        p.drag_start();
        p.drag(PULL_THRESHOLD);
        assert!(!p.drag_end(false));
    }

    #[test]
    fn test_upward_movement_ignored() {
        let mut p = PullToRefresh::default();
        p.drag_start();
        p.drag(100.0);
        p.drag(-500.0);
        p.drag(30.0);
        assert!(p.drag_end(false));
    }

    #[test]
    fn test_no_trigger_while_refreshing() {
        let mut p = PullToRefresh::default();
        p.drag_start();
        p.drag(500.0);
        assert!(!p.drag_end(true));
    }

    #[test]
    fn test_cancel_resets() {
        let mut p = PullToRefresh::default();
        p.drag_start();
        p.drag(500.0);
        p.drag_cancel();
        assert!(!p.is_pulling());
        p.drag_start();
        assert!(!p.drag_end(false));
    }
}
