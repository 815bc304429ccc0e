//! Responsive navigation sidebar state
//!
//! On narrow viewports (width at or below the breakpoint) the sidebar is an
//! overlay: clicking anywhere outside it closes it. Widening the viewport past
//! the breakpoint also closes it, since the wide layout shows it inline.

/// Open/closed state of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
    open: bool,
    breakpoint: u32,
}

/// Where a click landed relative to the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the sidebar panel
    Sidebar,
    /// On the toggle button
    Toggle,
    /// Anywhere else
    Outside,
}

impl Sidebar {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            open: false,
            breakpoint,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip open/closed, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Handle a click; returns true if it closed the sidebar
    pub fn on_click(&mut self, target: ClickTarget, viewport_width: u32) -> bool {
        if self.open && viewport_width <= self.breakpoint && target == ClickTarget::Outside {
            self.open = false;
            return true;
        }
        false
    }

    /// Handle a viewport resize; returns true if it closed the sidebar
    pub fn on_resize(&mut self, viewport_width: u32) -> bool {
        if self.open && viewport_width > self.breakpoint {
            self.open = false;
            return true;
        }
        false
    }
}
