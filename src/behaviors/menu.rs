/// Where a click landed relative to the mobile navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Toggle,
    NavLink,
    InsideNav,
    Outside,
}

/// Open/closed state of the mobile navigation drawer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Applies a click and returns `true` if the open state changed.
    pub fn on_click(&mut self, target: ClickTarget) -> bool {
        let open = match target {
            ClickTarget::Toggle => !self.open,
            ClickTarget::NavLink | ClickTarget::Outside => false,
            ClickTarget::InsideNav => self.open,
        };
        let changed = open != self.open;
        self.open = open;
        changed
    }
}
