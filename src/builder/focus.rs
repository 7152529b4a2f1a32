#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pane {
    Palette,
    #[default]
    Preview,
    Settings,
}

impl Pane {
    pub fn label(self) -> &'static str {
        match self {
            Pane::Palette => "palette",
            Pane::Preview => "preview",
            Pane::Settings => "settings",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FocusState {
    pub pane: Pane,
}

impl FocusState {
    pub fn new(pane: Pane) -> Self {
        Self { pane }
    }

    /// Settings is skipped while no field is open for editing.
    pub fn next(&mut self, settings_open: bool) {
        self.pane = match self.pane {
            Pane::Palette => Pane::Preview,
            Pane::Preview if settings_open => Pane::Settings,
            Pane::Preview => Pane::Palette,
            Pane::Settings => Pane::Palette,
        };
    }

    pub fn prev(&mut self, settings_open: bool) {
        self.pane = match self.pane {
            Pane::Palette if settings_open => Pane::Settings,
            Pane::Palette => Pane::Preview,
            Pane::Preview => Pane::Palette,
            Pane::Settings => Pane::Preview,
        };
    }

    pub fn leave_settings(&mut self) {
        if self.pane == Pane::Settings {
            self.pane = Pane::Preview;
        }
    }
}
