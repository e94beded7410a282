//! View modes of the editing area.

use std::fmt;
use std::str::FromStr;

use super::collaborators::PanelHost;

/// Which of the editor and preview panels are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Preview only
    ViewOnly,
    /// Editor only
    EditOnly,
    /// Editor and preview side by side
    #[default]
    EditAndView,
}

/// Visibility of the two editing-area panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub editor: bool,
    pub preview: bool,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::ViewOnly, ViewMode::EditOnly, ViewMode::EditAndView];

    pub fn panels(self) -> PanelVisibility {
        match self {
            ViewMode::ViewOnly => PanelVisibility {
                editor: false,
                preview: true,
            },
            ViewMode::EditOnly => PanelVisibility {
                editor: true,
                preview: false,
            },
            ViewMode::EditAndView => PanelVisibility {
                editor: true,
                preview: true,
            },
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::ViewOnly => "View Mode",
            ViewMode::EditOnly => "Edit Mode",
            ViewMode::EditAndView => "Edit/View Mode",
        }
    }

    /// Short command word
    pub fn command(self) -> &'static str {
        match self {
            ViewMode::ViewOnly => "view",
            ViewMode::EditOnly => "edit",
            ViewMode::EditAndView => "both",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ViewMode::ALL
            .into_iter()
            .find(|mode| {
                mode.command().eq_ignore_ascii_case(wanted)
                    || mode.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown view mode '{}'", wanted))
    }
}

/// Current view mode plus the independent note manager flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewModeController {
    mode: ViewMode,
    note_manager_visible: bool,
}

impl ViewModeController {
    /// Starts in [`ViewMode::EditAndView`] with the note manager hidden
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn note_manager_visible(&self) -> bool {
        self.note_manager_visible
    }

    pub fn set_mode(&mut self, mode: ViewMode, host: &mut impl PanelHost) {
        self.mode = mode;
        let panels = mode.panels();
        host.set_editor_visible(panels.editor);
        host.set_preview_visible(panels.preview);
    }

    pub fn set_note_manager_visible(&mut self, visible: bool, host: &mut impl PanelHost) {
        self.note_manager_visible = visible;
        host.set_note_manager_visible(visible);
    }

    /// Flip the note manager and return the new visibility
    pub fn toggle_note_manager(&mut self, host: &mut impl PanelHost) -> bool {
        let visible = !self.note_manager_visible;
        self.set_note_manager_visible(visible, host);
        visible
    }

    /// Push the whole state to `host`
    pub fn apply(&self, host: &mut impl PanelHost) {
        let panels = self.mode.panels();
        host.set_editor_visible(panels.editor);
        host.set_preview_visible(panels.preview);
        host.set_note_manager_visible(self.note_manager_visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Panels {
        editor: Option<bool>,
        preview: Option<bool>,
        note_manager: Option<bool>,
    }

    impl PanelHost for Panels {
        fn set_editor_visible(&mut self, visible: bool) {
            self.editor = Some(visible);
        }
        fn set_preview_visible(&mut self, visible: bool) {
            self.preview = Some(visible);
        }
        fn set_note_manager_visible(&mut self, visible: bool) {
            self.note_manager = Some(visible);
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = ViewModeController::new();
        assert_eq!(controller.mode(), ViewMode::EditAndView);
        assert!(!controller.note_manager_visible());
    }

    #[test]
    fn test_mode_table() {
        let cases = [
            (ViewMode::ViewOnly, false, true),
            (ViewMode::EditOnly, true, false),
            (ViewMode::EditAndView, true, true),
        ];

        for (mode, editor, preview) in cases {
            let mut controller = ViewModeController::new();
            let mut panels = Panels::default();
            controller.set_mode(mode, &mut panels);

            assert_eq!(controller.mode(), mode);
            assert_eq!(panels.editor, Some(editor), "editor for {mode}");
            assert_eq!(panels.preview, Some(preview), "preview for {mode}");
            assert_eq!(panels.note_manager, None, "{mode} must not touch the note manager");
        }
    }

    #[test]
    fn test_switching_modes_never_hides_both() {
        let mut controller = ViewModeController::new();
        let mut panels = Panels::default();

        for first in ViewMode::ALL {
            for second in ViewMode::ALL {
                controller.set_mode(first, &mut panels);
                controller.set_mode(second, &mut panels);
                assert_eq!(
                    (panels.editor, panels.preview),
                    (Some(second.panels().editor), Some(second.panels().preview))
                );
                assert!(panels.editor == Some(true) || panels.preview == Some(true));
            }
        }
    }

    #[test]
    fn test_toggle_note_manager_is_involution() {
        let mut controller = ViewModeController::new();
        let mut panels = Panels::default();

        assert!(controller.toggle_note_manager(&mut panels));
        assert_eq!(panels.note_manager, Some(true));
        assert!(!controller.toggle_note_manager(&mut panels));
        assert_eq!(panels.note_manager, Some(false));
        assert!(!controller.note_manager_visible());
        assert_eq!(controller.mode(), ViewMode::EditAndView);
    }

    #[test]
    fn test_apply_pushes_everything() {
        let controller = ViewModeController::new();
        let mut panels = Panels::default();
        controller.apply(&mut panels);

        assert_eq!(panels.editor, Some(true));
        assert_eq!(panels.preview, Some(true));
        assert_eq!(panels.note_manager, Some(false));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("view".parse::<ViewMode>(), Ok(ViewMode::ViewOnly));
        assert_eq!("Edit Mode".parse::<ViewMode>(), Ok(ViewMode::EditOnly));
        assert_eq!(" both ".parse::<ViewMode>(), Ok(ViewMode::EditAndView));
        assert!("split".parse::<ViewMode>().is_err());
    }
}
