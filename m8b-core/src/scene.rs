//! Scene model
//!
//! A scene is the root drawable an app hands to the display: a short
//! list of centred text labels on a 240x240 round panel. Apps mutate
//! their scene and the display renders it.

use core::fmt::Write;

use heapless::{String, Vec};

/// Panel width and height in pixels
pub const PANEL_SIZE: i16 = 240;

/// Centre of the panel
pub const CENTER: i16 = PANEL_SIZE / 2;

/// Maximum characters per label (including line breaks)
pub const LABEL_LEN: usize = 40;

/// Maximum labels per scene
pub const MAX_LABELS: usize = 6;

/// Label colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    /// White text
    Primary,
    /// Grey text for hints and neighbouring menu entries
    Secondary,
}

/// A text label anchored at its centre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String<LABEL_LEN>,
    /// Anchor x in pixels
    pub x: i16,
    /// Anchor y in pixels
    pub y: i16,
    /// Text scale (1 = small font, 2 = large font)
    pub scale: u8,
    pub tone: Tone,
}

impl Label {
    pub fn new(text: &str, x: i16, y: i16) -> Self {
        let mut label = Self {
            text: String::new(),
            x,
            y,
            scale: 1,
            tone: Tone::Primary,
        };
        label.replace_text(text);
        label
    }

    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Replace the text, truncating at the label capacity
    fn replace_text(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }
}

/// Index of a label inside its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LabelId(u8);

/// Root drawable handed to the display
#[derive(Debug, Clone)]
pub struct Scene {
    labels: Vec<Label, MAX_LABELS>,
    dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            dirty: true,
        }
    }

    /// Add a label
    ///
    /// Scenes are built once at app start; adding more than
    /// [`MAX_LABELS`] labels returns the id of the last slot instead.
    pub fn push(&mut self, label: Label) -> LabelId {
        let _ = self.labels.push(label);
        self.dirty = true;
        LabelId((self.labels.len().max(1) - 1) as u8)
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(id.0 as usize)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Text of a label, empty when the id is unknown
    pub fn text(&self, id: LabelId) -> &str {
        self.label(id).map(Label::text).unwrap_or("")
    }

    /// Set the text of a label, marking the scene dirty on change
    pub fn set_text(&mut self, id: LabelId, text: &str) {
        if let Some(label) = self.labels.get_mut(id.0 as usize) {
            if label.text() != text {
                label.replace_text(text);
                self.dirty = true;
            }
        }
    }

    /// Set the text of a label from format arguments
    ///
    /// Output beyond the label capacity is dropped.
    pub fn set_fmt(&mut self, id: LabelId, args: core::fmt::Arguments<'_>) {
        let mut buf: String<LABEL_LEN> = String::new();
        let _ = buf.write_fmt(args);
        self.set_text(id, &buf);
    }

    pub fn set_scale(&mut self, id: LabelId, scale: u8) {
        if let Some(label) = self.labels.get_mut(id.0 as usize) {
            if label.scale != scale {
                label.scale = scale;
                self.dirty = true;
            }
        }
    }

    /// Check whether anything changed since the last [`Scene::mark_clean`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut scene = Scene::new();
        let id = scene.push(Label::new("Shake me!", CENTER, CENTER));
        scene.mark_clean();

        scene.set_text(id, "Shake me!");
        assert!(!scene.is_dirty());

        scene.set_text(id, "Yes");
        assert!(scene.is_dirty());
        assert_eq!(scene.text(id), "Yes");
    }

    #[test]
    fn test_long_text_is_truncated() {
        let mut scene = Scene::new();
        let id = scene.push(Label::new("", 0, 0));
        scene.set_text(id, "0123456789012345678901234567890123456789EXTRA");
        assert_eq!(scene.text(id).len(), LABEL_LEN);
    }

    #[test]
    fn test_set_fmt() {
        let mut scene = Scene::new();
        let id = scene.push(Label::new("", 0, 0));
        scene.set_fmt(id, format_args!("Accel: ({:.1}, {:.1})", 0.04f32, -1.0f32));
        assert_eq!(scene.text(id), "Accel: (0.0, -1.0)");
    }
}
