//! Scene renderer
//!
//! Renders a [`Scene`] onto any embedded-graphics target with RGB565
//! pixels (the GC9A01 panel on the badge). Each label is drawn centred on
//! its anchor: scale 1 uses a 6x10 font, scale 2 and up a 10x20 font.
//! Multi-line labels are centred as a block.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::ContainsPoint;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use m8b_core::scene::{Label, Scene, Tone};
use m8b_core::traits::{Display, DisplayError};

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;
pub const PRIMARY: Rgb565 = Rgb565::WHITE;
pub const SECONDARY: Rgb565 = Rgb565::new(0x10, 0x20, 0x10);

fn font_for(scale: u8) -> &'static MonoFont<'static> {
    if scale >= 2 {
        &FONT_10X20
    } else {
        &FONT_6X10
    }
}

fn color_for(tone: Tone) -> Rgb565 {
    match tone {
        Tone::Primary => PRIMARY,
        Tone::Secondary => SECONDARY,
    }
}

fn draw_label<D>(target: &mut D, label: &Label) -> Result<(), DisplayError>
where
    D: DrawTarget<Color = Rgb565>,
{
    let anchor = Point::new(label.x as i32, label.y as i32);
    if !target.bounding_box().contains(anchor) {
        return Err(DisplayError::OutOfBounds);
    }

    let font = font_for(label.scale);
    let lines = label.text().matches('\n').count() as i32 + 1;
    let line_height = font.character_size.height as i32;
    let first_line = anchor - Point::new(0, (lines - 1) * line_height / 2);

    let character_style = MonoTextStyle::new(font, color_for(label.tone));
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    Text::with_text_style(label.text(), first_line, character_style, text_style)
        .draw(target)
        .map_err(|_| DisplayError::Interface)?;
    Ok(())
}

/// Display backed by an embedded-graphics draw target
pub struct SceneRenderer<D> {
    target: D,
    scene: Option<Scene>,
    hidden: bool,
}

impl<D: DrawTarget<Color = Rgb565>> SceneRenderer<D> {
    pub fn new(target: D) -> Self {
        Self {
            target,
            scene: None,
            hidden: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn release(self) -> D {
        self.target
    }

    /// Clear the panel and draw the current scene, unless hidden
    fn render(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(BACKGROUND)
            .map_err(|_| DisplayError::Interface)?;

        if self.hidden {
            return Ok(());
        }
        let Some(scene) = self.scene.as_ref() else {
            return Ok(());
        };
        for label in scene.labels() {
            draw_label(&mut self.target, label)?;
        }
        Ok(())
    }
}

impl<D: DrawTarget<Color = Rgb565>> Display for SceneRenderer<D> {
    fn set_root(&mut self, scene: &Scene) -> Result<(), DisplayError> {
        self.scene = Some(scene.clone());
        self.render()
    }

    fn set_hidden(&mut self, hidden: bool) -> Result<(), DisplayError> {
        if self.hidden == hidden {
            return Ok(());
        }
        self.hidden = hidden;
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use m8b_core::scene::{CENTER, PANEL_SIZE};

    /// Records where lit pixels land
    struct Canvas {
        clears: u32,
        lit: u32,
        colors_seen: [bool; 2],
        min: Point,
        max: Point,
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                clears: 0,
                lit: 0,
                colors_seen: [false; 2],
                min: Point::new(i32::MAX, i32::MAX),
                max: Point::new(i32::MIN, i32::MIN),
            }
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(PANEL_SIZE as u32, PANEL_SIZE as u32)
        }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if color == BACKGROUND {
                    continue;
                }
                self.lit += 1;
                self.colors_seen[0] |= color == PRIMARY;
                self.colors_seen[1] |= color == SECONDARY;
                self.min = Point::new(self.min.x.min(point.x), self.min.y.min(point.y));
                self.max = Point::new(self.max.x.max(point.x), self.max.y.max(point.y));
            }
            Ok(())
        }

        fn clear(&mut self, _color: Self::Color) -> Result<(), Self::Error> {
            *self = Self {
                clears: self.clears + 1,
                ..Self::new()
            };
            Ok(())
        }
    }

    fn scene_with(label: Label) -> Scene {
        let mut scene = Scene::new();
        scene.push(label);
        scene
    }

    #[test]
    fn test_label_is_centred_on_anchor() {
        let mut display = SceneRenderer::new(Canvas::new());
        let scene = scene_with(Label::new("Yes", CENTER, CENTER).with_scale(2));
        display.set_root(&scene).unwrap();

        let canvas = display.target();
        assert_eq!(canvas.clears, 1);
        assert!(canvas.lit > 0);
        assert!(canvas.min.x >= 100 && canvas.max.x <= 140);
        assert!(canvas.min.y >= 105 && canvas.max.y <= 135);
        assert!(canvas.min.x < 120 && canvas.max.x > 120);
    }

    #[test]
    fn test_multi_line_block_straddles_anchor() {
        let mut display = SceneRenderer::new(Canvas::new());
        let scene = scene_with(Label::new("It's a\nbug", CENTER, CENTER));
        display.set_root(&scene).unwrap();

        let canvas = display.target();
        assert!(canvas.min.y < 115);
        assert!(canvas.max.y > 125);
    }

    #[test]
    fn test_secondary_tone_is_grey() {
        let mut display = SceneRenderer::new(Canvas::new());
        let scene = scene_with(Label::new("Hold B to quit", CENTER, 200).with_tone(Tone::Secondary));
        display.set_root(&scene).unwrap();

        let canvas = display.target();
        assert_eq!(canvas.colors_seen, [false, true]);
    }

    #[test]
    fn test_hidden_blanks_until_shown() {
        let mut display = SceneRenderer::new(Canvas::new());
        display.set_hidden(true).unwrap();
        display.set_root(&scene_with(Label::new("Yes", CENTER, CENTER))).unwrap();
        assert!(display.is_hidden());
        assert_eq!(display.target().lit, 0);

        display.set_hidden(false).unwrap();
        assert!(display.target().lit > 0);
    }

    #[test]
    fn test_anchor_off_panel() {
        let mut display = SceneRenderer::new(Canvas::new());
        let scene = scene_with(Label::new("Yes", CENTER, PANEL_SIZE + 10));
        assert_eq!(display.set_root(&scene), Err(DisplayError::OutOfBounds));
    }
}
