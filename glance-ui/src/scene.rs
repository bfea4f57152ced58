// Retained scene: a fixed-capacity flat widget list with per-widget
// dirty flags. Two widget kinds cover the demo surface: styled boxes
// (corner radius up to a full circle) and mono-font labels. Hit testing
// walks the list back-to-front; a pressed box renders with its fill and
// border colors swapped (inverted highlight).

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_9X15},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyleBuilder, RoundedRectangle, StrokeAlignment},
    text::{Baseline, Text},
};

use crate::widget::{Alignment, Region};

pub const MAX_WIDGETS: usize = 16;

const FONT: &embedded_graphics::mono_font::MonoFont<'static> = &FONT_9X15;

/// Convert a 24-bit `0xRRGGBB` value to RGB565.
pub fn rgb(hex: u32) -> Rgb565 {
    Rgb565::new(
        ((hex >> 19) & 0x1f) as u8,
        ((hex >> 10) & 0x3f) as u8,
        ((hex >> 3) & 0x1f) as u8,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetId(u8);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStyle {
    pub bg: Rgb565,
    pub border: Rgb565,
    pub border_width: u32,
    /// Corner radius in pixels; half the box size yields a circle.
    pub radius: u32,
}

#[derive(Clone, Copy)]
struct LabelStyle {
    text: &'static str,
    color: Rgb565,
}

#[derive(Clone, Copy)]
enum Kind {
    Box(BoxStyle),
    Label(LabelStyle),
}

#[derive(Clone, Copy)]
struct Widget {
    kind: Kind,
    region: Region,
    visible: bool,
    dirty: bool,
}

pub struct Scene {
    size: Size,
    bg: Rgb565,
    widgets: [Option<Widget>; MAX_WIDGETS],
    pressed: Option<WidgetId>,
}

impl Scene {
    pub fn new(size: Size, bg: Rgb565) -> Self {
        Self {
            size,
            bg,
            widgets: [None; MAX_WIDGETS],
            pressed: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Rgb565 {
        self.bg
    }

    fn screen(&self) -> Region {
        Region::new(0, 0, self.size.width as u16, self.size.height as u16)
    }

    fn insert(&mut self, widget: Widget) -> Option<WidgetId> {
        for (i, slot) in self.widgets.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(widget);
                return Some(WidgetId(i as u8));
            }
        }
        None
    }

    fn place(&self, content: Size, align: Alignment, dx: i32, dy: i32) -> Region {
        let p = align.position(self.screen(), content) + Point::new(dx, dy);
        Region::new(
            p.x.max(0) as u16,
            p.y.max(0) as u16,
            content.width as u16,
            content.height as u16,
        )
    }

    /// Add a box of `w` x `h` pixels, aligned against the screen with a
    /// pixel offset. Returns `None` when the scene is full.
    pub fn add_box(
        &mut self,
        style: BoxStyle,
        w: u32,
        h: u32,
        align: Alignment,
        dx: i32,
        dy: i32,
    ) -> Option<WidgetId> {
        let region = self.place(Size::new(w, h), align, dx, dy);
        self.insert(Widget {
            kind: Kind::Box(style),
            region,
            visible: true,
            dirty: true,
        })
    }

    /// Add a static mono-font label, sized from its text.
    pub fn add_label(
        &mut self,
        text: &'static str,
        color: Rgb565,
        align: Alignment,
        dx: i32,
        dy: i32,
    ) -> Option<WidgetId> {
        let content = Size::new(
            FONT.character_size.width * text.chars().count() as u32,
            FONT.character_size.height,
        );
        let region = self.place(content, align, dx, dy);
        self.insert(Widget {
            kind: Kind::Label(LabelStyle { text, color }),
            region,
            visible: true,
            dirty: true,
        })
    }

    pub fn region_of(&self, id: WidgetId) -> Option<Region> {
        self.widgets[id.0 as usize].map(|w| w.region)
    }

    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.widgets[id.0 as usize].is_some_and(|w| w.visible)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(w) = self.widgets[id.0 as usize].as_mut()
            && w.visible != visible
        {
            w.visible = visible;
            w.dirty = true;
        }
    }

    pub fn toggle_visible(&mut self, id: WidgetId) {
        if let Some(w) = self.widgets[id.0 as usize].as_mut() {
            w.visible = !w.visible;
            w.dirty = true;
        }
    }

    /// Move the pressed highlight; both the old and new holder repaint.
    pub fn set_pressed(&mut self, id: Option<WidgetId>) {
        if self.pressed == id {
            return;
        }
        for touched in [self.pressed, id].into_iter().flatten() {
            if let Some(w) = self.widgets[touched.0 as usize].as_mut() {
                w.dirty = true;
            }
        }
        self.pressed = id;
    }

    pub fn pressed(&self) -> Option<WidgetId> {
        self.pressed
    }

    /// Topmost (most recently added) visible widget under the point.
    pub fn hit(&self, x: u16, y: u16) -> Option<WidgetId> {
        for (i, slot) in self.widgets.iter().enumerate().rev() {
            if let Some(w) = slot
                && w.visible
                && w.region.contains(x, y)
            {
                return Some(WidgetId(i as u8));
            }
        }
        None
    }

    pub fn has_dirty(&self) -> bool {
        self.widgets
            .iter()
            .flatten()
            .any(|w| w.dirty)
    }

    /// Clear to the background color and paint every visible widget.
    pub fn draw_all<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(self.bg)?;
        let pressed = self.pressed;
        for (i, slot) in self.widgets.iter_mut().enumerate() {
            if let Some(w) = slot {
                if w.visible {
                    draw_widget(target, w, pressed == Some(WidgetId(i as u8)))?;
                }
                w.dirty = false;
            }
        }
        Ok(())
    }

    /// Repaint only widgets flagged dirty, erasing their region first
    /// so a hidden widget actually disappears.
    pub fn draw_dirty<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let bg = self.bg;
        let pressed = self.pressed;
        for (i, slot) in self.widgets.iter_mut().enumerate() {
            if let Some(w) = slot
                && w.dirty
            {
                target.fill_solid(&w.region.to_rect(), bg)?;
                if w.visible {
                    draw_widget(target, w, pressed == Some(WidgetId(i as u8)))?;
                }
                w.dirty = false;
            }
        }
        Ok(())
    }
}

fn draw_widget<D>(target: &mut D, widget: &Widget, pressed: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match widget.kind {
        Kind::Box(style) => {
            let (fill, stroke) = if pressed {
                (style.border, style.bg)
            } else {
                (style.bg, style.border)
            };
            let mut builder = PrimitiveStyleBuilder::new().fill_color(fill);
            if style.border_width > 0 {
                builder = builder
                    .stroke_color(stroke)
                    .stroke_width(style.border_width)
                    .stroke_alignment(StrokeAlignment::Inside);
            }
            RoundedRectangle::with_equal_corners(
                widget.region.to_rect(),
                Size::new(style.radius, style.radius),
            )
            .into_styled(builder.build())
            .draw(target)
        }
        Kind::Label(label) => {
            Text::with_baseline(
                label.text,
                widget.region.top_left(),
                MonoTextStyle::new(FONT, label.color),
                Baseline::Top,
            )
            .draw(target)
            .map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn boxed(bg: u32, border: u32) -> BoxStyle {
        BoxStyle {
            bg: rgb(bg),
            border: rgb(border),
            border_width: 1,
            radius: 0,
        }
    }

    #[test]
    fn rgb_converts_pure_channels() {
        assert_eq!(rgb(0xff0000), Rgb565::RED);
        assert_eq!(rgb(0x00ff00), Rgb565::GREEN);
        assert_eq!(rgb(0x0000ff), Rgb565::BLUE);
        assert_eq!(rgb(0xffffff), Rgb565::WHITE);
    }

    #[test]
    fn label_region_sized_from_text() {
        let mut scene = Scene::new(Size::new(172, 320), Rgb565::BLACK);
        let id = scene
            .add_label("HELLO", Rgb565::WHITE, Alignment::TopLeft, 0, 0)
            .unwrap();
        let region = scene.region_of(id).unwrap();
        assert_eq!(region.w, 45); // 5 chars x 9 px
        assert_eq!(region.h, 15);
    }

    #[test]
    fn hit_prefers_topmost() {
        let mut scene = Scene::new(Size::new(172, 320), Rgb565::BLACK);
        let under = scene
            .add_box(boxed(0x00aa00, 0xffffff), 40, 40, Alignment::TopLeft, 0, 0)
            .unwrap();
        let over = scene
            .add_box(boxed(0xaa0000, 0xffffff), 20, 20, Alignment::TopLeft, 10, 10)
            .unwrap();
        assert_eq!(scene.hit(15, 15), Some(over));
        assert_eq!(scene.hit(2, 2), Some(under));
        assert_eq!(scene.hit(100, 100), None);
    }

    #[test]
    fn hidden_widgets_do_not_hit() {
        let mut scene = Scene::new(Size::new(172, 320), Rgb565::BLACK);
        let id = scene
            .add_box(boxed(0x0000aa, 0xffffff), 10, 10, Alignment::TopLeft, 0, 0)
            .unwrap();
        scene.set_visible(id, false);
        assert_eq!(scene.hit(5, 5), None);
    }

    #[test]
    fn draw_all_clears_dirty_and_paints_background() {
        let mut scene = Scene::new(Size::new(32, 32), Rgb565::RED);
        scene
            .add_box(boxed(0x0000ff, 0x0000ff), 8, 8, Alignment::TopLeft, 0, 0)
            .unwrap();
        let mut canvas = Canvas::new(32, 32);
        scene.draw_all(&mut canvas).unwrap();
        assert!(!scene.has_dirty());
        assert_eq!(canvas.get(30, 30), Rgb565::RED);
        assert_eq!(canvas.get(4, 4), Rgb565::BLUE);
    }

    #[test]
    fn draw_dirty_erases_hidden_widget() {
        let mut scene = Scene::new(Size::new(32, 32), Rgb565::BLACK);
        let id = scene
            .add_box(boxed(0x00ff00, 0x00ff00), 8, 8, Alignment::TopLeft, 0, 0)
            .unwrap();
        let mut canvas = Canvas::new(32, 32);
        scene.draw_all(&mut canvas).unwrap();
        assert_eq!(canvas.get(4, 4), Rgb565::GREEN);

        scene.set_visible(id, false);
        assert!(scene.has_dirty());
        scene.draw_dirty(&mut canvas).unwrap();
        assert_eq!(canvas.get(4, 4), Rgb565::BLACK);
        assert!(!scene.has_dirty());
    }

    #[test]
    fn pressed_box_swaps_fill_and_border() {
        let mut scene = Scene::new(Size::new(16, 16), Rgb565::BLACK);
        let style = BoxStyle {
            bg: Rgb565::BLUE,
            border: Rgb565::WHITE,
            border_width: 1,
            radius: 0,
        };
        let id = scene
            .add_box(style, 8, 8, Alignment::TopLeft, 0, 0)
            .unwrap();

        let mut canvas = Canvas::new(16, 16);
        scene.draw_all(&mut canvas).unwrap();
        assert_eq!(canvas.get(4, 4), Rgb565::BLUE);
        assert_eq!(canvas.get(0, 0), Rgb565::WHITE);

        scene.set_pressed(Some(id));
        scene.draw_dirty(&mut canvas).unwrap();
        assert_eq!(canvas.get(4, 4), Rgb565::WHITE);
        assert_eq!(canvas.get(0, 0), Rgb565::BLUE);
    }
}
