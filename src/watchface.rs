//! Watchface layers and their layout.
//!
//! This module provides:
//! - `WatchfaceConfig`, the layout for a rectangular or round panel
//! - the hand shapes, painted as rotated rectangles
//! - `charge_color`, the battery gauge color map
//! - `Watchface`, which draws background, hands, date and battery in order
//!
//! Hands go through the rotated-rectangle rasterizer on a captured frame
//! buffer; everything else is plain embedded-graphics drawing.

use core::fmt::Write;

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{ascii::FONT_7X13, MonoTextStyle},
    prelude::{Point, Primitive, Size},
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use heapless::String;
use log::{debug, info};

use crate::clock::{month_abbrev, weekday_abbrev, DateTime, HandAngles};
use crate::color::Argb2222;
use crate::error::RenderError;
use crate::raster::{RasterStats, RotatedRect};
use crate::surface::{DisplayShape, FrameGuard, FrameHost};
use crate::trig::{angle_of, fixed_round, Trig};

// Panel sizes, (0,0) is top-left corner
pub const RECT_WIDTH: u32 = 144;
pub const RECT_HEIGHT: u32 = 168;
pub const ROUND_DIAMETER: u32 = 180;

const TICK_COUNT: i32 = 12;
const TICK_SPAN: i32 = 66;

const BACKGROUND: Argb2222 = Argb2222::BLACK;
const TICK_FILL: Argb2222 = Argb2222::WINDSOR_TAN;
const TICK_STROKE: Argb2222 = Argb2222::WHITE;
const TEXT_COLOR: Argb2222 = Argb2222::MEDIUM_AQUAMARINE;
const GAUGE_FRAME: Argb2222 = Argb2222::WHITE;
const HUB_COLOR: Argb2222 = Argb2222::WINDSOR_TAN;

/// One rectangle of a hand, in the hand's own frame: 12 o'clock is -y,
/// the rotation center is the origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HandShape {
    pub pt1: Point,
    pub pt2: Point,
    pub color: Argb2222,
}

impl HandShape {
    pub const fn new(pt1: Point, pt2: Point, color: Argb2222) -> Self {
        Self { pt1, pt2, color }
    }

    pub fn at(&self, center: Point, angle: i32) -> RotatedRect {
        RotatedRect::new(self.pt1, self.pt2, center, angle, self.color)
    }
}

/// Brass body with a limerick core, 42 px ahead and 14 px of tail.
pub const HOUR_HAND: [HandShape; 2] = [
    HandShape::new(Point::new(-3, -42), Point::new(3, 14), Argb2222::BRASS),
    HandShape::new(Point::new(-1, -40), Point::new(1, 12), Argb2222::LIMERICK),
];

pub const MINUTE_HAND: [HandShape; 1] = [HandShape::new(
    Point::new(-2, -60),
    Point::new(2, 20),
    Argb2222::PASTEL_YELLOW,
)];

/// Wide tail, thin needle.
pub const SECOND_HAND: [HandShape; 2] = [
    HandShape::new(Point::new(-2, 0), Point::new(2, 22), Argb2222::RAJAH),
    HandShape::new(Point::new(-1, -66), Point::new(1, 0), Argb2222::RAJAH),
];

// (threshold percent, color); last entry only ends the scan
const CHARGE_COLORS: [(i32, u32); 9] = [
    (100, 0x00FF55),
    (90, 0x00FF00),
    (80, 0x55FF00),
    (70, 0xAAFF00),
    (50, 0xFFFF00),
    (30, 0xFFAA00),
    (20, 0xFF5500),
    (0, 0xFF0000),
    (-1, 0xFFFFFF),
];

/// Battery gauge color: green when full, through yellow, red when empty.
pub fn charge_color(percent: i32) -> Argb2222 {
    let percent = percent.max(0);
    let mut i = 0;
    while i + 1 < CHARGE_COLORS.len() && percent <= CHARGE_COLORS[i + 1].0 {
        i += 1;
    }
    Argb2222::from_hex(CHARGE_COLORS[i].1)
}

/// Layout of every layer for one panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WatchfaceConfig {
    pub shape: DisplayShape,
    pub size: Size,
    pub tick_span: i32,
    pub tick_diameter: u32,
    pub hub_diameter: u32,
    pub charge_frame: Rectangle,
    /// Level bar at 100 %; narrower charges keep its left edge.
    pub charge_level: Rectangle,
    pub date_box: Rectangle,
    pub weekday_box: Rectangle,
}

impl WatchfaceConfig {
    pub fn rect(width: u32, height: u32) -> Self {
        let cx = (width / 2) as i32;
        let h = height as i32;
        Self {
            shape: DisplayShape::Rect,
            size: Size::new(width, height),
            tick_span: TICK_SPAN,
            tick_diameter: 7,
            hub_diameter: 11,
            charge_frame: Rectangle::new(Point::new(cx - 51, h - 8), Size::new(102, 8)),
            charge_level: Rectangle::new(Point::new(cx - 50, h - 7), Size::new(100, 6)),
            date_box: Rectangle::new(Point::new(0, 0), Size::new(64, 24)),
            weekday_box: Rectangle::new(Point::new(80, 0), Size::new(64, 24)),
        }
    }

    pub fn round(diameter: u32) -> Self {
        let c = (diameter / 2) as i32;
        Self {
            shape: DisplayShape::Round,
            size: Size::new(diameter, diameter),
            tick_span: TICK_SPAN,
            tick_diameter: 7,
            hub_diameter: 11,
            charge_frame: Rectangle::new(Point::new(c - 26, c + 74), Size::new(52, 8)),
            charge_level: Rectangle::new(Point::new(c - 25, c + 75), Size::new(50, 6)),
            date_box: Rectangle::new(Point::new(c - 35, c - 85), Size::new(64, 24)),
            weekday_box: Rectangle::new(Point::new(c + 40, c - 57), Size::new(32, 24)),
        }
    }

    /// Rotation center of the hands.
    pub fn center(&self) -> Point {
        Point::new((self.size.width / 2) as i32, (self.size.height / 2) as i32)
    }

    /// Level bar for `percent`, clamped to 0..=100.
    pub fn charge_level_at(&self, percent: i32) -> Rectangle {
        let full = self.charge_level.size.width;
        let width = full * percent.clamp(0, 100) as u32 / 100;
        Rectangle::new(
            self.charge_level.top_left,
            Size::new(width, self.charge_level.size.height),
        )
    }
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        if cfg!(feature = "round-display") {
            Self::round(ROUND_DIAMETER)
        } else {
            Self::rect(RECT_WIDTH, RECT_HEIGHT)
        }
    }
}

/// State the watchface carries between redraws, fed by the host's services.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WatchState {
    pub charge_percent: i32,
    pub last_weekday: Option<u8>,
}

impl WatchState {
    /// True once per day, when the weekday differs from the last drawn one.
    pub fn needs_date_redraw(&self, now: &DateTime) -> bool {
        self.last_weekday != Some(now.weekday())
    }
}

pub struct Watchface {
    config: WatchfaceConfig,
    pub state: WatchState,
    // Formatted once per day, painted every frame
    date_label: String<16>,
    weekday_label: &'static str,
}

impl Watchface {
    pub fn new(config: WatchfaceConfig) -> Self {
        Self {
            config,
            state: WatchState::default(),
            date_label: String::new(),
            weekday_label: "",
        }
    }

    #[inline]
    pub fn config(&self) -> &WatchfaceConfig {
        &self.config
    }

    pub fn set_charge(&mut self, percent: i32) {
        self.state.charge_percent = percent;
    }

    /// Black dial with twelve tick dots.
    pub fn draw_background<D, T>(&self, target: &mut D, trig: &T) -> Result<(), RenderError>
    where
        D: DrawTarget<Color = Argb2222>,
        T: Trig + ?Sized,
    {
        target.clear(BACKGROUND).map_err(|_| RenderError::Draw)?;

        let center = self.config.center();
        let style = PrimitiveStyleBuilder::new()
            .fill_color(TICK_FILL)
            .stroke_color(TICK_STROKE)
            .stroke_width(1)
            .build();

        for i in 0..TICK_COUNT {
            let angle = angle_of(i, TICK_COUNT);
            let tick = Point::new(
                center.x + fixed_round(trig.sin_lookup(angle) * self.config.tick_span),
                center.y - fixed_round(trig.cos_lookup(angle) * self.config.tick_span),
            );
            Circle::with_center(tick, self.config.tick_diameter)
                .into_styled(style)
                .draw(target)
                .map_err(|_| RenderError::Draw)?;
        }
        Ok(())
    }

    /// Hour, minute and second hands, then the hub dot on top.
    pub fn draw_hands<H, T>(
        &self,
        host: &mut H,
        trig: &T,
        angles: HandAngles,
    ) -> Result<RasterStats, RenderError>
    where
        H: FrameHost + DrawTarget<Color = Argb2222>,
        T: Trig + ?Sized,
    {
        let center = self.config.center();
        let mut stats = RasterStats::default();
        {
            let mut fb = FrameGuard::acquire(host)?;
            let hands: [(i32, &[HandShape]); 3] = [
                (angles.hour, &HOUR_HAND[..]),
                (angles.minute, &MINUTE_HAND[..]),
                (angles.second, &SECOND_HAND[..]),
            ];
            for (angle, shapes) in hands {
                for shape in shapes {
                    stats += fb.fill_rotated_rect(trig, &shape.at(center, angle))?;
                }
            }
        }

        Circle::with_center(center, self.config.hub_diameter)
            .into_styled(PrimitiveStyle::with_fill(HUB_COLOR))
            .draw(host)
            .map_err(|_| RenderError::Draw)?;

        debug!("hands {:?} {:?}", angles, stats);
        Ok(stats)
    }

    #[inline]
    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    #[inline]
    pub fn weekday_label(&self) -> &str {
        self.weekday_label
    }

    /// Re-format the date labels if the weekday changed since the last
    /// refresh. Returns whether they changed.
    pub fn refresh_date(&mut self, now: &DateTime) -> Result<bool, RenderError> {
        if !self.state.needs_date_redraw(now) {
            return Ok(false);
        }
        let weekday = now.weekday();
        self.date_label.clear();
        write!(self.date_label, "{} {:02}", month_abbrev(now.month), now.day)
            .map_err(|_| RenderError::Draw)?;
        self.weekday_label = weekday_abbrev(weekday);
        self.state.last_weekday = Some(weekday);
        debug!("date labels {} {}", self.date_label, self.weekday_label);
        Ok(true)
    }

    /// `"Nov 14"` and `"Tue"` in their boxes.
    pub fn draw_date<D>(&mut self, target: &mut D, now: &DateTime) -> Result<(), RenderError>
    where
        D: DrawTarget<Color = Argb2222>,
    {
        self.refresh_date(now)?;

        let char_style = MonoTextStyle::new(&FONT_7X13, TEXT_COLOR);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(
            &self.date_label,
            self.config.date_box.center(),
            char_style,
            text_style,
        )
        .draw(target)
        .map_err(|_| RenderError::Draw)?;
        Text::with_text_style(
            self.weekday_label,
            self.config.weekday_box.center(),
            char_style,
            text_style,
        )
        .draw(target)
        .map_err(|_| RenderError::Draw)?;
        Ok(())
    }

    /// Level bar in the charge color inside a white frame.
    pub fn draw_battery<D>(&self, target: &mut D) -> Result<(), RenderError>
    where
        D: DrawTarget<Color = Argb2222>,
    {
        let percent = self.state.charge_percent;
        self.config
            .charge_level_at(percent)
            .into_styled(PrimitiveStyle::with_fill(charge_color(percent)))
            .draw(target)
            .map_err(|_| RenderError::Draw)?;
        self.config
            .charge_frame
            .into_styled(PrimitiveStyle::with_stroke(GAUGE_FRAME, 1))
            .draw(target)
            .map_err(|_| RenderError::Draw)
    }

    /// Full redraw for `now`, layers bottom to top.
    pub fn redraw<H, T>(
        &mut self,
        host: &mut H,
        trig: &T,
        now: &DateTime,
    ) -> Result<RasterStats, RenderError>
    where
        H: FrameHost + DrawTarget<Color = Argb2222>,
        T: Trig + ?Sized,
    {
        info!(
            "redraw {:02}:{:02}:{:02} charge={}%",
            now.hour, now.minute, now.second, self.state.charge_percent
        );
        self.draw_background(host, trig)?;
        let stats = self.draw_hands(host, trig, now.hand_angles())?;
        self.draw_date(host, now)?;
        self.draw_battery(host)?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Framebuffer;
    use crate::trig::SineTable;

    #[test]
    fn charge_colors_step_down_with_the_level() {
        assert_eq!(charge_color(100), Argb2222::from_rgb(0, 3, 1));
        assert_eq!(charge_color(150), Argb2222::from_rgb(0, 3, 1));
        assert_eq!(charge_color(95), Argb2222::from_rgb(0, 3, 1));
        assert_eq!(charge_color(90), Argb2222::GREEN);
        assert_eq!(charge_color(60), Argb2222::from_rgb(2, 3, 0));
        assert_eq!(charge_color(50), Argb2222::YELLOW);
        assert_eq!(charge_color(25), Argb2222::from_rgb(3, 2, 0));
        assert_eq!(charge_color(10), Argb2222::from_rgb(3, 1, 0));
        assert_eq!(charge_color(0), Argb2222::RED);
        assert_eq!(charge_color(-10), Argb2222::RED);
    }

    #[test]
    fn rect_layout_hugs_the_bottom_edge() {
        let cfg = WatchfaceConfig::rect(RECT_WIDTH, RECT_HEIGHT);
        assert_eq!(cfg.center(), Point::new(72, 84));
        assert_eq!(cfg.charge_frame.top_left, Point::new(21, 160));
        assert_eq!(cfg.charge_level_at(37).size, Size::new(37, 6));
        assert_eq!(cfg.charge_level_at(250).size, Size::new(100, 6));
        assert_eq!(cfg.charge_level_at(-4).size, Size::new(0, 6));
    }

    #[test]
    fn round_layout_halves_the_gauge() {
        let cfg = WatchfaceConfig::round(ROUND_DIAMETER);
        assert_eq!(cfg.shape, DisplayShape::Round);
        assert_eq!(cfg.center(), Point::new(90, 90));
        assert_eq!(cfg.charge_level_at(80).size, Size::new(40, 6));
        assert_eq!(cfg.charge_frame.top_left, Point::new(64, 164));
    }

    #[test]
    fn hand_shapes_are_well_formed() {
        for shape in HOUR_HAND.iter().chain(&MINUTE_HAND).chain(&SECOND_HAND) {
            assert!(!shape.at(Point::zero(), 0).is_degenerate(), "{shape:?}");
        }
    }

    #[test]
    fn date_redraw_only_when_weekday_changes() {
        let monday = DateTime { year: 2024, month: 1, day: 1, hour: 9, minute: 0, second: 0 };
        let later = DateTime { hour: 23, ..monday };
        let tuesday = DateTime { day: 2, hour: 0, ..monday };

        let mut state = WatchState::default();
        assert!(state.needs_date_redraw(&monday));
        state.last_weekday = Some(monday.weekday());
        assert!(!state.needs_date_redraw(&later));
        assert!(state.needs_date_redraw(&tuesday));
    }

    #[test]
    fn ticks_sit_on_twelfths_of_a_turn() {
        let mut bytes = [0u8; (RECT_WIDTH * RECT_HEIGHT) as usize];
        let mut fb =
            Framebuffer::new(&mut bytes, RECT_WIDTH, RECT_HEIGHT, DisplayShape::Rect).unwrap();
        let face = Watchface::new(WatchfaceConfig::rect(RECT_WIDTH, RECT_HEIGHT));
        face.draw_background(&mut fb, &SineTable::new()).unwrap();

        // 12, 1, 3, 6 and 9 o'clock around (72, 84) at radius 66
        for (x, y) in [(72, 18), (105, 27), (138, 84), (72, 150), (6, 84)] {
            assert_eq!(fb.pixel(x, y), Some(TICK_FILL), "tick at ({x},{y})");
        }
        assert_eq!(fb.pixel(72, 84), Some(BACKGROUND));
    }

    #[test]
    fn date_labels_follow_the_weekday() {
        let mut face = Watchface::new(WatchfaceConfig::rect(RECT_WIDTH, RECT_HEIGHT));
        let monday = DateTime { year: 2024, month: 1, day: 1, hour: 9, minute: 0, second: 0 };

        assert_eq!(face.refresh_date(&monday), Ok(true));
        assert_eq!((face.date_label(), face.weekday_label()), ("Jan 01", "Mon"));

        // Same weekday: labels are kept, even a week later
        assert_eq!(face.refresh_date(&DateTime { hour: 23, ..monday }), Ok(false));
        assert_eq!(face.refresh_date(&DateTime { day: 8, ..monday }), Ok(false));
        assert_eq!(face.date_label(), "Jan 01");

        let tuesday = DateTime { day: 2, hour: 0, ..monday };
        assert_eq!(face.refresh_date(&tuesday), Ok(true));
        assert_eq!((face.date_label(), face.weekday_label()), ("Jan 02", "Tue"));
        assert_eq!(face.state.last_weekday, Some(2));
    }
}
