use sfml::graphics::{
    Color, FloatRect, Font, RectangleShape, RenderTarget, RenderTexture, RenderWindow, Shape,
    Sprite, Text, Transformable, View,
};
use sfml::system::{Clock, Vector2f, Vector2u};
use sfml::window::{mouse, ContextSettings, Event, Key, Style, VideoMode};
use sfml::SfBox;

use bitflags::bitflags;

use crate::canvas::SfmlCanvas;
use crate::config::Config;
use crate::controller::CircleController;
use crate::error::Error;
use crate::quiz::{OptionMark, Phase, QuizEngine};
use crate::renderer::{Canvas, CircleRenderer};
use crate::scheduler::FrameQueue;
use crate::theme::{Palette, ThemeColor, ThemeProvider};

bitflags! {
    pub struct Flags: u8 {
        const FULLSCREEN = 1 << 0;
        const FONT_FAILURE = 1 << 1;
        const DRAW_GUI = 1 << 2;
    }
}

const MIN_WIDTH: u32 = 600;
const MIN_HEIGHT: u32 = 400;

const PADDING: f32 = 24.0;
const READOUT_HEIGHT: f32 = 70.0;
const TITLE_SIZE: u32 = 22;
const BODY_SIZE: u32 = 18;
const SMALL_SIZE: u32 = 15;
const OPTION_HEIGHT: f32 = 46.0;
const OPTION_GAP: f32 = 10.0;
const PROGRESS_HEIGHT: f32 = 8.0;
const BUTTON_WIDTH: f32 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Start,
    Select(usize),
    Next,
    Restart,
}

/// Where the two panels sit inside the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub surface_side: u32,
    pub circle_origin: Vector2f,
    pub quiz_panel: FloatRect,
}

impl Layout {
    pub fn for_window(size: Vector2u) -> Layout {
        let half = size.x as f32 / 2.0;
        let available = (size.y as f32 - READOUT_HEIGHT).max(1.0);
        let side = half.min(available).max(1.0);

        Layout {
            surface_side: side as u32,
            circle_origin: Vector2f::new((half - side) / 2.0, 0.0),
            quiz_panel: FloatRect::new(
                half + PADDING,
                PADDING,
                (half - 2.0 * PADDING).max(1.0),
                (size.y as f32 - 2.0 * PADDING).max(1.0),
            ),
        }
    }
}

pub struct App {
    pub fps_clock: SfBox<Clock>,
    pub ctx_settings: ContextSettings,

    pub flags: Flags,
    pub font: Option<SfBox<Font>>,
    font_path: String,

    pub debug_text: String,

    pub window: Option<RenderWindow>,
    pub size: Vector2u,
    pub fps_limit: u32,

    controller: CircleController<FrameQueue, Palette>,
    quiz: QuizEngine,
    hit_regions: Vec<(FloatRect, QuizAction)>,

    surface: Option<RenderTexture>,
    layout: Layout,
}

impl App {
    //
    // Lifecycle code
    //

    pub fn new(config: &Config, palette: Palette, quiz: QuizEngine) -> App {
        let mut ctx_settings = ContextSettings::default();
        ctx_settings.antialiasing_level = config.window.antialiasing;

        let size: Vector2u = (
            config.window.width.max(MIN_WIDTH),
            config.window.height.max(MIN_HEIGHT),
        )
            .into();

        App {
            fps_clock: Clock::start(),
            ctx_settings,
            flags: Flags::empty(),
            font: None,
            font_path: config.window.font.clone(),
            debug_text: String::new(),
            window: None,
            size,
            fps_limit: config.window.fps_limit,
            controller: CircleController::new(FrameQueue::new(), CircleRenderer::new(palette)),
            quiz,
            hit_regions: Vec::new(),
            surface: None,
            layout: Layout::for_window(size),
        }
    }

    pub fn init(&mut self, full: bool) {
        if full {
            match Font::from_file(&self.font_path) {
                Some(font) => self.font = Some(font),
                None => {
                    log::warn!("{}, text will not be drawn", Error::Font(self.font_path.clone()));
                    self.flags |= Flags::FONT_FAILURE;
                }
            }
        }

        if let Some(window) = self.window.as_mut() {
            if window.is_open() {
                window.close()
            }
        }

        let mut window = RenderWindow::new(
            if self.flags.contains(Flags::FULLSCREEN) {
                VideoMode::desktop_mode()
            } else {
                VideoMode::from((self.size.x, self.size.y))
            },
            "Радианы и градусы",
            if self.flags.contains(Flags::FULLSCREEN) {
                Style::FULLSCREEN
            } else {
                Style::DEFAULT
            },
            &self.ctx_settings,
        );
        window.set_framerate_limit(self.fps_limit);
        window.set_key_repeat_enabled(true);

        let window_size = window.size();
        self.window = Some(window);
        self.resize_surface(window_size);
    }

    pub fn run(&mut self) {
        if self.window.is_none() {
            self.init(true);
        }
        log::info!("Window open, {}x{}", self.size.x, self.size.y);

        'main_loop: while self.window.as_ref().map_or(false, |window| window.is_open()) {
            while let Some(event) = self.window.as_mut().and_then(|window| window.poll_event()) {
                match event {
                    Event::Closed => {
                        self.close();
                        break 'main_loop;
                    }
                    Event::KeyPressed { code, .. } => {
                        if !self.process_key(code) {
                            break 'main_loop;
                        }
                    }
                    Event::MouseButtonPressed {
                        button: mouse::Button::Left,
                        x,
                        y,
                    } => self.process_click(Vector2f::new(x as f32, y as f32)),
                    Event::Resized { width, height } => {
                        let new_width = width.max(MIN_WIDTH);
                        let new_height = height.max(MIN_HEIGHT);

                        if let Some(window) = self.window.as_mut() {
                            window.set_view(&View::from_rect(FloatRect::new(
                                0.0,
                                0.0,
                                new_width as f32,
                                new_height as f32,
                            )));
                            if width < MIN_WIDTH || height < MIN_HEIGHT {
                                window.set_size((new_width, new_height));
                            }
                        }
                        self.resize_surface((new_width, new_height).into());
                    }
                    _ => (),
                }
            }

            self.with_canvas(|controller, canvas| {
                controller.on_frame(canvas);
            });

            self.request_update();
            self.request_draw();
            if let Some(window) = self.window.as_mut() {
                window.display();
            }
        }

        log::info!("Shutting down");
    }

    fn close(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.close();
        }
    }

    //
    // Input processing code
    //

    pub fn process_key(&mut self, code: Key) -> bool {
        match code {
            Key::Escape => {
                self.close();
                return false;
            }
            Key::Left => self.with_canvas(|controller, canvas| controller.decrement(canvas)),
            Key::Right => self.with_canvas(|controller, canvas| controller.increment(canvas)),
            Key::Space => self.controller.toggle_play(),
            Key::Enter => {
                if let Some(action) = enter_action(self.quiz.phase()) {
                    self.apply_quiz_action(action);
                }
            }
            Key::Num1 | Key::Numpad1 => self.apply_quiz_action(QuizAction::Select(0)),
            Key::Num2 | Key::Numpad2 => self.apply_quiz_action(QuizAction::Select(1)),
            Key::Num3 | Key::Numpad3 => self.apply_quiz_action(QuizAction::Select(2)),
            Key::Num4 | Key::Numpad4 => self.apply_quiz_action(QuizAction::Select(3)),
            Key::F3 => self.flags.toggle(Flags::DRAW_GUI),
            Key::F | Key::F11 => {
                self.flags.toggle(Flags::FULLSCREEN);
                self.init(false);
            }
            _ => (),
        }
        true
    }

    fn process_click(&mut self, point: Vector2f) {
        let action = self
            .hit_regions
            .iter()
            .find(|(rect, _)| rect.contains(point))
            .map(|(_, action)| *action);

        if let Some(action) = action {
            self.apply_quiz_action(action);
        }
    }

    fn apply_quiz_action(&mut self, action: QuizAction) {
        let applied = match action {
            QuizAction::Start => self.quiz.start(),
            QuizAction::Select(index) => self.quiz.select_option(index),
            QuizAction::Next => self.quiz.advance(),
            QuizAction::Restart => self.quiz.restart(),
        };
        if !applied {
            log::trace!("Ignored {:?} in {:?}", action, self.quiz.phase());
        }
    }

    //
    // Surface code
    //

    /// Hands the controller the circle surface, or `None` while there is no
    /// surface, so angle changes never wait on a successful resize.
    fn with_canvas<F>(&mut self, draw: F)
    where
        F: FnOnce(&mut CircleController<FrameQueue, Palette>, Option<&mut dyn Canvas>),
    {
        match self.surface.as_mut() {
            Some(surface) => {
                let mut canvas = SfmlCanvas::new(surface);
                draw(&mut self.controller, Some(&mut canvas));
                surface.display();
            }
            None => draw(&mut self.controller, None),
        }
    }

    fn resize_surface(&mut self, window_size: Vector2u) {
        self.size = window_size;
        self.layout = Layout::for_window(window_size);

        let side = self.layout.surface_side;
        let unchanged = self
            .surface
            .as_ref()
            .map_or(false, |surface| surface.size() == Vector2u::new(side, side));
        if !unchanged {
            self.surface = RenderTexture::with_settings(side, side, &self.ctx_settings);
            if self.surface.is_none() {
                log::error!("{}", Error::Surface(side));
            }
        }

        self.with_canvas(|controller, canvas| {
            if let Some(canvas) = canvas {
                controller.resize(canvas);
            }
        });
    }

    //
    // Update code
    //

    pub fn request_update(&mut self) {
        if !self.flags.contains(Flags::DRAW_GUI) {
            return;
        }

        let fps = self.get_fps();
        let display = self.controller.angle_display();

        self.debug_text = format!(
            include_str!("debug_screen_template.txt"),
            fps,
            if self.fps_limit > 0 {
                format!(
                    " (max: {} - {:6.2}%)",
                    self.fps_limit,
                    fps / self.fps_limit as f32 * 100.0
                )
            } else {
                "".to_owned()
            },
            display.degrees,
            display.radians,
            if self.controller.is_playing() {
                "[playing]"
            } else {
                "[paused]"
            },
            self.layout.surface_side,
            self.size.x,
            self.size.y,
            self.quiz.phase(),
            self.quiz.current_index(),
            self.quiz.question_count(),
            self.quiz.score(),
            self.window
                .as_ref()
                .map_or(0, |window| window.settings().antialiasing_level),
            self.ctx_settings.antialiasing_level,
            self.flags.bits()
        );
    }

    fn get_fps(&mut self) -> f32 {
        let current_time = self.fps_clock.restart().as_seconds();
        1.0 / current_time
    }

    //
    // Draw code
    //

    fn color(&self, name: ThemeColor) -> Color {
        self.controller.renderer().theme().color_or_fallback(name)
    }

    pub fn request_draw(&mut self) {
        let view = self.quiz.view();
        let mut hit_regions = Vec::new();

        let background = self.color(ThemeColor::Background);
        let foreground = self.color(ThemeColor::Foreground);
        let primary = self.color(ThemeColor::Primary);
        let secondary = self.color(ThemeColor::Secondary);
        let accent = self.color(ThemeColor::Accent);

        let window = match self.window.as_mut() {
            Some(window) => window,
            None => return,
        };
        window.clear(background);

        if let Some(surface) = self.surface.as_ref() {
            let mut sprite = Sprite::with_texture(surface.texture());
            sprite.set_position(self.layout.circle_origin);
            window.draw(&sprite);
        }

        let panel = self.layout.quiz_panel;
        let mut cursor = panel.top;

        // progress bar
        draw_rect(
            window,
            FloatRect::new(panel.left, cursor, panel.width, PROGRESS_HEIGHT),
            with_alpha(foreground, 40),
            None,
        );
        draw_rect(
            window,
            FloatRect::new(
                panel.left,
                cursor,
                panel.width * view.progress / 100.0,
                PROGRESS_HEIGHT,
            ),
            primary,
            None,
        );
        cursor += PROGRESS_HEIGHT + PADDING;

        let font = self.font.as_deref();
        let chars_per_line = |size: u32| (panel.width / (size as f32 * 0.55)).max(1.0) as usize;

        if let Some(font) = font {
            let side = self.layout.surface_side as f32;
            let readout = format!(
                "{}    {}\n←/→ ±5°    Пробел: {}",
                self.controller.angle_display().degrees,
                self.controller.angle_display().radians,
                if self.controller.is_playing() { "пауза" } else { "пуск" }
            );
            draw_text(
                window,
                font,
                &readout,
                BODY_SIZE,
                foreground,
                Vector2f::new(self.layout.circle_origin.x + PADDING, side + 8.0),
            );

            draw_text(window, font, &view.counter, SMALL_SIZE, foreground, (panel.left, cursor).into());
            let score = format!("Счёт: {}", view.score);
            let score_x = panel.left + panel.width - score.chars().count() as f32 * SMALL_SIZE as f32 * 0.6;
            draw_text(window, font, &score, SMALL_SIZE, foreground, (score_x, cursor).into());
        }
        cursor += SMALL_SIZE as f32 + PADDING;

        let title = wrap_text(&view.title, chars_per_line(TITLE_SIZE));
        if let Some(font) = font {
            draw_text(window, font, &title, TITLE_SIZE, foreground, (panel.left, cursor).into());
        }
        cursor += (title.lines().count() as f32) * TITLE_SIZE as f32 * 1.4 + PADDING;

        for (index, option) in view.options.iter().enumerate() {
            let rect = FloatRect::new(panel.left, cursor, panel.width, OPTION_HEIGHT);
            let (fill, outline) = match option.mark {
                OptionMark::Neutral => (with_alpha(primary, 30), primary),
                OptionMark::Correct => (with_alpha(accent, 160), accent),
                OptionMark::Wrong => (with_alpha(secondary, 160), secondary),
            };
            draw_rect(window, rect, fill, Some(outline));
            if let Some(font) = font {
                draw_text(
                    window,
                    font,
                    &format!("{}. {}", index + 1, option.text),
                    BODY_SIZE,
                    foreground,
                    (rect.left + 14.0, rect.top + (OPTION_HEIGHT - BODY_SIZE as f32) / 2.0 - 3.0)
                        .into(),
                );
            }
            if !option.disabled {
                hit_regions.push((rect, QuizAction::Select(index)));
            }
            cursor += OPTION_HEIGHT + OPTION_GAP;
        }

        if let Some(explanation) = &view.explanation {
            let text = wrap_text(explanation, chars_per_line(SMALL_SIZE));
            if let Some(font) = font {
                draw_text(window, font, &text, SMALL_SIZE, foreground, (panel.left, cursor).into());
            }
            cursor += (text.lines().count() as f32) * SMALL_SIZE as f32 * 1.4 + OPTION_GAP;
        }

        let button = [
            (view.start_visible, QuizAction::Start, "Начать тест"),
            (view.next_visible, QuizAction::Next, "Далее"),
            (view.restart_visible, QuizAction::Restart, "Пройти ещё раз"),
        ]
        .into_iter()
        .find(|(visible, _, _)| *visible);

        if let Some((_, action, label)) = button {
            let rect = FloatRect::new(panel.left, cursor + OPTION_GAP, BUTTON_WIDTH, OPTION_HEIGHT);
            draw_rect(window, rect, primary, None);
            if let Some(font) = font {
                draw_text(
                    window,
                    font,
                    label,
                    BODY_SIZE,
                    background,
                    (rect.left + 18.0, rect.top + (OPTION_HEIGHT - BODY_SIZE as f32) / 2.0 - 3.0)
                        .into(),
                );
            }
            hit_regions.push((rect, action));
        }

        if self.flags.contains(Flags::DRAW_GUI) {
            if let Some(font) = font {
                let mut debug_label = Text::new(&self.debug_text, font, 14);
                debug_label.set_fill_color(foreground);
                debug_label.set_outline_color(background);
                debug_label.set_outline_thickness(1.5);
                debug_label.set_position((10.0, 10.0));
                window.draw(&debug_label);
            }
        }

        self.hit_regions = hit_regions;
    }
}

fn enter_action(phase: Phase) -> Option<QuizAction> {
    match phase {
        Phase::NotStarted => Some(QuizAction::Start),
        Phase::Answered { .. } => Some(QuizAction::Next),
        Phase::Finished => Some(QuizAction::Restart),
        Phase::InProgress => None,
    }
}

fn with_alpha(color: Color, alpha: u8) -> Color {
    Color { a: alpha, ..color }
}

fn draw_rect(window: &mut RenderWindow, rect: FloatRect, fill: Color, outline: Option<Color>) {
    let mut shape = RectangleShape::new();
    shape.set_position((rect.left, rect.top));
    shape.set_size((rect.width.max(0.0), rect.height));
    shape.set_fill_color(fill);
    if let Some(outline) = outline {
        shape.set_outline_color(outline);
        shape.set_outline_thickness(2.0);
    }
    window.draw(&shape);
}

fn draw_text(
    window: &mut RenderWindow,
    font: &Font,
    string: &str,
    size: u32,
    color: Color,
    position: Vector2f,
) {
    let mut text = Text::new(string, font, size);
    text.set_fill_color(color);
    text.set_position(position);
    window.draw(&text);
}

/// Greedy word wrap on character count.
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = line.chars().count() + word.chars().count() + usize::from(!line.is_empty());
        if !line.is_empty() && needed > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_square_follows_panel_width() {
        let layout = Layout::for_window((1200, 900).into());
        assert_eq!(layout.surface_side, 600);
        assert_eq!(layout.circle_origin, Vector2f::new(0.0, 0.0));
        assert_eq!(layout.quiz_panel.left, 600.0 + PADDING);
    }

    #[test]
    fn layout_square_is_clamped_by_height() {
        let layout = Layout::for_window((1200, 500).into());
        assert_eq!(layout.surface_side, 430);
        assert_eq!(layout.circle_origin.x, 85.0);
    }

    #[test]
    fn layout_is_idempotent() {
        let size: Vector2u = (1000, 700).into();
        assert_eq!(Layout::for_window(size), Layout::for_window(size));
    }

    #[test]
    fn enter_follows_quiz_phase() {
        assert_eq!(enter_action(Phase::NotStarted), Some(QuizAction::Start));
        assert_eq!(enter_action(Phase::InProgress), None);
        assert_eq!(
            enter_action(Phase::Answered { selected: 2 }),
            Some(QuizAction::Next)
        );
        assert_eq!(enter_action(Phase::Finished), Some(QuizAction::Restart));
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("Сколько радиан в полном круге?", 16),
            "Сколько радиан в\nполном круге?"
        );
        assert_eq!(wrap_text("коротко", 40), "коротко");
        assert_eq!(wrap_text("", 10), "");
    }

    #[test]
    fn long_word_gets_own_line() {
        assert_eq!(wrap_text("a bbbbbbbb c", 4), "a\nbbbbbbbb\nc");
    }
}
