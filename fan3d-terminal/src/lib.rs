/// Terminal frontend for the interactive 3D fan
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use fan3d_core::{Camera, FanAssembly, FanConfig, FanController, FanSpeed};

pub mod error;
pub mod renderer;

pub use error::{AppError, Result};
pub use renderer::AsciiRenderer;

/// Discrete commands the input source can deliver, one per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Power,
    SpeedLow,
    SpeedHigh,
    Oscillation,
    Quit,
}

/// Pure key-to-command mapping, kept separate from the event loop so the
/// bindings are testable without a terminal
pub fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('p') => Some(Command::Power),
        KeyCode::Char('l') => Some(Command::SpeedLow),
        KeyCode::Char('h') => Some(Command::SpeedHigh),
        KeyCode::Char('o') => Some(Command::Oscillation),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Main application struct wiring input, controller, scene and rasterizer
pub struct TerminalApp {
    config: FanConfig,
    fan: FanAssembly,
    controller: FanController,
    camera: Camera,
    renderer: AsciiRenderer,
    show_grid: bool,
    target_fps: u32,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(target_fps: u32, show_grid: bool) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let config = FanConfig::default();
        let fan = FanAssembly::build(&config);

        Ok(Self {
            config,
            fan,
            controller: FanController::new(),
            camera: Camera::from_config(&config.camera, width as u32, height as u32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            show_grid,
            target_fps: target_fps.max(1),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.target_fps as u64);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // One state update per rendered frame, powered or not
            self.controller.tick(&mut self.fan);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Input handlers only write controller state; the scene graph is
    /// touched exclusively by the tick.
    fn handle_input(&mut self) -> Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match map_key(code) {
                Some(Command::Power) => self.controller.press_power(),
                Some(Command::SpeedLow) => self.controller.select_speed(FanSpeed::Low),
                Some(Command::SpeedHigh) => self.controller.select_speed(FanSpeed::High),
                Some(Command::Oscillation) => self.controller.toggle_oscillation(),
                Some(Command::Quit) => self.running = false,
                None => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        // Clear renderer
        self.renderer.clear();

        if self.show_grid {
            self.renderer.draw_grid(&self.camera, 100.0, 100);
        }
        self.renderer
            .render_scene(&self.fan.scene, &self.camera, &self.config.light);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        format!(
            "fan3d | FPS: {:.1} | power: {} | spin: {:.2} rad/tick | oscillation: {} | p=Power l=Low h=High o=Oscillate q=Quit",
            self.fps,
            if self.controller.is_powered() { "on" } else { "off" },
            self.controller.spin_increment(),
            if self.controller.is_oscillating() { "on" } else { "off" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(map_key(KeyCode::Char('p')), Some(Command::Power));
        assert_eq!(map_key(KeyCode::Char('l')), Some(Command::SpeedLow));
        assert_eq!(map_key(KeyCode::Char('h')), Some(Command::SpeedHigh));
        assert_eq!(map_key(KeyCode::Char('o')), Some(Command::Oscillation));
        assert_eq!(map_key(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(map_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }
}
