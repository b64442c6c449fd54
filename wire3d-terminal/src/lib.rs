/// Terminal host for the wire3d wireframe viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{
    Color, FramePipeline, FrameSettings, FrameState, Palette, ProjectionMode, Scene,
};

pub mod config;
pub mod input;
pub mod renderer;

pub use config::{Command, Config, ConfigError};
pub use input::Action;
pub use renderer::Canvas;

/// Terminal cells are about twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 0.5;

/// Colours readable on a dark terminal background
pub fn terminal_palette() -> Palette {
    Palette {
        grid_line: Color(0x6C6C6CFF),
        grid_axis: Color(0xFFD75FFF),
        sphere: Color::WHITE,
        sphere_hit: Color::RED,
        plane: Color(0x5FD7FFFF),
    }
}

/// Frame settings for a canvas of `width` x `height` cells.
pub fn frame_settings(width: u16, height: u16, fov_y: f32, mode: ProjectionMode) -> FrameSettings {
    FrameSettings {
        fov_y,
        mode,
        pixel_aspect: CELL_ASPECT,
        ..FrameSettings::new(width.max(1) as u32, height.max(1) as u32)
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    initial: Scene,
    scene: Scene,
    pipeline: FramePipeline,
    palette: Palette,
    canvas: Canvas,
    step: f32,
    running: bool,
    last_state: Option<FrameState>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: Config) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(config, width, height))
    }

    pub fn with_size(config: Config, width: u16, height: u16) -> Self {
        let settings = frame_settings(width, height, config.fov_y, config.mode);
        Self {
            initial: config.scene,
            scene: config.scene,
            pipeline: FramePipeline::new(settings),
            palette: terminal_palette(),
            canvas: Canvas::new(width as usize, height as usize),
            step: config.step,
            running: true,
            last_state: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        log::info!("terminal session started");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        log::info!("terminal session ended");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain input collected since the last frame
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            self.update();
            self.present()?;

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

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if let Some(action) = input::action_for(code, self.step) {
                    self.apply(action);
                }
            }
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Edit(edit) => self.scene.apply(edit),
            Action::ScaleStep(factor) => {
                self.step = (self.step * factor).clamp(1e-4, 10.0);
                log::debug!("edit step now {}", self.step);
            }
            Action::ToggleProjection => {
                let mut settings = *self.pipeline.settings();
                settings.mode = match settings.mode {
                    ProjectionMode::Perspective => ProjectionMode::Orthographic,
                    ProjectionMode::Orthographic => ProjectionMode::Perspective,
                };
                log::debug!("projection switched to {:?}", settings.mode);
                self.pipeline = FramePipeline::new(settings);
            }
            Action::Reset => self.scene = self.initial,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let settings = *self.pipeline.settings();
        self.pipeline = FramePipeline::new(frame_settings(
            width,
            height,
            settings.fov_y,
            settings.mode,
        ));
        self.canvas = Canvas::new(width as usize, height as usize);
        log::debug!("resized to {width}x{height}");
    }

    /// Build one frame into the canvas.
    pub fn update(&mut self) {
        self.canvas.clear();
        match self
            .pipeline
            .frame(&mut self.scene, &self.palette, &mut self.canvas)
        {
            Ok((state, stats)) => {
                log::trace!("frame: {stats:?}");
                self.last_state = Some(state);
            }
            Err(err) => {
                log::warn!("frame skipped: {err}");
                self.last_state = None;
            }
        }
    }

    fn status_line(&self) -> String {
        let camera = &self.scene.camera;
        let hit = match self.last_state {
            Some(state) if state.colliding => "HIT",
            Some(_) => "-",
            None => "n/a",
        };
        format!(
            "wire3d | FPS {:.1} | step {:.3} | cam ({:.2}, {:.2}, {:.2}) | collision {} | {}",
            self.fps,
            self.step,
            camera.translate.x,
            camera.translate.y,
            camera.translate.z,
            hit,
            input::HELP,
        )
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let mut status = self.status_line();
        status.truncate(self.canvas.width());
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
