mod clock;
mod logging;
mod raster;
mod scene;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dial_config::Config;
use dial_core::{AnimationKind, ClockTime, DisplayList, FaceStyle, SecondHandSpring, Surface};
use dial_effects::AnimationManager;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
};
use tracing::{info, warn};

use crate::clock::{ClockSource, FixedClock, SystemClock, parse_clock_time};
use crate::raster::BrailleRaster;
use crate::scene::Scene;

/// An analog terminal clock with animated backdrops.
#[derive(Parser, Debug)]
#[command(name = "dial", version, about)]
struct Cli {
    /// Animation to start with: none, breathing, aurora, cosmic_stars, water_ripples
    #[arg(short, long)]
    animation: Option<AnimationKind>,

    /// Timezone: "system", "UTC" or an offset such as "+09:00"
    #[arg(short, long)]
    timezone: Option<String>,

    /// Frames per second (1-120)
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for the cosmic stars layout
    #[arg(long)]
    seed: Option<u64>,

    /// Freeze the clock at HH:MM[:SS]
    #[arg(long, value_parser = parse_clock_time)]
    at: Option<ClockTime>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layer the command-line overrides on top of `config`.
    fn apply(&self, config: &mut Config) {
        if let Some(kind) = self.animation {
            config.animation = kind;
        }
        if let Some(zone) = &self.timezone {
            config.timezone = zone.clone();
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        if let Some(seed) = self.seed {
            config.star_seed = seed;
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::init();

    let config_path = cli.config.clone().or_else(|| Config::path().ok());
    let stored = config_path
        .as_deref()
        .map(Config::load_or_default)
        .unwrap_or_default();
    let mut config = stored.clone();
    cli.apply(&mut config);
    info!(
        log = ?log_path,
        config = ?config_path,
        animation = %config.animation,
        fps = config.frame_rate(),
        "starting"
    );

    let clock: Box<dyn ClockSource> = match cli.at {
        Some(time) => Box::new(FixedClock(time)),
        None => {
            let clock = SystemClock::from_name(&config.timezone);
            info!(zone = %clock.zone(), "resolved timezone");
            Box::new(clock)
        }
    };
    let scene = Scene::new(
        clock,
        AnimationManager::with_default_effects(config.star_seed),
        SecondHandSpring::new(config.spring_stiffness()),
        FaceStyle {
            show_numerals: config.show_numerals,
            ..FaceStyle::default()
        },
        config.animation,
    );

    let terminal = ratatui::init();
    let result = App::new(scene, config.frame_interval(), stored, config_path).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    scene: Scene,
    raster: BrailleRaster,
    /// Time budget of one frame.
    frame_interval: Duration,
    /// Settings as loaded from disk, without command-line overrides.
    stored: Config,
    config_path: Option<PathBuf>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        scene: Scene,
        frame_interval: Duration,
        stored: Config,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            running: false,
            scene,
            raster: BrailleRaster::default(),
            frame_interval,
            stored,
            config_path,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let frame_start = Instant::now();
            self.scene.tick(frame_start);
            terminal.draw(|frame| self.render(frame))?;
            let budget = self.frame_interval.saturating_sub(frame_start.elapsed());
            self.handle_crossterm_events(budget)?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let [clock_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        if self.raster.cols() != clock_area.width || self.raster.rows() != clock_area.height {
            self.raster.resize(clock_area.width, clock_area.height);
        } else {
            self.raster.clear();
        }

        let mut list = DisplayList::new(self.raster.size(), self.raster.density());
        self.scene.paint(&mut list);
        list.replay(&mut self.raster);

        frame.render_widget(&self.raster, clock_area);
        frame.render_widget(self.help_line(), help_area);
    }

    /// Key hints plus the animation selector, the selected entry highlighted.
    fn help_line(&self) -> Line<'static> {
        let selected = self.scene.selected();
        let mut spans = vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "a/A".bold(),
            " cycle  ".dark_gray(),
            "t".bold(),
            " numerals  ".dark_gray(),
            "n".bold(),
            " none ".dark_gray(),
        ];
        for kind in self.scene.manager().kinds() {
            let label = format!(" {} {} ", kind.index(), kind.label());
            let style = if kind == selected {
                Style::new().bold().reversed()
            } else {
                Style::new().dark_gray()
            };
            spans.push(Span::styled(label, style));
        }
        Line::from(spans).centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame starts on time.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('a') | KeyCode::Right) => self.select(self.scene.selected().next()),
            (_, KeyCode::Char('A') | KeyCode::Left) => self.select(self.scene.selected().prev()),
            (_, KeyCode::Char('n')) => self.select(AnimationKind::None),
            (_, KeyCode::Char('t')) => self.toggle_numerals(),
            (_, KeyCode::Char(c @ '0'..='9')) => {
                let kind = c
                    .to_digit(10)
                    .and_then(|d| AnimationKind::from_index(d as usize));
                if let Some(kind) = kind {
                    self.select(kind);
                }
            }
            _ => {}
        }
    }

    /// Switch the backdrop animation and remember it.
    fn select(&mut self, kind: AnimationKind) {
        self.scene.select(kind);
        self.stored.animation = kind;
        self.persist();
    }

    /// Show or hide the hour numerals and remember it.
    fn toggle_numerals(&mut self) {
        let style = self.scene.style_mut();
        style.show_numerals = !style.show_numerals;
        self.stored.show_numerals = style.show_numerals;
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(err) = self.stored.save_to(path) {
            warn!(error = %err, "failed to save config");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
