use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use mapgraph_ascii_render::{AsciiRenderOptions, render_ascii};
use mapgraph_core::{Action, Click, Controller, DrawCommand, Renderer, parse_label_visibility};
use mapgraph_skia_render::{Backdrop, ImageFormat, SkiaRenderOptions, render_to_file};
use tracing::{error, info, warn};

/// Keeps the most recent frame so it can be rasterized on request.
#[derive(Debug, Default)]
pub struct LatestFrame {
    frame: Vec<DrawCommand>,
}

impl LatestFrame {
    pub fn frame(&self) -> &[DrawCommand] {
        &self.frame
    }
}

impl Renderer for LatestFrame {
    fn present(&mut self, frame: &[DrawCommand]) {
        self.frame.clear();
        self.frame.extend_from_slice(frame);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width && y < self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click { x: f64, y: f64 },
    Action(Action),
    Snapshot(PathBuf),
    Ascii,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = match line.split_once('#') {
        Some((code, _)) => code,
        None => line,
    };
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (keyword.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("click", [x, y]) => Command::Click {
            x: parse_coordinate(x)?,
            y: parse_coordinate(y)?,
        },
        ("mode", [mode]) => Command::Action(Action::SetMode(mode.parse()?)),
        ("direction", [directionality]) => Command::Action(Action::SetDirectionality(directionality.parse()?)),
        ("labels", [visibility]) => Command::Action(Action::SetShowLabels(parse_label_visibility(visibility)?)),
        ("clear", []) => Command::Action(Action::Clear),
        ("delete", []) => Command::Action(Action::DeleteLast),
        ("load", []) => Command::Action(Action::Load),
        ("export", []) => Command::Action(Action::Export),
        ("snapshot", [path]) => Command::Snapshot(PathBuf::from(path)),
        ("ascii", []) => Command::Ascii,
        ("quit", []) => Command::Quit,
        (
            "click" | "mode" | "direction" | "labels" | "clear" | "delete" | "load" | "export" | "snapshot"
            | "ascii" | "quit",
            _,
        ) => bail!("wrong number of arguments for '{keyword}'"),
        _ => bail!("unknown command '{keyword}'"),
    };
    Ok(Some(command))
}

fn parse_coordinate(text: &str) -> Result<f64> {
    let value: f64 = text
        .parse()
        .with_context(|| format!("invalid coordinate '{text}'"))?;
    if !value.is_finite() {
        return Err(anyhow!("coordinate '{text}' is not finite"));
    }
    Ok(value)
}

pub struct Session {
    controller: Controller<LatestFrame>,
    bounds: CanvasBounds,
    backdrop: Option<Backdrop>,
    ascii: AsciiRenderOptions,
    skia: SkiaRenderOptions,
}

impl Session {
    pub fn new(controller: Controller<LatestFrame>, bounds: CanvasBounds, backdrop: Option<Backdrop>) -> Self {
        Self {
            controller,
            bounds,
            backdrop,
            ascii: AsciiRenderOptions::default(),
            skia: SkiaRenderOptions::default(),
        }
    }

    pub fn controller(&self) -> &Controller<LatestFrame> {
        &self.controller
    }

    /// Processes events until `quit` or end of input. Bad lines and failed
    /// actions are reported and skipped.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, output: &mut O) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line.context("failed to read input")?;
            let number = index + 1;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    warn!(line = number, "{err:#}");
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            if let Err(err) = self.execute(command, output) {
                error!(line = number, "{err:#}");
            }
        }
        Ok(())
    }

    pub fn execute<O: Write>(&mut self, command: Command, output: &mut O) -> Result<()> {
        match command {
            Command::Click { x, y } => {
                let inside = self.bounds.contains(x, y);
                self.controller.click(Click::new(x, y, inside));
            }
            Command::Action(action) => {
                self.controller.apply(action)?;
            }
            Command::Snapshot(path) => {
                let frame = self.controller.renderer().frame();
                render_to_file(frame, self.backdrop.as_ref(), format_for(&path), &self.skia, &path)
                    .with_context(|| format!("failed to write snapshot {}", path.display()))?;
                info!(path = %path.display(), "snapshot written");
            }
            Command::Ascii => {
                let frame = self.controller.renderer().frame();
                let text = render_ascii(frame, self.bounds.width, self.bounds.height, &self.ascii);
                writeln!(output, "{text}")?;
            }
            Command::Quit => {}
        }
        Ok(())
    }
}

fn format_for(path: &Path) -> ImageFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => ImageFormat::Jpeg { quality: 85 },
        _ => ImageFormat::Png,
    }
}
