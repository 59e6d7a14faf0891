use std::fs;
use std::path::{Path, PathBuf};

use mapgraph_core::{DrawCommand, Point as GraphPoint, PointStyle};
use skia_safe::{
    Canvas, Color, Data, EncodedImageFormat, Font, FontMgr, FontStyle, Image, Paint, PaintStyle,
    PathBuilder, Point, images, surfaces,
};

#[derive(Debug, Clone, Copy)]
pub struct SkiaColor(pub u8, pub u8, pub u8, pub u8);

impl SkiaColor {
    fn to_color(self) -> Color {
        Color::from_argb(self.3, self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone)]
pub struct SkiaRenderOptions {
    /// Canvas size used when no backdrop is given.
    pub width: u32,
    pub height: u32,
    pub background: SkiaColor,
    pub node_color: SkiaColor,
    pub selected_color: SkiaColor,
    pub edge_color: SkiaColor,
    pub label_color: SkiaColor,
    pub node_radius: f32,
    pub stroke_width: f32,
    pub font_size: f32,
    pub font_path: Option<PathBuf>,
}

impl Default for SkiaRenderOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            background: SkiaColor(255, 255, 255, 255),
            node_color: SkiaColor(214, 39, 40, 255),
            selected_color: SkiaColor(31, 119, 180, 255),
            edge_color: SkiaColor(44, 160, 44, 255),
            label_color: SkiaColor(31, 119, 180, 255),
            node_radius: 4.0,
            stroke_width: 2.0,
            font_size: 11.0,
            font_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ImageFormat {
    Png,
    Jpeg { quality: u8 },
}

#[derive(Debug, thiserror::Error)]
pub enum SkiaRenderError {
    #[error("{0} encoding is not supported")]
    EncodeUnsupported(&'static str),
    #[error("encoding failed: {0}")]
    EncodeFailed(String),
    #[error("cannot decode image: {0}")]
    DecodeFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    FontLoadFailed(String),
}

/// The decoded map image frames are drawn over. Its pixel grid is the
/// coordinate space of every draw command.
#[derive(Debug, Clone)]
pub struct Backdrop {
    image: Image,
}

impl Backdrop {
    pub fn decode(bytes: &[u8]) -> Result<Self, SkiaRenderError> {
        let image = images::deferred_from_encoded_data(Data::new_copy(bytes), None)
            .ok_or_else(|| SkiaRenderError::DecodeFailed("unrecognized image data".to_string()))?;
        Ok(Self { image })
    }

    pub fn open(path: &Path) -> Result<Self, SkiaRenderError> {
        let bytes = fs::read(path)?;
        Self::decode(&bytes)
            .map_err(|_| SkiaRenderError::DecodeFailed(format!("{} is not a supported image", path.display())))
    }

    pub fn width(&self) -> u32 {
        self.image.width().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.image.height().max(0) as u32
    }
}

pub fn render_to_bytes(
    frame: &[DrawCommand],
    backdrop: Option<&Backdrop>,
    format: ImageFormat,
    options: &SkiaRenderOptions,
) -> Result<Vec<u8>, SkiaRenderError> {
    let (width, height) = match backdrop {
        Some(backdrop) => (backdrop.width(), backdrop.height()),
        None => (options.width, options.height),
    };
    let mut surface = surfaces::raster_n32_premul((width.max(1) as i32, height.max(1) as i32))
        .ok_or_else(|| SkiaRenderError::EncodeFailed("failed to create surface".to_string()))?;

    let canvas = surface.canvas();
    canvas.clear(options.background.to_color());
    if let Some(backdrop) = backdrop {
        canvas.draw_image(&backdrop.image, Point::new(0.0, 0.0), None);
    }

    draw_frame(canvas, frame, options)?;

    let image = surface.image_snapshot();
    let (encoded, label) = match format {
        ImageFormat::Png => (image.encode(None, EncodedImageFormat::PNG, 100), "PNG"),
        ImageFormat::Jpeg { quality } => {
            let q = quality.clamp(0, 100) as u32;
            (image.encode(None, EncodedImageFormat::JPEG, q), "JPEG")
        }
    };

    let data = encoded.ok_or(SkiaRenderError::EncodeUnsupported(label))?;
    Ok(data.as_bytes().to_vec())
}

pub fn render_to_file(
    frame: &[DrawCommand],
    backdrop: Option<&Backdrop>,
    format: ImageFormat,
    options: &SkiaRenderOptions,
    path: &Path,
) -> Result<(), SkiaRenderError> {
    let bytes = render_to_bytes(frame, backdrop, format, options)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn to_point(point: GraphPoint) -> Point {
    Point::new(point.x as f32, point.y as f32)
}

fn draw_frame(canvas: &Canvas, frame: &[DrawCommand], options: &SkiaRenderOptions) -> Result<(), SkiaRenderError> {
    let mut stroke = Paint::default();
    stroke.set_style(PaintStyle::Stroke);
    stroke.set_anti_alias(true);
    stroke.set_color(options.edge_color.to_color());
    stroke.set_stroke_width(options.stroke_width);

    let mut marker = Paint::default();
    marker.set_style(PaintStyle::Fill);
    marker.set_anti_alias(true);

    let mut text_paint = Paint::default();
    text_paint.set_color(options.label_color.to_color());
    text_paint.set_anti_alias(true);

    // Fonts are only resolved when the frame carries labels.
    let mut font = None;

    for command in frame {
        match command {
            DrawCommand::Line { from, to } => {
                canvas.draw_line(to_point(*from), to_point(*to), &stroke);
            }
            DrawCommand::Arrow { from, to } => {
                let (from, to) = (to_point(*from), to_point(*to));
                canvas.draw_line(from, to, &stroke);
                draw_arrowhead(canvas, from, to, options);
            }
            DrawCommand::Point { at, style } => {
                let color = match style {
                    PointStyle::Node => options.node_color,
                    PointStyle::Selected => options.selected_color,
                };
                marker.set_color(color.to_color());
                canvas.draw_circle(to_point(*at), options.node_radius, &marker);
            }
            DrawCommand::Label { at, text } => {
                if font.is_none() {
                    font = Some(load_font(options)?);
                }
                if let Some(font) = font.as_ref() {
                    let origin = to_point(*at);
                    canvas.draw_str(
                        text,
                        (origin.x + options.node_radius, origin.y - options.node_radius),
                        font,
                        &text_paint,
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_font(options: &SkiaRenderOptions) -> Result<Font, SkiaRenderError> {
    if let Some(path) = options.font_path.as_ref() {
        let data = fs::read(path).map_err(|err| {
            SkiaRenderError::FontLoadFailed(format!("failed to read font {path:?}: {err}"))
        })?;
        let typeface = FontMgr::new()
            .new_from_data(&data, 0)
            .ok_or_else(|| SkiaRenderError::FontLoadFailed(format!("failed to load font {path:?}")))?;
        return Ok(Font::from_typeface(typeface, options.font_size));
    }

    let mut font = Font::default();
    font.set_size(options.font_size);
    let font_mgr = FontMgr::new();
    let style = FontStyle::default();
    let candidates = ["Helvetica", "Arial", "DejaVu Sans", "Liberation Sans"];
    if let Some(typeface) = candidates
        .into_iter()
        .find_map(|family| font_mgr.match_family_style(family, style))
    {
        font.set_typeface(typeface);
    }
    Ok(font)
}

fn draw_arrowhead(canvas: &Canvas, from: Point, to: Point, options: &SkiaRenderOptions) {
    let dir = Point::new(to.x - from.x, to.y - from.y);
    let len = (dir.x * dir.x + dir.y * dir.y).sqrt().max(1.0);
    let ux = dir.x / len;
    let uy = dir.y / len;
    let arrow_len = options.stroke_width * 6.0;
    let arrow_w = options.stroke_width * 3.0;

    let tip = to;
    let base = Point::new(to.x - ux * arrow_len, to.y - uy * arrow_len);
    let left = Point::new(base.x + -uy * arrow_w, base.y + ux * arrow_w);
    let right = Point::new(base.x + uy * arrow_w, base.y + -ux * arrow_w);

    let mut paint = Paint::default();
    paint.set_style(PaintStyle::Fill);
    paint.set_anti_alias(true);
    paint.set_color(options.edge_color.to_color());

    let mut builder = PathBuilder::new();
    builder.move_to(tip);
    builder.line_to(left);
    builder.line_to(right);
    builder.close();
    let path = builder.detach();
    canvas.draw_path(&path, &paint);
}
