use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use colorpick::{ColorPicker, ColorValue, Component, PickerOptions, Projection, Space};
use euclid::default::{Point2D, Size2D};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const PALETTE_SIZE: u32 = 256;
const SLIDER_WIDTH: u32 = 24;
const GAP: u32 = 12;
const PREVIEW_HEIGHT: u32 = 48;

/// Render the state of a color picker to an image.
#[derive(Parser, Debug)]
struct Args {
    /// The starting color, as hex, rgb(r, g, b) or hsb(h, s, b).
    color: Option<String>,

    /// A TOML file with picker options.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Type a value into a field, e.g. `--set Saturation=50`. May be repeated.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_edit)]
    edits: Vec<(String, String)>,

    /// Click the palette at a point given as fractions, e.g. `0.5,0.25`.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pick: Option<Point2D<Component>>,

    /// Click the hue slider at a fraction of its height.
    #[arg(long, value_name = "Y")]
    hue: Option<Component>,

    /// Where to write the image.
    #[arg(long, short, default_value = "palette.png")]
    output: PathBuf,
}

fn parse_edit(arg: &str) -> anyhow::Result<(String, String)> {
    let Some((field, value)) = arg.split_once('=') else {
        bail!("expected FIELD=VALUE, got {arg:?}");
    };
    Ok((field.trim().to_owned(), value.to_owned()))
}

fn parse_point(arg: &str) -> anyhow::Result<Point2D<Component>> {
    let Some((x, y)) = arg.split_once(',') else {
        bail!("expected X,Y, got {arg:?}");
    };
    Ok(Point2D::new(x.trim().parse()?, y.trim().parse()?))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut options = match &args.options {
        Some(path) => {
            let document = std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            PickerOptions::from_toml(&document)?
        }
        None => PickerOptions::default(),
    };
    if let Some(color) = &args.color {
        let value = ColorValue::parse(color, None)?;
        options = options.with_default(value.hex(), Space::Hex);
    }

    let picker = ColorPicker::new(&options)?;
    let model = picker.model();
    model.subscribe(|event| {
        info!(hex = event.value.hex(), changes = ?event.changes, "color changed");
    });

    for (field, value) in &args.edits {
        model.set_from_field(field, value, &model.projection())?;
    }
    if let Some(point) = args.pick {
        picker.pick_palette(point)?;
    }
    if let Some(y) = args.hue {
        picker.pick_hue(y)?;
    }

    let projection = model.projection();
    for spec in model.fields().iter() {
        println!(
            "{:>10}: {}",
            spec.name,
            projection.field(spec.name).unwrap_or_default()
        );
    }

    let image = render(&projection, &model.value(), model.hue_scale());
    image
        .save(&args.output)
        .with_context(|| format!("could not write image to {}", args.output.display()))?;
    info!(path = %args.output.display(), "image written");

    Ok(())
}

fn render(projection: &Projection, value: &ColorValue, hue_scale: u16) -> RgbImage {
    let width = PALETTE_SIZE + GAP + SLIDER_WIDTH;
    let height = PALETTE_SIZE + GAP + PREVIEW_HEIGHT;
    let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    let last = i64::from(PALETTE_SIZE - 1);
    let hue = i64::from(value.hsb().hue);
    let scale = i64::from(hue_scale);

    for y in 0..PALETTE_SIZE {
        for x in 0..PALETTE_SIZE {
            let saturation = i64::from(x) * 100 / last;
            let brightness = 100 - i64::from(y) * 100 / last;
            let rgb = ColorValue::from_hsb(hue, saturation, brightness).rgb();
            img.put_pixel(x, y, Rgb(rgb.to_array().map(|c| c as u8)));
        }

        let slider_hue = scale - i64::from(y) * scale / last;
        let rgb = ColorValue::from_hsb(slider_hue, 100, 100).rgb();
        for x in 0..SLIDER_WIDTH {
            img.put_pixel(PALETTE_SIZE + GAP + x, y, Rgb(rgb.to_array().map(|c| c as u8)));
        }
    }

    let size = PALETTE_SIZE as Component;
    let cursor = projection.palette_cursor_px(Size2D::new(size, size));
    let marker = Rgb(if value.hsb().brightness > 50 { [0, 0, 0] } else { [255, 255, 255] });
    draw_hollow_circle_mut(
        &mut img,
        (cursor.x.round() as i32, cursor.y.round() as i32),
        5,
        marker,
    );

    let slider_y = size - projection.hue_slider_px(size);
    let slider_x = (PALETTE_SIZE + GAP) as f32;
    draw_line_segment_mut(
        &mut img,
        (slider_x, slider_y as f32),
        (slider_x + SLIDER_WIDTH as f32, slider_y as f32),
        Rgb([0, 0, 0]),
    );

    let preview = value.rgb();
    draw_filled_rect_mut(
        &mut img,
        Rect::at(0, (PALETTE_SIZE + GAP) as i32).of_size(width, PREVIEW_HEIGHT),
        Rgb([preview.red, preview.green, preview.blue]),
    );

    img
}
