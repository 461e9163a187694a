use argh::FromArgs;
use castbmp::{DecodeOptions, Palette, RenderStyle};
use image::ImageFormat;
use std::{net::IpAddr, str::FromStr};
use tracing_subscriber::EnvFilter;

mod raster;
mod serve;

/// Cast bitmap photo renderer.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Render(Render),
    Serve(Serve),
}

/// Renders a cast bitmap file to an image file.
#[derive(FromArgs)]
#[argh(subcommand, name = "render")]
struct Render {
    /// render style (greyscale, sepia)
    #[argh(option, default = "RenderStyle::Greyscale")]
    style: RenderStyle,

    /// palette file. Defaults to the built-in system grayscale palette.
    #[argh(option)]
    palette: Option<String>,

    /// output format (png, jpg, bmp)
    #[argh(option, default = "Format::Png")]
    format: Format,

    /// fail on rows narrower than the visible width
    #[argh(switch)]
    strict_rows: bool,

    /// fail when the payload length differs from the header's
    #[argh(switch)]
    strict_length: bool,

    /// fail unless the chunk tag reads BITD
    #[argh(switch)]
    require_tag: bool,

    /// largest accepted bitmap, in pixels
    #[argh(option, default = "castbmp::consts::MAX_PIXELS")]
    max_pixels: usize,

    /// the input cast bitmap
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

/// Serves rendered photos over HTTP.
#[derive(FromArgs)]
#[argh(subcommand, name = "serve")]
struct Serve {
    /// address to listen on
    #[argh(option, default = "IpAddr::from([0, 0, 0, 0])")]
    bind: IpAddr,

    /// port to listen on
    #[argh(option, default = "9000")]
    port: u16,

    /// palette file. Defaults to the built-in system grayscale palette.
    #[argh(option)]
    palette: Option<String>,

    /// fail on rows narrower than the visible width
    #[argh(switch)]
    strict_rows: bool,

    /// fail when the payload length differs from the header's
    #[argh(switch)]
    strict_length: bool,

    /// fail unless the chunk tag reads BITD
    #[argh(switch)]
    require_tag: bool,

    /// largest accepted bitmap, in pixels
    #[argh(option, default = "castbmp::consts::MAX_PIXELS")]
    max_pixels: usize,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Png,
    Jpg,
    Bmp,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(format) = s.eq_ignore_ascii_case("png").then_some(Format::Png)
               .or_else(|| s.eq_ignore_ascii_case("jpg").then_some(Format::Jpg))
               .or_else(|| s.eq_ignore_ascii_case("bmp").then_some(Format::Bmp))
        else { return Err("invalid string"); };

        Ok(format)
    }
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => ImageFormat::Png,
            Format::Jpg => ImageFormat::Jpeg,
            Format::Bmp => ImageFormat::Bmp,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Render(options) => render(options),
        Command::Serve(options) => serve(options),
    }
}

fn load_palette(path: Option<&str>) -> Result<Palette, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Palette::greyscale());
    };

    let palette = Palette::from_bytes(&std::fs::read(path)?)?;
    tracing::info!(path, entries = palette.len(), "loaded palette");

    Ok(palette)
}

fn render(options: Render) -> Result<(), Box<dyn std::error::Error>> {
    let Render {
        style,
        palette,
        format,
        strict_rows,
        strict_length,
        require_tag,
        max_pixels,
        input,
        output,
    } = options;

    let palette = load_palette(palette.as_deref())?;
    let decode_options = DecodeOptions {
        strict_rows,
        enforce_payload_length: strict_length,
        require_tag,
        max_pixels,
    };

    let data = std::fs::read(&input)?;
    tracing::info!(%input, ?style, "rendering");

    let image = castbmp::render(&data, &palette, style, &decode_options)?;
    raster::to_rgb_image(&image)?.save_with_format(&output, format.into())?;

    tracing::info!(
        %output,
        width = image.width(),
        height = image.height(),
        "written image"
    );

    Ok(())
}

fn serve(options: Serve) -> Result<(), Box<dyn std::error::Error>> {
    let Serve {
        bind,
        port,
        palette,
        strict_rows,
        strict_length,
        require_tag,
        max_pixels,
    } = options;

    let state = serve::AppState::new(
        load_palette(palette.as_deref())?,
        DecodeOptions {
            strict_rows,
            enforce_payload_length: strict_length,
            require_tag,
            max_pixels,
        },
    );

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve::run((bind, port).into(), state))?;

    Ok(())
}
