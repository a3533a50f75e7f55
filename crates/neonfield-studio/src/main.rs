use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use neonfield_engine::device::GpuInit;
use neonfield_engine::logging::{init_logging, LoggingConfig};
use neonfield_engine::paint::Color;
use neonfield_engine::window::{Runtime, RuntimeConfig};
use neonfield_scene::{BackdropApp, SceneConfig};

#[derive(Parser, Debug)]
#[command(name = "neonfield", about = "Animated cyberpunk backdrop", version)]
struct Args {
    /// Seed for a reproducible scene (random when omitted)
    #[arg(long, env = "NEONFIELD_SEED")]
    seed: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    #[arg(long, default_value = "neonfield")]
    title: String,

    /// Composite the window with alpha so the desktop shows behind the scene
    #[arg(long)]
    transparent: bool,

    /// Background color as RRGGBB hex; ignored with --transparent
    #[arg(long, default_value = "05050f", value_parser = parse_hex_rgb)]
    background: u32,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn parse_hex_rgb(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("expected 6 hex digits, got {s:?}"));
    }
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex color {s:?}: {e}"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let scene = SceneConfig::default();
    scene.validate().context("invalid scene configuration")?;

    let runtime = RuntimeConfig {
        title: args.title,
        initial_size: LogicalSize::new(args.width, args.height),
        transparent: args.transparent,
    };

    // Palette values are written to the surface verbatim, so skip the
    // implicit linear-to-sRGB encode.
    let (gpu_init, clear) = if args.transparent {
        (GpuInit { prefer_srgb: false, ..GpuInit::transparent() }, Color::transparent())
    } else {
        (GpuInit { prefer_srgb: false, ..GpuInit::default() }, Color::from_hex(args.background))
    };

    let app = BackdropApp::new(scene, args.seed).with_clear_color(clear);
    Runtime::run(runtime, gpu_init, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_or_without_hash() {
        assert_eq!(parse_hex_rgb("00f3ff"), Ok(0x00f3ff));
        assert_eq!(parse_hex_rgb("#FF00FF"), Ok(0xff00ff));
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(parse_hex_rgb("fff").is_err());
        assert!(parse_hex_rgb("zzzzzz").is_err());
        assert!(parse_hex_rgb("+12345").is_err());
        assert!(parse_hex_rgb("#-12345").is_err());
    }

    #[test]
    fn cli_defaults() {
        let args = Args::try_parse_from(["neonfield"]).unwrap();
        assert_eq!(args.width, 1280.0);
        assert_eq!(args.background, 0x05050f);
        assert!(!args.transparent);
    }

    #[test]
    fn cli_accepts_seed() {
        let args = Args::try_parse_from(["neonfield", "--seed", "42", "--transparent"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert!(args.transparent);
    }
}
