//! Dump the extracted layout of a scene as JSON.
//!
//! ```text
//! spanlayout scene.toml --granularity both
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use layout::{ExtractOptions, Granularity, Layout, LogSink, SubRectPolicy, extract_layout};
use serde::Serialize;
use sim_host::{Scene, SimHost};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Character,
    Run,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SubRect {
    FirstNonEmpty,
    BoundingRect,
}

#[derive(Debug, Parser)]
#[command(name = "spanlayout")]
#[command(about = "Extract positioned text runs from a rendered scene")]
struct Cli {
    /// Scene description (TOML)
    scene: PathBuf,

    #[arg(long, value_enum, default_value_t = Mode::Both)]
    granularity: Mode,

    /// How a character's range rects are reduced to one box
    #[arg(long, value_enum, default_value_t = SubRect::FirstNonEmpty)]
    sub_rect: SubRect,

    /// Override the scene's container width
    #[arg(long)]
    width: Option<f32>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Serialize)]
struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    character: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<Layout>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut scene = Scene::load(&cli.scene)
        .with_context(|| format!("loading scene {}", cli.scene.display()))?;
    if let Some(width) = cli.width {
        scene.width = width;
    }
    let host = SimHost::new(&scene).context("laying out scene")?;

    let sub_rect = match cli.sub_rect {
        SubRect::FirstNonEmpty => SubRectPolicy::FirstNonEmpty,
        SubRect::BoundingRect => SubRectPolicy::BoundingRect,
    };
    let extract = |granularity: Granularity| {
        let options = ExtractOptions::from(granularity).with_sub_rect(sub_rect);
        extract_layout(&host, host.container(), options, LogSink)
    };

    let output = Output {
        character: matches!(cli.granularity, Mode::Character | Mode::Both)
            .then(|| extract(Granularity::Character)),
        run: matches!(cli.granularity, Mode::Run | Mode::Both).then(|| extract(Granularity::Run)),
    };
    log::info!(
        "extracted {} character runs, {} line runs",
        output.character.as_ref().map_or(0, |l| l.lines().len()),
        output.run.as_ref().map_or(0, |l| l.lines().len())
    );

    let json = if cli.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    }
    .context("serializing layout")?;
    println!("{json}");
    Ok(())
}
