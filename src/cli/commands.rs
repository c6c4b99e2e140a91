//! Command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::{AppContainer, EditorSession};
use crate::cli::args::{CutArgs, ProbeArgs, ThumbsArgs};
use crate::config::AppConfig;
use crate::domain::model::{Clip, MediaAsset, TimeSpec};
use crate::error::StitchError;
use crate::ports::ObjectUrlPort;
use crate::utils::time::parse_range;

/// Execute the cut command
pub async fn cut(args: CutArgs, config: &AppConfig) -> Result<()> {
    let mut ranges: Vec<(TimeSpec, TimeSpec)> = Vec::new();
    for raw in &args.clip {
        let range = parse_range(raw).with_context(|| format!("invalid --clip '{raw}'"))?;
        ranges.push(range);
    }
    if let Some(path) = &args.clips_file {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read clip list {}", path.display()))?;
        let clips: Vec<Clip> = serde_json::from_str(&text)
            .with_context(|| format!("cannot parse clip list {}", path.display()))?;
        for clip in clips {
            ranges.push((clip.start, clip.end));
        }
    }
    if ranges.is_empty() {
        bail!("no clips given; pass --clip START-END or --clips-file FILE");
    }

    let container = AppContainer::new(config)?;
    let mut editor = container.editor(config);

    let duration = load_input(&mut editor, &args.input).await?;
    info!(duration = duration.seconds, clips = ranges.len(), "asset ready");

    editor
        .initialize()
        .await
        .context("transcoding engine initialization failed")?;

    for (start, end) in ranges {
        editor
            .add_range(start, end)
            .with_context(|| format!("rejected clip {start} ~ {end}"))?;
    }
    for (index, clip) in editor.clips().iter().enumerate() {
        println!("{}. {}", index + 1, clip);
    }

    let artifact = editor.cut().await.context("cut failed")?;
    let bytes = container
        .urls()
        .resolve(&artifact.url)
        .await
        .context("output resource is no longer held")?;
    tokio::fs::write(&args.output, &bytes)
        .await
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!("wrote {} ({} bytes)", args.output.display(), bytes.len());
    editor.teardown().await;
    Ok(())
}

#[derive(Serialize)]
struct ThumbMeta {
    index: usize,
    offset_seconds: f64,
    width: u32,
    height: u32,
    byte_len: usize,
}

/// Execute the thumbs command
pub async fn thumbs(args: ThumbsArgs, config: &AppConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(count) = args.count {
        config.thumbnail_count = count;
    }

    let container = AppContainer::new(&config)?;
    let mut editor = container.editor(&config);

    load_input(&mut editor, &args.input).await?;
    let count = editor
        .refresh_thumbnails()
        .await
        .context("thumbnail sampling failed")?;
    info!(count, "thumbnail pass complete");

    let metas: Vec<ThumbMeta> = editor
        .thumbnails()
        .frames()
        .iter()
        .enumerate()
        .map(|(index, frame)| ThumbMeta {
            index,
            offset_seconds: frame.offset.seconds,
            width: frame.width,
            height: frame.height,
            byte_len: frame.data.len(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metas)?);
    } else {
        for meta in &metas {
            println!(
                "thumb {:02} @ {} ({}x{}, {} bytes)",
                meta.index,
                crate::utils::time::format_position(meta.offset_seconds),
                meta.width,
                meta.height,
                meta.byte_len
            );
        }
    }

    if let Some(dir) = &args.out_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("cannot create {}", dir.display()))?;
        for (index, frame) in editor.thumbnails().frames().iter().enumerate() {
            let path = dir.join(format!("thumb_{index:02}.jpg"));
            tokio::fs::write(&path, &frame.data)
                .await
                .with_context(|| format!("cannot write {}", path.display()))?;
        }
        println!("wrote {} frames to {}", count, dir.display());
    }

    editor.teardown().await;
    Ok(())
}

/// Execute the probe command
pub async fn probe(args: ProbeArgs, config: &AppConfig) -> Result<()> {
    let container = AppContainer::new(config)?;
    let mut editor = container.editor(config);

    let loaded = load_optional(&mut editor, &args.input).await?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "name": args.input.file_name().map(|n| n.to_string_lossy()),
                "playable": loaded.is_some(),
                "duration_seconds": loaded.map(|d| d.seconds),
            })
        );
    } else {
        match loaded {
            Some(duration) => println!("playable, duration {duration}"),
            None => println!("unplayable: no finite duration could be derived"),
        }
    }

    editor.teardown().await;
    Ok(())
}

/// Read the input file and load it into the editor session
async fn load_input(editor: &mut EditorSession, input: &Path) -> Result<TimeSpec> {
    match load_optional(editor, input).await? {
        Some(duration) => Ok(duration),
        None => bail!("{} is unplayable: no finite duration could be derived", input.display()),
    }
}

/// Like `load_input`, but maps an unreadable asset to `None` instead of
/// an error so probe can report it
async fn load_optional(editor: &mut EditorSession, input: &Path) -> Result<Option<TimeSpec>> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("cannot read input {}", input.display()))?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());

    match editor.load(MediaAsset::new(name, bytes)).await {
        Ok(duration) => Ok(Some(duration)),
        Err(StitchError::UnreadableAsset) => Ok(None),
        Err(e) => Err(e).context("asset load failed"),
    }
}
