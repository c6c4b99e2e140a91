//! Integration tests for the editor session over recording collaborators

use std::sync::Arc;

use clipstitch::adapters::{
    EngineCall, MemoryUrlRegistry, MockEngineAdapter, MockPlaybackAdapter,
};
use clipstitch::app::EditorSession;
use clipstitch::config::AppConfig;
use clipstitch::domain::model::{MediaAsset, TimeSpec};
use clipstitch::ports::{ObjectUrlPort, PlaybackPort, TranscodeEnginePort};
use clipstitch::StitchError;

fn ts(seconds: f64) -> TimeSpec {
    TimeSpec::from_seconds(seconds)
}

fn asset() -> MediaAsset {
    MediaAsset::new("talk.mp4", b"media-bytes".to_vec())
}

struct Harness {
    engine: Arc<MockEngineAdapter>,
    playback: Arc<MockPlaybackAdapter>,
    urls: Arc<MemoryUrlRegistry>,
    editor: EditorSession,
}

fn harness() -> Harness {
    let engine = Arc::new(MockEngineAdapter::new());
    let playback = Arc::new(MockPlaybackAdapter::new());
    let urls = Arc::new(MemoryUrlRegistry::new());
    let editor = EditorSession::new(
        Arc::clone(&engine) as Arc<dyn TranscodeEnginePort>,
        Arc::clone(&playback) as Arc<dyn PlaybackPort>,
        Arc::clone(&urls) as Arc<dyn ObjectUrlPort>,
        &AppConfig::default(),
    );
    Harness {
        engine,
        playback,
        urls,
        editor,
    }
}

/// Full marking workflow: 10s asset, mark 2..5, add, cut
#[tokio::test]
async fn mark_add_cut_walkthrough() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.initialize().await.unwrap();

    let duration = h.editor.load(asset()).await.unwrap();
    assert_eq!(duration.seconds, 10.0);
    assert_eq!(h.playback.attached_name().as_deref(), Some("talk.mp4"));
    assert!(h.editor.session().preview_url().is_some());

    h.editor.set_auto_add(false);
    h.playback.set_position(2.7);
    h.editor.handle_key('j').await;
    assert_eq!(h.editor.pending().start, Some(ts(2.0)));

    h.playback.set_position(5.2);
    h.editor.handle_key('k').await;
    assert_eq!(h.editor.pending().end, Some(ts(5.0)));
    assert!(h.editor.clips().is_empty());

    h.editor.handle_key('a').await;
    assert_eq!(h.editor.clips().len(), 1);
    assert_eq!(*h.editor.clips().get(0).unwrap(), clipstitch::Clip::new(ts(2.0), ts(5.0)).unwrap());

    let artifact = h.editor.cut().await.unwrap();
    assert_eq!(artifact.file_name, "output.mp4");

    let ops = h.engine.op_calls();
    assert_eq!(ops.len(), 5);
    assert_eq!(
        ops[1],
        EngineCall::Exec {
            args: ["-y", "-i", "input.mp4", "-ss", "2", "-to", "5", "-c", "copy", "part0.mp4"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        }
    );
    assert_eq!(
        ops[2],
        EngineCall::WriteFile {
            name: "concat.txt".to_string(),
            bytes: b"file 'part0.mp4'".to_vec()
        }
    );

    // preview URL plus held output URL
    assert_eq!(h.urls.active_count(), 2);
}

#[tokio::test]
async fn auto_add_commits_on_mark_end() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.load(asset()).await.unwrap();

    h.playback.set_position(2.0);
    h.editor.handle_key('j').await;
    h.playback.set_position(5.0);
    h.editor.handle_key('k').await;

    assert_eq!(h.editor.clips().len(), 1);
    assert_eq!(h.editor.clips().get(0).unwrap().end, ts(5.0));
}

#[tokio::test]
async fn auto_add_requires_start_below_end() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.load(asset()).await.unwrap();

    h.playback.set_position(5.0);
    h.editor.handle_key('j').await;
    h.playback.set_position(3.0);
    h.editor.handle_key('k').await;

    assert!(h.editor.clips().is_empty());
    assert_eq!(h.editor.pending().end, Some(ts(3.0)));
}

#[tokio::test]
async fn invalid_add_sets_status_and_changes_nothing() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.load(asset()).await.unwrap();

    let err = h.editor.add_range(ts(5.0), ts(5.0)).unwrap_err();
    assert!(matches!(err, StitchError::InvalidRange { .. }));
    assert!(h.editor.clips().is_empty());
    assert!(h.editor.status().is_some());
    assert!(h.engine.op_calls().is_empty());
}

#[tokio::test]
async fn unplayable_asset_disables_the_whole_workflow() {
    let mut h = harness();
    h.playback.set_media_duration(None);
    h.editor.initialize().await.unwrap();

    let err = h.editor.load(asset()).await.unwrap_err();
    assert!(matches!(err, StitchError::UnreadableAsset));
    assert!(h.editor.status().is_some());
    assert!(!h.editor.session().is_playable());

    assert!(matches!(
        h.editor.add_range(ts(1.0), ts(2.0)),
        Err(StitchError::SessionUnplayable)
    ));
    assert!(matches!(h.editor.cut().await, Err(StitchError::SessionUnplayable)));
    assert!(matches!(
        h.editor.refresh_thumbnails().await,
        Err(StitchError::SessionUnplayable)
    ));
    assert!(h.editor.mark_start().await.is_none());
    assert!(h.engine.op_calls().is_empty());

    // a fresh, readable asset re-enables everything
    h.playback.set_media_duration(Some(8.0));
    h.editor.load(asset()).await.unwrap();
    assert!(h.editor.add_range(ts(1.0), ts(2.0)).is_ok());
}

#[tokio::test]
async fn loading_a_new_asset_resets_all_marking_state() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.load(asset()).await.unwrap();

    h.editor.add_range(ts(1.0), ts(3.0)).unwrap();
    h.editor.refresh_thumbnails().await.unwrap();
    h.playback.set_position(7.0);
    h.editor.mark_start().await;
    assert!(!h.editor.clips().is_empty());
    assert!(!h.editor.thumbnails().is_empty());

    h.editor.load(asset()).await.unwrap();
    assert!(h.editor.clips().is_empty());
    assert!(h.editor.thumbnails().is_empty());
    assert_eq!(*h.editor.pending(), clipstitch::PendingRange::default());
}

#[tokio::test]
async fn thumbnail_pass_is_sequential_with_tail_sample() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.load(asset()).await.unwrap();

    let count = h.editor.refresh_thumbnails().await.unwrap();
    // interval max(1, floor(10/10)) = 1: offsets 0..=9 plus the tail
    assert_eq!(count, 11);

    let expected: Vec<f64> = (0..10).map(f64::from).chain([9.9]).collect();
    assert_eq!(h.playback.seeks(), expected);
    assert!(!h.playback.seek_overlap_detected());

    let frames = h.editor.thumbnails().frames();
    assert_eq!(frames[0].width, 160);
    assert_eq!(frames[0].height, 90);
    assert_eq!(frames[0].data, b"frame@0:160x90".to_vec());
    assert_eq!(frames[10].offset.seconds, 9.9);
}

#[tokio::test]
async fn thumbnail_interval_scales_with_duration() {
    let mut h = harness();
    h.playback.set_media_duration(Some(95.0));
    h.editor.load(asset()).await.unwrap();

    h.editor.refresh_thumbnails().await.unwrap();
    // interval max(1, floor(95/10)) = 9: 0,9,...,90 plus the tail at 94.9
    let seeks = h.playback.seeks();
    assert_eq!(seeks.len(), 12);
    assert_eq!(seeks[1], 9.0);
    assert_eq!(*seeks.last().unwrap(), 94.9);
}

#[tokio::test]
async fn short_asset_still_gets_a_tail_sample() {
    let mut h = harness();
    h.playback.set_media_duration(Some(3.0));
    h.editor.load(asset()).await.unwrap();

    let count = h.editor.refresh_thumbnails().await.unwrap();
    assert_eq!(count, 4);
    assert_eq!(h.playback.seeks(), vec![0.0, 1.0, 2.0, 2.9]);
}

#[tokio::test]
async fn failed_thumbnail_pass_keeps_the_previous_set() {
    let mut h = harness();
    h.playback.set_media_duration(Some(3.0));
    h.editor.load(asset()).await.unwrap();
    let count = h.editor.refresh_thumbnails().await.unwrap();

    h.playback.fail_capture();
    assert!(h.editor.refresh_thumbnails().await.is_err());
    assert_eq!(h.editor.thumbnails().len(), count);
}

#[tokio::test]
async fn marking_is_floored_to_whole_seconds() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.load(asset()).await.unwrap();

    h.playback.set_position(4.99);
    assert_eq!(h.editor.mark_start().await, Some(ts(4.0)));
}

#[tokio::test]
async fn marking_without_an_asset_is_a_no_op() {
    let mut h = harness();
    assert!(h.editor.mark_start().await.is_none());
    h.editor.handle_key('j').await;
    assert_eq!(*h.editor.pending(), clipstitch::PendingRange::default());
}

#[tokio::test]
async fn url_resources_are_released_when_superseded_and_on_teardown() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.initialize().await.unwrap();

    h.editor.load(asset()).await.unwrap();
    assert_eq!(h.urls.active_count(), 1); // preview

    h.editor.load(asset()).await.unwrap();
    assert_eq!(h.urls.active_count(), 1); // old preview revoked

    h.editor.add_range(ts(1.0), ts(3.0)).unwrap();
    h.editor.cut().await.unwrap();
    assert_eq!(h.urls.active_count(), 2); // preview + output

    h.editor.teardown().await;
    assert_eq!(h.urls.active_count(), 0);
    assert!(!h.editor.shortcuts_bound());

    // unbound shortcuts resolve nothing
    h.editor.handle_key('j').await;
    assert_eq!(*h.editor.pending(), clipstitch::PendingRange::default());
}

#[tokio::test]
async fn cut_failure_keeps_session_and_clips_intact() {
    let mut h = harness();
    h.playback.set_media_duration(Some(10.0));
    h.editor.initialize().await.unwrap();
    h.editor.load(asset()).await.unwrap();
    h.editor.add_range(ts(1.0), ts(3.0)).unwrap();

    h.engine.fail_at_op(1);
    let err = h.editor.cut().await.unwrap_err();
    assert!(matches!(err, StitchError::ProcessingFailed));
    assert!(h.editor.status().is_some());
    assert_eq!(h.editor.pipeline_state(), clipstitch::PipelineState::Failed);
    assert!(h.editor.output().is_none());

    // the session and clip list are untouched; the retry succeeds
    assert!(h.editor.session().is_playable());
    assert_eq!(h.editor.clips().len(), 1);
    assert!(h.editor.cut().await.is_ok());
    assert!(h.editor.status().is_none());
    assert!(h.editor.output().is_some());
}
