// Unit tests for domain models

use super::*;

fn ts(seconds: f64) -> TimeSpec {
    TimeSpec::from_seconds(seconds)
}

fn pending(start: f64, end: f64) -> PendingRange {
    PendingRange {
        start: Some(ts(start)),
        end: Some(ts(end)),
    }
}

#[test]
fn time_spec_parse_seconds() {
    assert_eq!(TimeSpec::parse("123.456").unwrap().seconds, 123.456);
    assert_eq!(TimeSpec::parse("7").unwrap().seconds, 7.0);
}

#[test]
fn time_spec_parse_clock_forms() {
    assert_eq!(TimeSpec::parse("1:30.5").unwrap().seconds, 90.5);
    assert_eq!(TimeSpec::parse("1:02:03").unwrap().seconds, 3723.0);
}

#[test]
fn time_spec_parse_invalid() {
    assert!(TimeSpec::parse("abc").is_err());
    assert!(TimeSpec::parse("-10").is_err());
    assert!(TimeSpec::parse("1:75").is_err()); // seconds out of range
    assert!(TimeSpec::parse("1:61:00").is_err()); // minutes out of range
    assert!(TimeSpec::parse("1:2:3:4").is_err());
}

#[test]
fn time_spec_token_rendering() {
    assert_eq!(ts(2.0).to_token(), "2");
    assert_eq!(ts(2.5).to_token(), "2.5");
    assert_eq!(ts(0.0).to_token(), "0");
}

#[test]
fn time_spec_floored() {
    assert_eq!(ts(3.9).floored().seconds, 3.0);
    assert_eq!(ts(3.0).floored().seconds, 3.0);
}

#[test]
fn time_spec_display_uses_position_format() {
    assert_eq!(format!("{}", ts(125.0)), "2:05");
    assert_eq!(format!("{}", ts(3723.0)), "1:02:03");
}

#[test]
fn clip_new_valid() {
    let clip = Clip::new(ts(2.0), ts(5.0)).unwrap();
    assert_eq!(clip.start.seconds, 2.0);
    assert_eq!(clip.end.seconds, 5.0);
    assert_eq!(clip.duration().seconds, 3.0);
}

#[test]
fn clip_new_rejects_degenerate_ranges() {
    assert!(Clip::new(ts(5.0), ts(5.0)).is_err());
    assert!(Clip::new(ts(5.0), ts(2.0)).is_err());
    assert!(Clip::new(ts(-1.0), ts(2.0)).is_err());
    assert!(Clip::new(ts(f64::NAN), ts(2.0)).is_err());
    assert!(Clip::new(ts(0.0), ts(f64::INFINITY)).is_err());
}

#[test]
fn clip_overlap_detection() {
    let a = Clip::new(ts(1.0), ts(3.0)).unwrap();
    let b = Clip::new(ts(2.0), ts(4.0)).unwrap();
    let c = Clip::new(ts(3.0), ts(5.0)).unwrap();
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
    assert!(!a.overlaps(&c)); // touching ends do not overlap
}

#[test]
fn clip_serializes_as_flat_start_end() {
    let clip = Clip::new(ts(2.0), ts(5.0)).unwrap();
    let json = serde_json::to_string(&clip).unwrap();
    assert_eq!(json, r#"{"start":2.0,"end":5.0}"#);

    let back: Clip = serde_json::from_str(&json).unwrap();
    assert_eq!(back, clip);
}

#[test]
fn pending_range_stages_and_resets() {
    let mut pending = PendingRange::default();
    assert_eq!(pending.start, None);
    assert_eq!(pending.end, None);

    pending.set_start(ts(2.0));
    pending.set_end(ts(5.0));
    assert_eq!(pending.start, Some(ts(2.0)));
    assert_eq!(pending.end, Some(ts(5.0)));

    pending.reset();
    assert_eq!(pending, PendingRange::default());
}

#[test]
fn clip_list_add_appends_at_end() {
    let mut list = ClipList::new();
    let duration = ts(10.0);

    assert_eq!(list.add(&pending(1.0, 3.0), duration).unwrap(), 0);
    assert_eq!(list.add(&pending(7.0, 9.0), duration).unwrap(), 1);
    assert_eq!(list.len(), 2);
    assert_eq!(*list.get(1).unwrap(), Clip::new(ts(7.0), ts(9.0)).unwrap());
}

#[test]
fn clip_list_permits_duplicates_and_out_of_order() {
    let mut list = ClipList::new();
    let duration = ts(10.0);

    list.add(&pending(7.0, 9.0), duration).unwrap();
    list.add(&pending(1.0, 3.0), duration).unwrap();
    list.add(&pending(7.0, 9.0), duration).unwrap();
    assert_eq!(list.len(), 3);
}

#[test]
fn clip_list_add_failure_leaves_list_unchanged() {
    let mut list = ClipList::new();
    let duration = ts(10.0);
    list.add(&pending(1.0, 3.0), duration).unwrap();
    let before = list.snapshot();

    // start == end
    assert!(matches!(
        list.add(&pending(5.0, 5.0), duration),
        Err(StitchError::InvalidRange { .. })
    ));
    // beyond duration
    assert!(list.add(&pending(5.0, 11.0), duration).is_err());
    // incomplete pending
    let incomplete = PendingRange {
        start: Some(ts(1.0)),
        end: None,
    };
    assert!(list.add(&incomplete, duration).is_err());

    assert_eq!(list.len(), before.len());
    assert_eq!(list.get(0), before.get(0));
}

#[test]
fn clip_list_remove_preserves_relative_order() {
    let mut list = ClipList::new();
    let duration = ts(10.0);
    list.add(&pending(1.0, 2.0), duration).unwrap();
    list.add(&pending(3.0, 4.0), duration).unwrap();
    list.add(&pending(5.0, 6.0), duration).unwrap();

    let removed = list.remove(1).unwrap();
    assert_eq!(removed, Clip::new(ts(3.0), ts(4.0)).unwrap());
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(0).unwrap().start.seconds, 1.0);
    assert_eq!(list.get(1).unwrap().start.seconds, 5.0);
}

#[test]
fn clip_list_remove_out_of_range() {
    let mut list = ClipList::new();
    let err = list.remove(0).unwrap_err();
    assert!(matches!(err, StitchError::IndexOutOfRange { index: 0, len: 0 }));
}

#[test]
fn snapshot_does_not_observe_later_mutations() {
    let mut list = ClipList::new();
    let duration = ts(10.0);
    list.add(&pending(1.0, 3.0), duration).unwrap();

    let snapshot = list.snapshot();
    list.add(&pending(7.0, 9.0), duration).unwrap();
    list.remove(0).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(0).unwrap().start.seconds, 1.0);
}
