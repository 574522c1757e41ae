use std::panic::Location;

use super::context::{render_frames, Frame};
use super::*;
use pretty_assertions::assert_eq;

fn frame(function: &str, file: &str, line: u32) -> Frame {
    Frame {
        function: function.to_string(),
        file: file.to_string(),
        line,
    }
}

#[test]
fn tracking_modes() {
    assert!(!Tracking::Silent.is_tracked());
    assert!(Tracking::Tracked.is_tracked());
    assert!(Tracking::Strict.is_tracked());

    assert!(!Tracking::Silent.terminates());
    assert!(!Tracking::Tracked.terminates());
    assert!(Tracking::Strict.terminates());

    assert_eq!(Tracking::default(), Tracking::Tracked);
}

#[test]
fn frames_render_function_then_location() {
    let frames = [
        frame("shop::sell_alcohol", "src/shop.rs", 31),
        frame("shop::main", "src/main.rs", 7),
    ];
    assert_eq!(
        render_frames(&frames),
        "shop::sell_alcohol\n\tsrc/shop.rs:31\nshop::main\n\tsrc/main.rs:7\n"
    );
}

#[test]
fn no_frames_render_empty() {
    assert_eq!(render_frames(&[]), "");
}

#[test]
fn report_matches_scraper_format() {
    let context = render_frames(&[frame("shop::sell_alcohol", "src/shop.rs", 31)]);
    let report = format_report("verification failure: customer should have license", &context);
    assert_eq!(
        report,
        "[ERROR] found unhandled verification: verification failure: customer should have license\n\
         verification was created here:\n\
         shop::sell_alcohol\n\
         \tsrc/shop.rs:31\n"
    );
}

#[test]
fn report_for_success() {
    let report = format_report("verification success", "f\n\tfile.rs:1\n");
    assert!(report.starts_with("[ERROR] found unhandled verification: verification success\n"));
}

#[test]
fn internal_frames_are_recognized() {
    assert!(frame("verifier::verify::Verify::new", "", 0).is_internal());
    assert!(frame(
        "<verifier::verify::Verify<E> as core::ops::drop::Drop>::drop",
        "",
        0
    )
    .is_internal());
    assert!(frame("backtrace::capture::Backtrace::new_unresolved", "", 0).is_internal());

    assert!(!frame("verifier_app::main", "", 0).is_internal());
    assert!(!frame("shop::sell_alcohol", "", 0).is_internal());
    assert!(!frame("<unknown>", "", 0).is_internal());
}

#[test]
fn captured_context_is_never_empty() {
    let mut context = CreationContext::capture(Location::caller(), DEFAULT_MAX_FRAMES);
    let frames = context.frames();
    assert!(!frames.is_empty());
    assert!(frames.len() <= DEFAULT_MAX_FRAMES);
}

#[test]
fn captured_context_respects_frame_limit() {
    let mut context = CreationContext::capture(Location::caller(), 2);
    assert!(context.frames().len() <= 2);

    let mut empty = CreationContext::capture(Location::caller(), 0);
    let frames = empty.frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].function, "<unknown>");
    assert_eq!(frames[0].file, file!());
}

#[test]
fn rendered_context_has_two_lines_per_frame() {
    let mut context = CreationContext::capture(Location::caller(), 4);
    let rendered = context.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(!lines.is_empty());
    assert_eq!(lines.len() % 2, 0);
    for location in lines.iter().skip(1).step_by(2) {
        assert!(location.starts_with('\t'));
        assert!(location.contains(':'));
    }
}

#[test]
fn flush_without_pending_reports_returns() {
    flush_unhandled_reports();
    flush_unhandled_reports();
}
