//! The public fluent surface, end to end.

use marginalia::{
    CharSetKind, Config, Kind, ReportBuilder, Scheme, Source, StyleCategory, render_to_string,
};

fn trimmed(s: &str) -> String {
    s.lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn ascii() -> Config {
    Config::new().with_char_set(CharSetKind::Ascii)
}

#[test]
fn chained_labels_with_implicit_surfacing() {
    let out = ReportBuilder::new(Kind::Error)
        .with_config(ascii())
        .with_source("apple == orange;")
        .with_title("can't compare apples with oranges")
        .with_label(0..5)
        .with_message("This is an apple")
        .with_label(9..15)
        .with_message("This is an orange")
        .render_to_string()
        .unwrap();
    assert_eq!(
        trimmed(&out),
        "\
Error: can't compare apples with oranges
   ,-[ <unknown>:1:1 ]
   |
 1 | apple == orange;
   | ^^|^^    ^^^|^^
   |   `-------------- This is an apple
   |             |
   |             `---- This is an orange
---'"
    );
}

#[test]
fn labels_route_to_registered_sources() {
    let out = ReportBuilder::new(Kind::Error)
        .with_config(ascii())
        .with_source(("import foo", "main.rs"))
        .with_source(("pub fn foo() {}", "foo.rs"))
        .with_title("Import error")
        .with_location(0, 7)
        .with_label(7..10)
        .with_message("imported here")
        .with_label(7..10)
        .in_source(1)
        .with_message("defined here")
        .render_to_string()
        .unwrap();
    let text = trimmed(&out);
    assert!(text.contains(",-[ main.rs:1:8 ]"));
    assert!(text.contains("|-[ foo.rs:1:8 ]"));
    let main_at = text.find("main.rs").unwrap();
    let foo_at = text.find("foo.rs").unwrap();
    assert!(main_at < foo_at);
}

#[test]
fn builder_matches_the_engine_entry_point() {
    let built = ReportBuilder::new(Kind::Warning)
        .with_config(ascii())
        .with_source(("hello world", "w.rs"))
        .with_title("greetings")
        .with_label(0..5)
        .with_message("salutation")
        .render_to_string()
        .unwrap();

    let mut report = marginalia::Report::new(Kind::Warning);
    report.config = ascii();
    report.message = Some("greetings".to_string());
    let mut label = marginalia::Label::new(0..5, 0);
    label.message = Some("salutation".to_string());
    report.labels = vec![label];
    let direct = render_to_string(&report, &Source::with_name("w.rs", "hello world"), None);

    assert_eq!(built, direct);
}

#[test]
fn per_label_color_overrides_the_report_scheme() {
    struct Angle;
    impl Scheme for Angle {
        fn code(&self, c: StyleCategory) -> Option<&str> {
            Some(match c {
                StyleCategory::Reset => ">",
                _ => "<",
            })
        }
    }
    let out = ReportBuilder::new(Kind::Error)
        .with_config(ascii())
        .with_source("abcdef")
        .with_title("paint")
        .with_label(0..3)
        .with_message("here")
        .with_color(Angle)
        .render_to_string()
        .unwrap();
    // The label's underline is bracketed by its own scheme even though
    // the report has none.
    assert!(out.contains("<^|^>"));
}

#[test]
fn helps_and_notes_follow_the_last_group() {
    let out = ReportBuilder::new(Kind::Advice)
        .with_config(ascii())
        .with_source("x")
        .with_title("style")
        .with_label(0..1)
        .with_message("shadowed")
        .with_help("rename it")
        .with_note("seen 3 times")
        .render_to_string()
        .unwrap();
    let text = trimmed(&out);
    let help_at = text.find("Help: rename it").unwrap();
    let note_at = text.find("Note: seen 3 times").unwrap();
    let tail_at = text.rfind("---'").unwrap();
    assert!(help_at < note_at && note_at < tail_at);
    assert!(text.starts_with("Advice: style"));
}
