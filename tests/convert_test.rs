//! Integration tests for file and directory conversion.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use txtml::convert::{self, discover, ConvertOptions, Converter};
use txtml::{ParseOptions, RenderOptions, Txtml, Warning};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_convert_file_writes_txt_next_to_source() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "report.tml", "<calc s>6*7</calc>");

    let converted = Converter::default()
        .convert_file(dir.path().join("report.tml"))
        .unwrap();

    assert_eq!(converted.output, dir.path().join("report.txt"));
    assert_eq!(fs::read_to_string(&converted.output).unwrap(), "6*7 = 42");
    assert_eq!(converted.result.content, "6*7 = 42");
}

#[test]
fn test_convert_dir_converts_every_source() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.tml", "<sep>");
    write(dir.path(), "b.tml", "<blink>b</blink>");
    write(dir.path(), "notes.txt", "left alone");

    let report = convert::convert_dir(dir.path(), &ConvertOptions::default()).unwrap();

    assert_eq!(report.file_count(), 2);
    assert!(report.failed.is_empty());
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.total_stats().unknown_tags, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "-".repeat(80)
    );
    assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "b");
    assert_eq!(
        fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
        "left alone"
    );
}

#[test]
fn test_empty_dir_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();

    let report = Converter::default().convert_dir(dir.path()).unwrap();

    assert!(report.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(discover(dir.path().join("nope")).is_err());
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..12 {
        write(
            dir.path(),
            &format!("doc{:02}.tml", i),
            &format!("<doc_width {}><h3>Part {}</h3>\n<sep>", 20 + i, i),
        );
    }
    let files = discover(dir.path()).unwrap();

    let parallel = Converter::new(ConvertOptions::new()).convert_files(&files, |_, _| {});
    let sequential =
        Converter::new(ConvertOptions::new().sequential()).convert_files(&files, |_, _| {});

    assert_eq!(parallel.converted.len(), 12);
    for (p, s) in parallel.converted.iter().zip(&sequential.converted) {
        assert_eq!(p.input, s.input);
        assert_eq!(p.result.content, s.result.content);
    }
    // Each document keeps its own width.
    let last = &parallel.converted[11].result.content;
    assert!(last.lines().all(|line| line.len() == 31));
}

#[test]
fn test_progress_callback_sees_every_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.tml", "a");
    write(dir.path(), "b.tml", "b");
    let files = discover(dir.path()).unwrap();

    let seen = AtomicUsize::new(0);
    Converter::default().convert_files(&files, |_, outcome| {
        assert!(outcome.is_ok());
        seen.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn test_strict_failure_is_reported_per_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "good.tml", "<center>x</center>");
    write(dir.path(), "bad.tml", "<center>x");

    let options = ConvertOptions::new().with_parse_options(ParseOptions::new().strict());
    let report = Converter::new(options).convert_dir(dir.path()).unwrap();

    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].input.ends_with("bad.tml"));
    assert!(report.failed[0].error.contains("center"));
    assert!(!dir.path().join("bad.txt").exists());
}

#[test]
fn test_output_dir() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "doc.tml", "<right>x</right>");

    let options = ConvertOptions::new()
        .with_output_dir(out.path())
        .with_render_options(RenderOptions::new().with_width(10));
    Converter::new(options).convert_dir(src.path()).unwrap();

    assert!(!src.path().join("doc.txt").exists());
    assert_eq!(
        fs::read_to_string(out.path().join("doc.txt")).unwrap(),
        "         x"
    );
}

#[test]
fn test_insert_resolves_against_source_dir() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "part.txt", "x < y");
    write(dir.path(), "doc.tml", "<insert part.txt>");

    let converted = Converter::default()
        .convert_file(dir.path().join("doc.tml"))
        .unwrap();

    assert_eq!(converted.result.content, "\nx < y\n\n");
}

#[test]
fn test_legacy_encoded_source_still_converts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("legacy.tml");
    // "Привет" in cp1251
    fs::write(&input, b"<center>\xcf\xf0\xe8\xe2\xe5\xf2</center>").unwrap();

    let converted = Converter::default().convert_file(&input).unwrap();

    assert_eq!(converted.result.content.trim(), "\u{FFFD}".repeat(6));
    assert_eq!(
        converted.result.warnings,
        vec![Warning::InvalidUtf8 { path: input.clone() }]
    );
    assert!(converted.output.exists());

    let rendered = Txtml::new().render_file(&input).unwrap();
    assert_eq!(rendered.content, converted.result.content);
    assert_eq!(rendered.warnings.len(), 1);
}

#[test]
fn test_builder_into_converter() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "doc.tml", "<sep>");

    let converter = Txtml::new().with_width(15).into_converter(false);
    assert!(!converter.options().parallel);

    let report = converter.convert_dir(dir.path()).unwrap();
    assert_eq!(report.converted[0].result.content, "-".repeat(15));
}

#[test]
fn test_report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "doc.tml", "<calc>1+1</calc>");

    let report = Converter::default().convert_dir(dir.path()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["converted"][0]["result"]["content"], "2");
    assert_eq!(json["failed"].as_array().map(Vec::len), Some(0));
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_convert_file_async() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "doc.tml", "<calc>3*3</calc>");

    let converted = convert::convert_file_async(dir.path().join("doc.tml"), &ConvertOptions::new())
        .await
        .unwrap();

    assert_eq!(converted.result.content, "9");
    assert_eq!(fs::read_to_string(converted.output).unwrap(), "9");
}
