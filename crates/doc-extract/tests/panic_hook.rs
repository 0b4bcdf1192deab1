//! Panic hook behaviour, in its own test binary because the hook is global

use doc_extract::{
    install_panic_hook, DocumentKind, ExtractConfig, ExtractError, ExtractorRegistry,
    HtmlExtractor, Pipeline,
};
use std::fs;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Panics that reached the hook installed before ours
static FORWARDED: AtomicUsize = AtomicUsize::new(0);

fn exploding_pdf(_: &[u8]) -> Result<String, ExtractError> {
    panic!("boom in extractor")
}

#[test]
fn extractor_panics_are_counted_without_console_output() {
    panic::set_hook(Box::new(|_| {
        FORWARDED.fetch_add(1, Ordering::SeqCst);
    }));
    install_panic_hook();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a.pdf"), b"%PDF-whatever").unwrap();
    fs::write(input.join("b.html"), b"<p>fine</p>").unwrap();

    let config = ExtractConfig {
        input_dir: input,
        output_dir: dir.path().join("out"),
        report_path: dir.path().join("report.txt"),
        read_workers: 1,
        extract_workers: 2,
        ..Default::default()
    };
    let registry = ExtractorRegistry::new()
        .with(DocumentKind::Pdf, exploding_pdf)
        .with(DocumentKind::Html, HtmlExtractor::new());
    let report = Pipeline::new(config, registry).unwrap().run().unwrap();

    let pdf = report.metrics.get(DocumentKind::Pdf);
    assert_eq!((pdf.success_count, pdf.error_count), (0, 1));
    let html = report.metrics.get(DocumentKind::Html);
    assert_eq!((html.success_count, html.error_count), (1, 0));
    // The default hook (stderr) never saw the extractor panic
    assert_eq!(FORWARDED.load(Ordering::SeqCst), 0);

    // Panics anywhere else still go through the previous hook
    let joined = thread::Builder::new()
        .name("read-0".to_string())
        .spawn(|| panic!("not an extractor"))
        .unwrap()
        .join();
    assert!(joined.is_err());
    assert_eq!(FORWARDED.load(Ordering::SeqCst), 1);

    let _ = panic::take_hook();
}
