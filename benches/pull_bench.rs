#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fmt::Write;
use xmlpull::parser::parse_str;
use xmlpull::reader::events::compile;
use xmlpull::{EventKind, PullParser, FEATURE_PROCESS_NAMESPACES};

// ---------------------------------------------------------------------------
// Document generators
// ---------------------------------------------------------------------------

/// Generates an OPF-like package document with `items` manifest entries.
fn make_package(items: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <package xmlns=\"http://www.idpf.org/2007/opf\" version=\"3.0\">\n\
         <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n\
         <dc:title>Title</dc:title>\n</metadata>\n<manifest>\n",
    );
    for i in 0..items {
        let _ = writeln!(
            xml,
            "  <item id=\"item{i}\" href=\"text/chapter_{i}.xhtml\" \
             media-type=\"application/xhtml+xml\"/>"
        );
    }
    xml.push_str("</manifest>\n</package>\n");
    xml
}

/// Generates an XHTML navigation document with `links` entries.
fn make_nav(links: usize) -> String {
    let mut html = String::from(
        "<html xmlns=\"http://www.w3.org/1999/xhtml\" \
         xmlns:epub=\"http://www.idpf.org/2007/ops\">\n<body>\n\
         <nav epub:type=\"toc\" id=\"toc\">\n<ol>\n",
    );
    for i in 0..links {
        let _ = writeln!(html, "  <li><a href=\"Page_{i}.xhtml\">Page {i}</a></li>");
    }
    html.push_str("</ol>\n</nav>\n</body>\n</html>");
    html
}

/// Generates a chain of `depth` nested elements, which closes in one cascade.
fn make_nested(depth: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n");
    for _ in 0..depth {
        xml.push_str("<d>");
    }
    xml.push_str("leaf");
    for _ in 0..depth {
        xml.push_str("</d>");
    }
    xml
}

fn drain(parser: &mut PullParser) -> u64 {
    let mut count: u64 = 0;
    while parser.advance() != EventKind::None {
        count += 1;
    }
    count
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_compile_package(c: &mut Criterion) {
    let doc = parse_str(&make_package(1000)).expect("parse failed");
    c.bench_function("compile_package", |b| {
        b.iter(|| black_box(compile(black_box(&doc))));
    });
}

fn bench_compile_nested(c: &mut Criterion) {
    let doc = parse_str(&make_nested(200)).expect("parse failed");
    c.bench_function("compile_nested", |b| {
        b.iter(|| black_box(compile(black_box(&doc))));
    });
}

fn bench_pull_package(c: &mut Criterion) {
    let xml = make_package(1000);
    c.bench_function("pull_package", |b| {
        b.iter(|| {
            let mut parser = PullParser::new();
            parser
                .set_feature(FEATURE_PROCESS_NAMESPACES, true)
                .expect("feature rejected");
            parser.set_input(black_box(&xml)).expect("parse failed");
            black_box(drain(&mut parser));
        });
    });
}

fn bench_pull_nav(c: &mut Criterion) {
    let html = make_nav(500);
    c.bench_function("pull_nav", |b| {
        b.iter(|| {
            let mut parser = PullParser::new();
            parser.set_input(black_box(&html)).expect("parse failed");
            let mut hrefs = 0u64;
            while parser.advance() != EventKind::None {
                if parser.name() == Some("a") && parser.attribute_count().is_some() {
                    hrefs += 1;
                }
            }
            black_box(hrefs);
        });
    });
}

criterion_group!(compilation, bench_compile_package, bench_compile_nested);

criterion_group!(pulling, bench_pull_package, bench_pull_nav);

criterion_main!(compilation, pulling);
