//! Benchmarks for sheetpulse ingestion.
//!
//! Run with: cargo bench
//!
//! Synthetic workbooks of increasing row counts exercise the worksheet
//! reader, the normalizer and the aggregation stage separately.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sheetpulse::ingest::{build_dataset, normalize_all, parse_interactions};
use sheetpulse::{IngestOptions, XlsxReader};
use std::io::Cursor;

const HEADER: [&str; 8] = [
    "Message ID",
    "Participant",
    "Message Date",
    "Message Time",
    "Category",
    "Satisfied",
    "Input Cost",
    "Output Cost",
];

/// Creates a synthetic workbook with `row_count` interaction rows.
fn create_test_xlsx(row_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="merged_data-all" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
    )
    .unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
    )
    .unwrap();

    // Header cells and categories live in the shared string table
    let categories = ["Housing", "Food", "Health", "Other"];
    let mut strings: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
    strings.extend(categories.iter().map(|c| c.to_string()));
    strings.extend((0..20).map(|p| format!("p{p}")));

    let mut sst = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        strings.len()
    );
    for s in &strings {
        sst.push_str(&format!("<si><t>{s}</t></si>"));
    }
    sst.push_str("</sst>");
    zip.start_file("xl/sharedStrings.xml", options).unwrap();
    zip.write_all(sst.as_bytes()).unwrap();

    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1">"#,
    );
    for (c, letter) in ["A", "B", "C", "D", "E", "F", "G", "H"].iter().enumerate() {
        sheet.push_str(&format!(r#"<c r="{letter}1" t="s"><v>{c}</v></c>"#));
    }
    sheet.push_str("</row>");

    for i in 0..row_count {
        let r = i + 2;
        let category = HEADER.len() + i % categories.len();
        let participant = HEADER.len() + categories.len() + i % 20;
        sheet.push_str(&format!(
            r#"<row r="{r}"><c r="A{r}"><v>{i}</v></c><c r="B{r}" t="s"><v>{participant}</v></c><c r="C{r}"><v>{date}</v></c><c r="D{r}"><v>{time}</v></c><c r="E{r}" t="s"><v>{category}</v></c><c r="F{r}" t="str"><v>yes</v></c><c r="G{r}"><v>0.0015</v></c><c r="H{r}"><v>0.0042</v></c></row>"#,
            date = 44927 + i % 365,
            time = (i % 1440) as f64 / 1440.0,
        ));
    }
    sheet.push_str("</sheetData></worksheet>");

    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(sheet.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer
}

/// Benchmark the full pipeline from bytes to datasets.
fn bench_full_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_ingest");
    let options = IngestOptions::new().with_exclude(["p3"]);

    for row_count in [100, 1000, 10000].iter() {
        let data = create_test_xlsx(*row_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(BenchmarkId::new("rows", row_count), &data, |b, data| {
            b.iter(|| {
                let _ = sheetpulse::ingest_bytes(black_box(data), "bench.xlsx", &options);
            });
        });
    }

    group.finish();
}

/// Benchmark worksheet extraction alone.
fn bench_sheet_reading(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet_reading");

    for row_count in [100, 1000, 10000].iter() {
        let reader = XlsxReader::from_bytes(create_test_xlsx(*row_count)).unwrap();

        group.bench_with_input(BenchmarkId::new("rows", row_count), &reader, |b, reader| {
            b.iter(|| {
                let _ = black_box(reader).read_rows("merged_data-all");
            });
        });
    }

    group.finish();
}

/// Benchmark normalization and aggregation over parsed rows.
fn bench_normalize_and_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_and_aggregate");

    for row_count in [100, 1000, 10000].iter() {
        let reader = XlsxReader::from_bytes(create_test_xlsx(*row_count)).unwrap();
        let sheet = reader.read_rows("merged_data-all").unwrap();
        let records = parse_interactions(&sheet.rows).unwrap();
        let generated_at = IngestOptions::new().resolve_generated_at();

        group.bench_with_input(
            BenchmarkId::new("rows", row_count),
            &records,
            |b, records| {
                b.iter(|| {
                    let interactions = normalize_all(black_box(records));
                    let _ = build_dataset("bench_all", interactions, "bench.xlsx", generated_at);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_full_ingest,
    bench_sheet_reading,
    bench_normalize_and_aggregate,
);
criterion_main!(benches);
