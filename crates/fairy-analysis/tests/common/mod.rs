//! Shared fixtures for fairy-analysis integration tests.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};

use fairy_analysis::enforcement::attestation::RunMetadata;
use fairy_analysis::table::{Table, TableSet};

pub const SAMPLES_HEADER: &str = "sample_id\tsample_title\torganism\tlibrary_strategy\tmolecule\tinstrument_model\ttissue\tcell_line\tcell_type\tcollection_date\tread_length";

/// A submission with no defects under GEO-SEQ-BULK.
pub fn good_samples() -> String {
    [
        SAMPLES_HEADER,
        "S1\tLiver rep1\tHomo sapiens\tRNA-Seq\ttotal RNA\tIllumina NovaSeq 6000\tliver\t\t\t2024-05-01\t150",
        "S2\tLiver rep2\tHomo sapiens\tRNA-Seq\ttotal RNA\tIllumina NovaSeq 6000\tliver\t\t\t2024-05-02\t150",
    ]
    .join("\n")
        + "\n"
}

pub fn good_files() -> String {
    [
        "sample_id\tlayout\tfilename",
        "S1\tPAIRED\tS1_R1.fastq.gz",
        "S1\tPAIRED\tS1_R2.fastq.gz",
        "S1\tPAIRED\tS1.counts",
        "S2\tSINGLE\tS2.fastq.gz",
        "S2\tSINGLE\tS2.gene_counts.tsv",
    ]
    .join("\n")
        + "\n"
}

/// One sample row with every GEO field filled, overridable per column.
pub fn sample_row(id: &str, overrides: &[(&str, &str)]) -> String {
    let defaults = [
        ("sample_id", id),
        ("sample_title", "title"),
        ("organism", "Homo sapiens"),
        ("library_strategy", "RNA-Seq"),
        ("molecule", "total RNA"),
        ("instrument_model", "Illumina NovaSeq 6000"),
        ("tissue", "liver"),
        ("cell_line", ""),
        ("cell_type", ""),
        ("collection_date", "2024-05-01"),
        ("read_length", "150"),
    ];
    defaults
        .iter()
        .map(|(col, value)| {
            overrides
                .iter()
                .find(|(c, _)| c == col)
                .map_or(*value, |(_, v)| *v)
        })
        .collect::<Vec<_>>()
        .join("\t")
}

pub fn samples_with_rows(rows: &[String]) -> String {
    let mut out = String::from(SAMPLES_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// Paired-end files with processed data for each id.
pub fn files_for(ids: &[&str]) -> String {
    let mut out = String::from("sample_id\tlayout\tfilename\n");
    for id in ids {
        out.push_str(&format!("{id}\tPAIRED\t{id}_R1.fastq.gz\n"));
        out.push_str(&format!("{id}\tPAIRED\t{id}_R2.fastq.gz\n"));
        out.push_str(&format!("{id}\tPAIRED\t{id}.counts\n"));
    }
    out
}

pub fn table(name: &str, text: &str) -> Table {
    Table::parse(name, text.as_bytes(), b'\t').unwrap()
}

pub fn tables(entries: &[(&str, &str)]) -> TableSet {
    entries.iter().map(|(name, text)| table(name, text)).collect()
}

pub fn good_tables() -> TableSet {
    tables(&[("samples.tsv", &good_samples()), ("files.tsv", &good_files())])
}

pub fn meta() -> RunMetadata {
    RunMetadata::new("0.2.0", Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap())
}
