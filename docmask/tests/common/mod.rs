// docmask/tests/common/mod.rs
//! Builders for small office containers used by the integration tests.
#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Writes a zip at `path` with `(name, content, stored)` entries in order.
pub fn write_container(path: &Path, entries: &[(&str, &str, bool)]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    for (name, content, stored) in entries {
        let method = if *stored { CompressionMethod::Stored } else { CompressionMethod::Deflated };
        zip.start_file(*name, SimpleFileOptions::default().compression_method(method)).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Reads one entry of a container as text.
pub fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut out = String::new();
    entry.read_to_string(&mut out).unwrap();
    out
}

/// Entry names in archive order, with each entry's compression method.
pub fn entry_layout(path: &Path) -> Vec<(String, CompressionMethod)> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let entry = archive.by_index(i).unwrap();
            (entry.name().to_string(), entry.compression())
        })
        .collect()
}

pub const DOCX_DOCUMENT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    r#"<w:p><w:r><w:t>주민번호 900101</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>-1234568</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>메일 kim@example.com</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>nothing here</w:t></w:r></w:p>"#,
    r#"</w:body></w:document>"#,
);

pub const DOCX_STYLES: &str = r#"<w:styles><w:style w:styleId="lee@example.com"/></w:styles>"#;

/// A minimal docx: content types, the main document and an untouched styles part.
pub fn write_docx(path: &Path) {
    write_container(
        path,
        &[
            ("[Content_Types].xml", r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#, false),
            ("word/document.xml", DOCX_DOCUMENT, false),
            ("word/styles.xml", DOCX_STYLES, false),
        ],
    );
}

pub const XLSX_SHARED_STRINGS: &str = concat!(
    r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">"#,
    r#"<si><t>kim@example.com</t></si>"#,
    r#"<si><r><t>010-1234</t></r><r><rPr><b/></rPr><t>-5678</t></r></si>"#,
    r#"<si><t>이름</t></si>"#,
    r#"</sst>"#,
);

pub fn write_xlsx(path: &Path) {
    write_container(
        path,
        &[
            ("[Content_Types].xml", "<Types/>", false),
            ("xl/sharedStrings.xml", XLSX_SHARED_STRINGS, false),
            ("xl/worksheets/sheet1.xml", r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c></row></sheetData></worksheet>"#, false),
        ],
    );
}

pub const PPTX_SLIDE: &str = concat!(
    r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:spTree><p:sp><p:txBody>"#,
    r#"<a:p><a:r><a:t>Card 4111 1111 1111 1111</a:t></a:r></a:p>"#,
    r#"</p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
);

pub fn write_pptx(path: &Path) {
    write_container(
        path,
        &[
            ("[Content_Types].xml", "<Types/>", false),
            ("ppt/slides/slide1.xml", PPTX_SLIDE, false),
        ],
    );
}

pub const HWPX_SECTION: &str = concat!(
    r#"<hs:sec xmlns:hs="http://www.hancom.co.kr/hwpml/2011/section" xmlns:hp="http://www.hancom.co.kr/hwpml/2011/paragraph">"#,
    r#"<hp:p><hp:run><hp:t>전화 010-9876-5432</hp:t></hp:run></hp:p>"#,
    r#"</hs:sec>"#,
);

/// A minimal hwpx: stored `mimetype` first, then the section part.
pub fn write_hwpx(path: &Path) {
    write_container(
        path,
        &[
            ("mimetype", "application/hwp+zip", true),
            ("Contents/section0.xml", HWPX_SECTION, false),
        ],
    );
}
