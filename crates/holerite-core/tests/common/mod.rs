//! Helpers for building small text PDFs in tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// How lines are laid out in a page's content stream.
#[derive(Clone, Copy)]
enum Layout {
    /// One `BT ... ET` block per line.
    BlockPerLine,
    /// All lines in a single text block, moved down with `Td`.
    SingleBlock,
}

/// Build a PDF with one page per entry; each string is one text line.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    build(pages, Layout::BlockPerLine)
}

/// Like [`build_pdf`], but each page draws its lines inside one text block,
/// the way most generated payslips do.
pub fn build_flowing_pdf(pages: &[&[&str]]) -> Vec<u8> {
    build(pages, Layout::SingleBlock)
}

/// Courier with WinAnsiEncoding: Latin-1 letters map to the same byte.
fn win_ansi(line: &str) -> Vec<u8> {
    line.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect()
}

fn page_operations(lines: &[&str], layout: Layout) -> Vec<Operation> {
    let mut operations = Vec::new();
    match layout {
        Layout::BlockPerLine => {
            for (i, line) in lines.iter().enumerate() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![50.into(), (780 - 18 * i as i64).into()],
                ));
                operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(line))]));
                operations.push(Operation::new("ET", vec![]));
            }
        }
        Layout::SingleBlock => {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
            operations.push(Operation::new("Td", vec![50.into(), 780.into()]));
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    operations.push(Operation::new("Td", vec![0.into(), (-18).into()]));
                }
                operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(line))]));
            }
            operations.push(Operation::new("ET", vec![]));
        }
    }
    operations
}

fn build(pages: &[&[&str]], layout: Layout) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let content = Content {
            operations: page_operations(lines, layout),
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save test pdf");
    out
}

/// A payslip page with the name line right below the heading.
pub fn payslip_page(name: &'static str, cpf: &'static str, net: &'static str) -> [&'static str; 5] {
    [
        "Recibo de Pagamento de Salario",
        name,
        "Cargo: Analista",
        cpf,
        net,
    ]
}

/// Load `data` and return each page's text, via lopdf.
pub fn page_texts(data: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(data).expect("load pdf");
    doc.get_pages()
        .keys()
        .map(|&n| doc.extract_text(&[n]).expect("extract text"))
        .collect()
}
