mod common;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

use holerite_core::{
    process, process_single_page, split_page, HoleriteConfig, HoleriteError, PageIndex,
    PayslipProcessor, PdfError, PdfProcessor,
};

use common::{build_flowing_pdf, build_pdf, payslip_page};

fn three_page_payslip() -> Vec<u8> {
    build_pdf(&[
        &payslip_page(
            "Nome do Funcionario MARIA SOUZA",
            "CPF: 529.982.247-25",
            "SALARIO LIQUIDO R$ 2.987,32",
        ),
        &["Pagina de avisos", "Nada a declarar"],
        &payslip_page(
            "Nome do Colaborador PEDRO LIMA",
            "CPF: 935.411.347-80",
            "SALARIO LIQUIDO R$ 1.050,00",
        ),
    ])
}

#[test]
fn test_report_has_one_entry_per_page_in_order() {
    let report = process(&three_page_payslip()).unwrap();

    assert_eq!(report.len(), 3);
    let numbers: Vec<u32> = report.pages().iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_fields_are_extracted_per_page() {
    let report = process(&three_page_payslip()).unwrap();
    let pages = report.pages();

    assert_eq!(pages[0].fields.name, "MARIA SOUZA");
    assert_eq!(pages[0].fields.tax_id, "529.982.247-25");
    assert_eq!(
        pages[0].fields.net_value,
        Some(Decimal::from_str("2987.32").unwrap())
    );

    // The middle page keeps its own empty defaults.
    assert!(pages[1].fields.is_empty());

    assert_eq!(pages[2].fields.name, "PEDRO LIMA");
    assert_eq!(pages[2].fields.tax_id, "935.411.347-80");
    assert_eq!(
        pages[2].fields.net_value,
        Some(Decimal::from_str("1050.00").unwrap())
    );
}

#[test]
fn test_every_page_gets_a_single_page_document() {
    let report = process(&three_page_payslip()).unwrap();

    for page in report.pages() {
        assert!(page.warnings.is_empty(), "unexpected warnings: {:?}", page.warnings);
        let texts = common::page_texts(&page.page_document);
        assert_eq!(texts.len(), 1);
    }

    let third = common::page_texts(&report.pages()[2].page_document);
    assert!(third[0].contains("935.411.347-80"));
    assert!(!third[0].contains("529.982.247-25"));
}

#[test]
fn test_document_without_labels_is_empty_extraction() {
    let data = build_pdf(&[&["Relatorio gerencial"], &["Sem campos"]]);
    let err = process(&data).unwrap_err();
    assert!(matches!(err, HoleriteError::EmptyExtraction));
    assert_eq!(err.kind().http_status(), 422);
}

#[test]
fn test_one_field_on_one_page_is_enough() {
    let data = build_pdf(&[&["Capa"], &["Observacoes", "CPF: 123.456.789-00"]]);
    let report = process(&data).unwrap();

    assert_eq!(report.len(), 2);
    assert!(report.pages()[0].fields.is_empty());
    assert_eq!(report.pages()[1].fields.tax_id, "123.456.789-00");
    assert_eq!(report.pages()[1].fields.name, "");
    assert_eq!(report.pages()[1].fields.net_value, None);
}

#[test]
fn test_document_without_pages_is_empty_extraction() {
    let data = build_pdf(&[]);
    assert!(matches!(process(&data), Err(HoleriteError::EmptyExtraction)));
    assert!(matches!(
        process_single_page(&data, 1),
        Err(HoleriteError::PageOutOfRange { page: 1, page_count: 0 })
    ));
}

#[test]
fn test_invalid_bytes_are_invalid_document() {
    let err = process(b"this is not a pdf document").unwrap_err();
    assert!(matches!(err, HoleriteError::InvalidDocument(_)));
    assert_eq!(err.kind().http_status(), 400);
}

#[test]
fn test_bulk_extract_is_idempotent() {
    let data = three_page_payslip();
    let first = serde_json::to_vec(&process(&data).unwrap()).unwrap();
    let second = serde_json::to_vec(&process(&data).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_page_matches_bulk_page_document() {
    let data = three_page_payslip();
    let report = process(&data).unwrap();

    let single = process_single_page(&data, 1).unwrap();
    assert_eq!(single, report.pages()[0].page_document);
    assert_eq!(single, split_page(&data, PageIndex::new(0)).unwrap());
}

#[test]
fn test_single_page_out_of_range() {
    let data = three_page_payslip();

    let err = process_single_page(&data, 4).unwrap_err();
    assert!(matches!(
        err,
        HoleriteError::PageOutOfRange { page: 4, page_count: 3 }
    ));
    assert_eq!(err.kind().http_status(), 404);

    assert!(matches!(
        process_single_page(&data, 0),
        Err(HoleriteError::PageOutOfRange { page: 0, .. })
    ));
}

#[test]
fn test_progress_callback_sees_every_page() {
    let data = three_page_payslip();
    let mut seen = Vec::new();
    PayslipProcessor::new()
        .process_with_progress(&data, |page, total| seen.push((page, total)))
        .unwrap();
    assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn test_cpf_validation_config() {
    let data = build_pdf(&[&["CPF: 123.456.789-00"]]);

    let mut config = HoleriteConfig::default();
    config.extraction.validate_cpf = true;
    let err = PayslipProcessor::with_config(config).process(&data).unwrap_err();
    assert!(matches!(err, HoleriteError::EmptyExtraction));
}

#[test]
fn test_wire_format() {
    let report = process(&three_page_payslip()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    let entries = json.as_array().unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["page"], 1);
    assert_eq!(entries[0]["nome"], "MARIA SOUZA");
    assert_eq!(entries[0]["cpf"], "529.982.247-25");
    assert!((entries[0]["valor_liquido"].as_f64().unwrap() - 2987.32).abs() < 1e-9);
    assert!(entries[1]["valor_liquido"].is_null());
    assert!(!entries[1]["page_pdf_base64"].as_str().unwrap().is_empty());
}

#[test]
fn test_name_on_the_line_after_its_label() {
    let data = build_flowing_pdf(&[&[
        "Nome do Colaborador",
        "JOÃO DA SILVA",
        "Cargo: Analista",
        "CPF: 123.456.789-00",
    ]]);
    let report = process(&data).unwrap();
    let fields = &report.pages()[0].fields;

    assert_eq!(fields.name, "JOÃO DA SILVA");
    assert_eq!(fields.tax_id, "123.456.789-00");
    assert_eq!(fields.net_value, None);
}

#[test]
fn test_lines_in_one_text_block_stay_apart() {
    let data = build_flowing_pdf(&[&payslip_page(
        "Nome do Funcionario ANA PAULA REIS",
        "CPF: 529.982.247-25",
        "SALARIO LIQUIDO R$ 3.100,45",
    )]);
    let report = process(&data).unwrap();
    let fields = &report.pages()[0].fields;

    assert_eq!(fields.name, "ANA PAULA REIS");
    assert_eq!(fields.tax_id, "529.982.247-25");
    assert_eq!(fields.net_value, Some(Decimal::from_str("3100.45").unwrap()));
}

#[test]
fn test_accented_labels() {
    let data = build_pdf(&[&[
        "Nome do Funcionário",
        "MARCOS ANTÔNIO",
        "CPF: 935.411.347-80",
        "SALÁRIO LÍQUIDO R$ 2.987,32",
    ]]);
    let report = process(&data).unwrap();
    let fields = &report.pages()[0].fields;

    assert_eq!(fields.name, "MARCOS ANTÔNIO");
    assert_eq!(fields.tax_id, "935.411.347-80");
    assert_eq!(fields.net_value, Some(Decimal::from_str("2987.32").unwrap()));
}

/// Three pages: the second has an unreadable text layer, the third cannot
/// be written out on its own.
struct FlakyPdf;

impl PdfProcessor for FlakyPdf {
    fn load(&mut self, _data: &[u8]) -> Result<(), PdfError> {
        Ok(())
    }

    fn page_count(&self) -> u32 {
        3
    }

    fn extract_page_text(&self, index: PageIndex) -> Result<String, PdfError> {
        match index.get() {
            1 => Err(PdfError::TextExtraction("broken content stream".to_string())),
            _ => Ok("CPF: 529.982.247-25\n".to_string()),
        }
    }

    fn split_page(&self, index: PageIndex) -> Result<Vec<u8>, PdfError> {
        match index.get() {
            2 => Err(PdfError::Save("disk full".to_string())),
            _ => Ok(b"%PDF-1.5 page".to_vec()),
        }
    }
}

#[test]
fn test_failing_pages_degrade_without_aborting() {
    let report = PayslipProcessor::new()
        .process_document(&FlakyPdf, |_, _| {})
        .unwrap();
    let pages = report.pages();

    assert_eq!(pages.len(), 3);

    assert_eq!(pages[0].fields.tax_id, "529.982.247-25");
    assert!(pages[0].warnings.is_empty());

    assert!(pages[1].fields.is_empty());
    assert_eq!(pages[1].page_document, b"%PDF-1.5 page".to_vec());
    assert_eq!(pages[1].warnings.len(), 1);
    assert!(pages[1].warnings[0].contains("broken content stream"));

    assert_eq!(pages[2].fields.tax_id, "529.982.247-25");
    assert!(pages[2].page_document.is_empty());
    assert_eq!(pages[2].warnings.len(), 1);
    assert!(pages[2].warnings[0].contains("disk full"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json[2]["page_pdf_base64"], "");
    assert!(json[2].get("warnings").is_none());
}

#[test]
fn test_every_page_degraded_is_empty_extraction() {
    struct Unreadable;

    impl PdfProcessor for Unreadable {
        fn load(&mut self, _data: &[u8]) -> Result<(), PdfError> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            2
        }

        fn extract_page_text(&self, _index: PageIndex) -> Result<String, PdfError> {
            Err(PdfError::TextExtraction("no text layer".to_string()))
        }

        fn split_page(&self, _index: PageIndex) -> Result<Vec<u8>, PdfError> {
            Ok(Vec::new())
        }
    }

    let err = PayslipProcessor::new()
        .process_document(&Unreadable, |_, _| {})
        .unwrap_err();
    assert!(matches!(err, HoleriteError::EmptyExtraction));
}
