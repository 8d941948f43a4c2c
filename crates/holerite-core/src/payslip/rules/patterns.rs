//! Regex patterns for Brazilian payslip (holerite) fields.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Employee name: the rest of the line after the label, or the next line
    // when the label stands alone.
    pub static ref EMPLOYEE_NAME: Regex = Regex::new(
        r"(?i)Nome do (?:Colaborador|Funcion[aá]rio)\s*\n?([^\n\r]+)"
    ).unwrap();

    // CPF (Brazilian individual tax ID) as printed, punctuation included.
    pub static ref CPF_LABELED: Regex = Regex::new(
        r"(?i)CPF:\s*([\d.\-]+)"
    ).unwrap();

    // Net pay in Brazilian format (1.234,56).
    pub static ref NET_PAY: Regex = Regex::new(
        r"(?i)SAL[ÁA]RIO L[ÍI]QUIDO\s*R\$\s*([\d.,]+)"
    ).unwrap();
}
