//! Cleanup of raw text coming out of PDF extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLANK_RUN: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref TAB_RUN: Regex = Regex::new(r"\t+").unwrap();
    static ref SPACE_RUN: Regex = Regex::new(r" {2,}").unwrap();
}

/// Normalize whitespace noise in extracted report text.
///
/// Line endings are unified to `\n`, runs of 3+ newlines collapse to one
/// blank line, tab runs become a single space, and space runs a single
/// space. Total on any input; empty in, empty out.
pub fn clean_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = BLANK_RUN.replace_all(&unified, "\n\n");
    let no_tabs = TAB_RUN.replace_all(&collapsed, " ");
    let no_runs = SPACE_RUN.replace_all(&no_tabs, " ");
    no_runs.trim().to_string()
}
