// src/fetch/tables.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::process::raw_table::{Cell, RawRow, RawTable};

static TABBER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.tabber").expect("tabber selector should parse"));
static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector should parse"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("row selector should parse"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Extract the first table of each `div.tabber` section, in document order.
/// A section without a table yields `None`. At most `max_sections` are
/// returned; whether enough were found is for the caller to judge.
pub fn parse_tables(markup: &str, max_sections: usize) -> Vec<Option<RawTable>> {
    let doc = Html::parse_document(markup);
    let mut tables = Vec::new();

    for (idx, section) in doc.select(&TABBER).take(max_sections).enumerate() {
        match section.select(&TABLE).next() {
            Some(table) => {
                let raw = parse_table(table);
                debug!(
                    section = idx,
                    columns = raw.labels.len(),
                    rows = raw.rows.len(),
                    "parsed table"
                );
                tables.push(Some(raw));
            }
            None => {
                warn!(section = idx, "tabber section has no table");
                tables.push(None);
            }
        }
    }

    tables
}

fn parse_table(table: ElementRef<'_>) -> RawTable {
    let mut labels: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for tr in table.select(&ROW).filter(|tr| owned_by(tr, &table)) {
        let cells: Vec<ElementRef<'_>> = tr.children().filter_map(ElementRef::wrap).collect();
        let is_header = !cells.is_empty() && cells.iter().all(|c| c.value().name() == "th");

        if is_header && labels.is_none() {
            labels = Some(header_labels(&expand(&cells)));
            continue;
        }
        if !cells.iter().any(|c| c.value().name() == "td") {
            trace!("skipping row without data cells");
            continue;
        }

        let texts = expand(&cells);
        let labels = labels.get_or_insert_with(|| header_labels(&vec![String::new(); texts.len()]));
        let row: RawRow = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cell = texts.get(i).map(|t| Cell::infer(t)).unwrap_or(Cell::Empty);
                (label.clone(), cell)
            })
            .collect();
        rows.push(row);
    }

    RawTable {
        labels: labels.unwrap_or_default(),
        rows,
    }
}

/// True if `tr` belongs to `table` itself rather than to a table nested inside it.
fn owned_by(tr: &ElementRef<'_>, table: &ElementRef<'_>) -> bool {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "table")
        .map_or(false, |owner| owner.id() == table.id())
}

/// Cleaned cell texts, repeating `colspan` cells so indices stay positional.
fn expand(cells: &[ElementRef<'_>]) -> Vec<String> {
    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        let text = clean_text(&cell.text().collect::<String>());
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1);
        out.extend(std::iter::repeat(text).take(span));
    }
    out
}

/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ...
fn header_labels(texts: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let base = if text.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                text.clone()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let label = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            label
        })
        .collect()
}

/// Collapse runs of whitespace (including `&nbsp;`) and trim.
pub fn clean_text(raw: &str) -> String {
    let raw = raw.replace('\u{a0}', " ");
    WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}
