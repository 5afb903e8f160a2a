//! End-to-end document conversion through a recording sink.

use longan::document::{Alignment, DocumentSink, ListStyle, convert_document};
use longan::inline::Inline;
use longan::{ConvertOptions, Result};

/// Records one formatted line per sink call, in call order.
#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
}

fn text_of(runs: &[Inline]) -> String {
    let mut out = String::new();
    for entry in runs {
        match entry {
            Inline::Run(run) => out.push_str(&run.text),
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}

impl DocumentSink for RecordingSink {
    fn add_heading(&mut self, level: u8, runs: &[Inline]) -> Result<()> {
        self.events.push(format!("heading{level}:{}", text_of(runs)));
        Ok(())
    }

    fn add_paragraph(&mut self, runs: &[Inline], alignment: Option<Alignment>) -> Result<()> {
        match alignment {
            Some(alignment) => self
                .events
                .push(format!("paragraph({alignment:?}):{}", text_of(runs))),
            None => self.events.push(format!("paragraph:{}", text_of(runs))),
        }
        Ok(())
    }

    fn add_list_item(&mut self, style: ListStyle, runs: &[Inline]) -> Result<()> {
        self.events
            .push(format!("item({}):{}", style.name(), text_of(runs)));
        Ok(())
    }

    fn add_table(&mut self, grid: &[Vec<String>]) -> Result<()> {
        self.events.push(format!(
            "table:{}",
            grid.iter()
                .map(|row| row.join(","))
                .collect::<Vec<_>>()
                .join(";")
        ));
        Ok(())
    }

    fn add_image(&mut self, url: &str, alt: &str) -> Result<()> {
        self.events.push(format!("image:{alt}:{url}"));
        Ok(())
    }

    fn add_page_break(&mut self) -> Result<()> {
        self.events.push("pagebreak".into());
        Ok(())
    }

    fn add_horizontal_rule(&mut self) -> Result<()> {
        self.events.push("rule".into());
        Ok(())
    }
}

fn convert(markdown: &str) -> Vec<String> {
    let mut sink = RecordingSink::default();
    convert_document(markdown, &mut sink, &ConvertOptions::default()).unwrap();
    sink.events
}

#[test]
fn full_report_document() {
    let markdown = "\
# Quarterly Report

Revenue was **up** this quarter.

## Highlights

- Growth in ~~legacy~~ core products
- New *regional* partners
   1. North
   2. South

| Region | Revenue |
|--------|---------|
| North  | 1000    |
| South  | 1200    |

---

> Figures are preliminary.

![chart](https://example.com/chart.png)
";
    let events = convert(markdown);
    assert_eq!(
        events,
        vec![
            "heading1:Quarterly Report",
            "paragraph:Revenue was up this quarter.",
            "heading2:Highlights",
            "item(List Bullet):Growth in legacy core products",
            "item(List Bullet):New regional partners",
            "item(List Number 2):North",
            "item(List Number 2):South",
            "table:Region,Revenue;North,1000;South,1200",
            "pagebreak",
            "paragraph:Figures are preliminary.",
            "image:chart:https://example.com/chart.png",
        ]
    );
}

#[test]
fn formatting_survives_into_runs() {
    let markdown = "Deploy with [the guide](https://example.com/guide) and `make all`.";
    let mut sink = Vec::new();
    struct Capture<'a>(&'a mut Vec<Inline>);
    impl DocumentSink for Capture<'_> {
        fn add_heading(&mut self, _: u8, _: &[Inline]) -> Result<()> {
            Ok(())
        }
        fn add_paragraph(&mut self, runs: &[Inline], _: Option<Alignment>) -> Result<()> {
            self.0.extend_from_slice(runs);
            Ok(())
        }
        fn add_list_item(&mut self, _: ListStyle, _: &[Inline]) -> Result<()> {
            Ok(())
        }
        fn add_table(&mut self, _: &[Vec<String>]) -> Result<()> {
            Ok(())
        }
        fn add_image(&mut self, _: &str, _: &str) -> Result<()> {
            Ok(())
        }
        fn add_page_break(&mut self) -> Result<()> {
            Ok(())
        }
        fn add_horizontal_rule(&mut self) -> Result<()> {
            Ok(())
        }
    }
    convert_document(markdown, &mut Capture(&mut sink), &ConvertOptions::default()).unwrap();

    let link = sink
        .iter()
        .filter_map(Inline::as_run)
        .find(|run| run.link_url.is_some())
        .expect("link run");
    assert_eq!(link.text, "the guide");
    assert_eq!(link.link_url.as_deref(), Some("https://example.com/guide"));

    let code = sink
        .iter()
        .filter_map(Inline::as_run)
        .find(|run| run.code)
        .expect("code run");
    assert_eq!(code.text, "make all");
}

#[test]
fn aligned_region_and_soft_breaks() {
    let markdown = "\
<div align=\"center\">
First line
Second line
</div>

broken  \nline
";
    let events = convert(markdown);
    assert_eq!(
        events,
        vec![
            "paragraph(Center):First line",
            "paragraph(Center):Second line",
            "paragraph:broken\nline",
        ]
    );
}

#[test]
fn malformed_blocks_degrade_without_aborting() {
    // A single pipe-bounded line is not a table; it must still come through
    // as text, and the following block must be unaffected.
    let events = convert("| stray |\n\n# After");
    assert_eq!(events, vec!["paragraph:| stray |", "heading1:After"]);
}
