use std::fmt::Write as _;

use super::RenderSink;
use crate::chart::{render_svg, ChartSpec};
use crate::error::RenderError;
use crate::frame::{cell_text, missing_marker, DType, Scalar, Series, Table};

const STYLE: &str = "body{font-family:sans-serif;margin:2em auto;max-width:1100px;color:#222}\
table{border-collapse:collapse;margin:0.5em 0 1.5em}\
th,td{border:1px solid #ccc;padding:4px 10px;text-align:right}\
th{background:#f3f3f3}\
td.label{text-align:left;font-weight:bold}\
td.missing{color:#999}\
figure{margin:1em 0}";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One self-contained HTML page with inline SVG charts.
pub struct HtmlSink {
    title: String,
    body: String,
}

impl HtmlSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
        }
    }

    /// The complete page.
    pub fn finish(self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
            title = escape_html(&self.title),
            style = STYLE,
            body = self.body
        )
    }

    fn cell(&mut self, text: &str, missing: bool) {
        let class = if missing { " class=\"missing\"" } else { "" };
        let _ = write!(self.body, "<td{}>{}</td>", class, escape_html(text));
    }
}

impl RenderSink for HtmlSink {
    fn heading(&mut self, text: &str) -> Result<(), RenderError> {
        let _ = writeln!(self.body, "<h2>{}</h2>", escape_html(text));
        Ok(())
    }

    fn note(&mut self, text: &str) -> Result<(), RenderError> {
        let _ = writeln!(self.body, "<p>{}</p>", escape_html(text));
        Ok(())
    }

    fn rule(&mut self) -> Result<(), RenderError> {
        self.body.push_str("<hr>\n");
        Ok(())
    }

    fn series(&mut self, caption: &str, series: &Series) -> Result<(), RenderError> {
        let _ = writeln!(self.body, "<p>{}</p>", escape_html(caption));
        let _ = write!(
            self.body,
            "<table>\n<tr><th></th><th>{}</th></tr>\n",
            escape_html(series.name())
        );
        for (i, label) in series.index().iter().enumerate() {
            let _ = write!(self.body, "<tr><td class=\"label\">{}</td>", escape_html(&label.to_string()));
            self.cell(&cell_text(series.data(), i), series.data().is_missing(i));
            self.body.push_str("</tr>\n");
        }
        self.body.push_str("</table>\n");
        Ok(())
    }

    fn table(&mut self, caption: &str, table: &Table) -> Result<(), RenderError> {
        let _ = writeln!(self.body, "<p>{}</p>", escape_html(caption));
        self.body.push_str("<table>\n<tr><th></th>");
        for name in table.column_names() {
            let _ = write!(self.body, "<th>{}</th>", escape_html(name));
        }
        self.body.push_str("</tr>\n");
        for (row, label) in table.index().iter().enumerate() {
            let _ = write!(self.body, "<tr><td class=\"label\">{}</td>", escape_html(&label.to_string()));
            let cells: Vec<(String, bool)> = table
                .columns()
                .map(|(_, column)| (cell_text(column, row), column.is_missing(row)))
                .collect();
            for (text, missing) in cells {
                self.cell(&text, missing);
            }
            self.body.push_str("</tr>\n");
        }
        self.body.push_str("</table>\n");
        Ok(())
    }

    fn scalar(&mut self, caption: &str, value: Option<Scalar>) -> Result<(), RenderError> {
        let text = value.map_or_else(|| missing_marker(DType::Float).to_string(), |v| v.to_string());
        let _ = writeln!(
            self.body,
            "<p><strong>{}</strong> {}</p>",
            escape_html(caption),
            escape_html(&text)
        );
        Ok(())
    }

    fn chart(&mut self, spec: &ChartSpec) -> Result<(), RenderError> {
        let svg = render_svg(spec)?;
        let _ = writeln!(
            self.body,
            "<figure>\n{}\n<figcaption>{}</figcaption>\n</figure>",
            svg,
            escape_html(&spec.title)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"R&D\"</b>"), "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;");
        assert_eq!(escape_html("Price ($)"), "Price ($)");
    }

    #[test]
    fn test_page_structure() {
        let mut sink = HtmlSink::new("Report <1>");
        sink.heading("Merge/Join Like SQL").unwrap();
        sink.rule().unwrap();
        let page = sink.finish();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Report &lt;1&gt;</title>"));
        assert!(page.contains("<h2>Merge/Join Like SQL</h2>"));
        assert!(page.contains("<hr>"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_table_marks_missing_cells() {
        let table = Table::from_columns(vec![
            ("CustID", Column::from(vec![1_i64, 4])),
            ("Name", Column::from(vec![Some("Amit".to_string()), None])),
        ])
        .unwrap();
        let mut sink = HtmlSink::new("t");
        sink.table("Outer Merge", &table).unwrap();
        let page = sink.finish();
        assert!(page.contains("<th>CustID</th><th>Name</th>"));
        assert!(page.contains("<td>Amit</td>"));
        assert!(page.contains("<td class=\"missing\">None</td>"));
    }

    #[test]
    fn test_series_and_scalar() {
        let series = Series::with_labels("Sample Data", ["P1", "P2"], vec![Some(25.0), None]).unwrap();
        let mut sink = HtmlSink::new("t");
        sink.series("Original Data with Missing Values:", &series).unwrap();
        sink.scalar("Average Score:", Some(Scalar::Float(53.6))).unwrap();
        let page = sink.finish();
        assert!(page.contains("<td class=\"label\">P1</td><td>25.0</td>"));
        assert!(page.contains("<td class=\"missing\">NaN</td>"));
        assert!(page.contains("<strong>Average Score:</strong> 53.6"));
    }

    #[test]
    fn test_chart_is_inlined() {
        let spec = ChartSpec::bar("Average Sales by Region").data(vec!["East".into()], vec![Some(343.75)]);
        let mut sink = HtmlSink::new("t");
        sink.chart(&spec).unwrap();
        let page = sink.finish();
        assert!(page.contains("<figure>"));
        assert!(page.contains("<svg"));
        assert!(page.contains("<figcaption>Average Sales by Region</figcaption>"));
    }
}
