/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Document model over the main document part.
//!
//! Only the parts of WordprocessingML that placeholder substitution and
//! line emission need are modelled: body paragraphs, body tables, their rows
//! and cells, and runs. The views in this module borrow directly from the
//! underlying [`XmlElement`] tree, so there is nothing to keep in sync.

use std::path::Path;

use tracing::debug;

use crate::error::{DocxError, Result};
use crate::package::{DEFAULT_DOCUMENT_PART, Package};
use crate::xml::{self, XmlChild, XmlDocument, XmlElement};

const WORDPROCESSINGML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A WordprocessingML document held in memory together with its package.
#[derive(Debug, Clone)]
pub struct Document {
    package: Package,
    part_name: String,
    xml: XmlDocument,
}

impl Document {
    /// Create an empty A4 document with a single section and no paragraphs.
    pub fn new() -> Self {
        Self {
            package: Package::blank_document(),
            part_name: DEFAULT_DOCUMENT_PART.to_string(),
            xml: XmlDocument::new(blank_document_element()),
        }
    }

    /// Open a `.docx` file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_package(Package::open(path)?)
    }

    /// Interpret an already loaded package.
    pub fn from_package(package: Package) -> Result<Self> {
        let part_name = package.main_document_name()?;
        let content = package.part_text(&part_name)?;
        let xml = xml::parse(&content)?;
        let document = Self {
            package,
            part_name,
            xml,
        };
        document.validate()?;
        Ok(document)
    }

    /// Build a document from the XML of a main document part, wrapped in a
    /// minimal package.
    pub fn from_xml(content: &str) -> Result<Self> {
        let document = Self {
            package: Package::blank_document(),
            part_name: DEFAULT_DOCUMENT_PART.to_string(),
            xml: xml::parse(content)?,
        };
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<()> {
        if !self.xml.root.is("document") {
            return Err(DocxError::InvalidStructure(format!(
                "expected <w:document> root in '{}', found <{}>",
                self.part_name,
                self.xml.root.qualified_name()
            )));
        }
        if self.body().is_none() {
            return Err(DocxError::InvalidStructure(format!(
                "'{}' has no <w:body>",
                self.part_name
            )));
        }
        Ok(())
    }

    /// Serialize the document part back into the package and write the
    /// package to `path`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = xml::write(&self.xml)?;
        self.package.set_part(&self.part_name, bytes);
        self.package.save(path)
    }

    /// The root `w:document` element.
    pub fn root(&self) -> &XmlElement {
        &self.xml.root
    }

    fn body(&self) -> Option<&XmlElement> {
        self.xml.root.child("body")
    }

    fn body_mut(&mut self) -> Result<&mut XmlElement> {
        self.xml
            .root
            .child_mut("body")
            .ok_or_else(|| DocxError::InvalidStructure("document has no <w:body>".to_string()))
    }

    /// Body-level paragraphs in document order. Paragraphs inside tables are
    /// reached through [`Document::tables`].
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph<'_>> {
        self.body()
            .into_iter()
            .flat_map(|body| body.children_named("p"))
            .map(Paragraph::new)
    }

    /// Body-level tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = Table<'_>> {
        self.body()
            .into_iter()
            .flat_map(|body| body.children_named("tbl"))
            .map(|element| Table { element })
    }

    /// Every paragraph substitution visits: body-level paragraphs first,
    /// then the paragraphs of each cell of each body-level table.
    pub fn paragraphs_mut(&mut self) -> Vec<ParagraphMut<'_>> {
        let Some(body) = self.xml.root.child_mut("body") else {
            return Vec::new();
        };

        let mut top_level = Vec::new();
        let mut in_tables = Vec::new();
        for element in body.elements_mut() {
            if element.is("p") {
                top_level.push(ParagraphMut { element });
            } else if element.is("tbl") {
                in_tables.extend(
                    element
                        .elements_mut()
                        .filter(|e| e.is("tr"))
                        .flat_map(|row| row.elements_mut().filter(|e| e.is("tc")))
                        .flat_map(|cell| cell.elements_mut().filter(|e| e.is("p")))
                        .map(|element| ParagraphMut { element }),
                );
            }
        }

        top_level.extend(in_tables);
        top_level
    }

    /// Append a default-styled paragraph. Empty text produces a paragraph
    /// with no runs.
    pub fn add_paragraph(&mut self, text: &str) -> Result<()> {
        let body = self.body_mut()?;
        let prefix = body.prefix.clone();
        let mut paragraph = XmlElement::with_prefix(prefix.as_deref(), "p");
        if !text.is_empty() {
            paragraph.push_element(build_run(prefix.as_deref(), text));
        }
        insert_block(body, paragraph);
        Ok(())
    }

    /// Append a table with one row per entry of `rows`. Each cell holds a
    /// single paragraph with the given text.
    pub fn add_table(&mut self, rows: &[Vec<String>]) -> Result<()> {
        let body = self.body_mut()?;
        let prefix = body.prefix.clone();
        let p = prefix.as_deref();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

        let w = |local: &str| XmlElement::with_prefix(p, local);
        let qualified = |local: &str| match p {
            Some(p) => format!("{}:{}", p, local),
            None => local.to_string(),
        };

        let properties = w("tblPr")
            .child_element(w("tblStyle").attr(&qualified("val"), "TableGrid"))
            .child_element(
                w("tblW")
                    .attr(&qualified("w"), "0")
                    .attr(&qualified("type"), "auto"),
            );

        let mut grid = w("tblGrid");
        for _ in 0..columns {
            grid.push_element(w("gridCol"));
        }

        let mut table = w("tbl").child_element(properties).child_element(grid);
        for row in rows {
            let mut tr = w("tr");
            for text in row {
                let mut paragraph = w("p");
                if !text.is_empty() {
                    paragraph.push_element(build_run(p, text));
                }
                tr.push_element(w("tc").child_element(paragraph));
            }
            table.push_element(tr);
        }

        insert_block(body, table);
        debug!(rows = rows.len(), columns, "Added table");
        Ok(())
    }

    /// Plain text of the body: one line per body-level paragraph.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert a block-level element before the trailing section properties.
fn insert_block(body: &mut XmlElement, element: XmlElement) {
    let section = body
        .children
        .iter()
        .rposition(|c| matches!(c, XmlChild::Element(e) if e.is("sectPr")));
    match section {
        Some(index) => body.children.insert(index, XmlChild::Element(element)),
        None => body.push_element(element),
    }
}

fn blank_document_element() -> XmlElement {
    let section = XmlElement::new("w:sectPr")
        .child_element(
            XmlElement::new("w:pgSz")
                .attr("w:w", "11906")
                .attr("w:h", "16838"),
        )
        .child_element(
            XmlElement::new("w:pgMar")
                .attr("w:top", "1440")
                .attr("w:right", "1440")
                .attr("w:bottom", "1440")
                .attr("w:left", "1440")
                .attr("w:header", "708")
                .attr("w:footer", "708")
                .attr("w:gutter", "0"),
        );

    XmlElement::new("w:document")
        .attr("xmlns:w", WORDPROCESSINGML_NS)
        .attr("xmlns:r", RELATIONSHIPS_NS)
        .child_element(XmlElement::new("w:body").child_element(section))
}

/// Build a run for `text`, mapping tabs to `w:tab` and line breaks to `w:br`.
fn build_run(prefix: Option<&str>, text: &str) -> XmlElement {
    let mut run = XmlElement::with_prefix(prefix, "r");
    let mut buffer = String::new();

    for ch in text.chars() {
        match ch {
            '\t' | '\n' | '\r' => {
                flush_text(&mut run, prefix, &mut buffer);
                let local = if ch == '\t' { "tab" } else { "br" };
                run.push_element(XmlElement::with_prefix(prefix, local));
            }
            _ => buffer.push(ch),
        }
    }
    flush_text(&mut run, prefix, &mut buffer);
    run
}

fn flush_text(run: &mut XmlElement, prefix: Option<&str>, buffer: &mut String) {
    if buffer.is_empty() {
        return;
    }
    let mut t = XmlElement::with_prefix(prefix, "t");
    set_text_node(&mut t, buffer);
    run.push_element(t);
    buffer.clear();
}

/// Set the text of a `w:t`, marking it space-preserving when it has
/// leading or trailing whitespace.
pub(crate) fn set_text_node(t: &mut XmlElement, text: &str) {
    if text.trim().len() < text.len() {
        t.set_attribute("xml:space", "preserve");
    }
    t.set_text(text);
}

fn run_text(run: &XmlElement) -> String {
    let mut text = String::new();
    for element in run.elements() {
        if element.is("t") {
            text.push_str(&element.text());
        } else if let Some(fixed) = fixed_text(element) {
            text.push_str(fixed);
        }
    }
    text
}

/// Text contributed by run content other than `w:t`.
fn fixed_text(element: &XmlElement) -> Option<&'static str> {
    match element.name.as_str() {
        "tab" => Some("\t"),
        "br" => match element.get_attribute("type") {
            None | Some("textWrapping") => Some("\n"),
            Some(_) => Some(""),
        },
        "cr" => Some("\n"),
        "noBreakHyphen" => Some("-"),
        _ => None,
    }
}

/// Run content in reading order: editable `w:t` nodes and the fixed text of
/// tabs, breaks and hyphens between them.
#[derive(Debug)]
pub(crate) enum RunContent<'a> {
    Text(&'a mut XmlElement),
    Fixed(&'static str),
}

fn push_run_content<'a>(run: &'a mut XmlElement, content: &mut Vec<RunContent<'a>>) {
    for element in run.elements_mut() {
        if element.is("t") {
            content.push(RunContent::Text(element));
        } else if let Some(fixed) = fixed_text(element) {
            content.push(RunContent::Fixed(fixed));
        }
    }
}

/// Runs of a paragraph, including those nested in hyperlinks.
fn paragraph_runs(paragraph: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    paragraph.elements().flat_map(|child| {
        let linked = child
            .is("hyperlink")
            .then(|| child.children_named("r"))
            .into_iter()
            .flatten();
        std::iter::once(child).filter(|c| c.is("r")).chain(linked)
    })
}

fn paragraph_text(paragraph: &XmlElement) -> String {
    paragraph_runs(paragraph).map(run_text).collect()
}

fn paragraph_style(paragraph: &XmlElement) -> Option<&str> {
    paragraph
        .child("pPr")?
        .child("pStyle")?
        .get_attribute("val")
}

/// Read-only view of a `w:p`.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    element: &'a XmlElement,
}

impl<'a> Paragraph<'a> {
    fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Text of the paragraph's runs, with tabs and breaks as `\t` and `\n`.
    pub fn text(&self) -> String {
        paragraph_text(self.element)
    }

    /// The paragraph style id, if one is set.
    pub fn style(&self) -> Option<&'a str> {
        paragraph_style(self.element)
    }

    pub fn runs(self) -> impl Iterator<Item = Run<'a>> {
        paragraph_runs(self.element).map(|element| Run { element })
    }

    pub fn element(&self) -> &'a XmlElement {
        self.element
    }
}

/// Mutable view of a `w:p`.
#[derive(Debug)]
pub struct ParagraphMut<'a> {
    element: &'a mut XmlElement,
}

impl ParagraphMut<'_> {
    pub fn text(&self) -> String {
        paragraph_text(self.element)
    }

    pub fn as_paragraph(&self) -> Paragraph<'_> {
        Paragraph::new(self.element)
    }

    /// Replace the paragraph content with a single unformatted run.
    ///
    /// Paragraph properties (`w:pPr`) are kept; every other child, including
    /// run formatting, hyperlinks and bookmarks, is dropped.
    pub fn set_text(&mut self, text: &str) {
        let prefix = self.element.prefix.clone();
        self.element
            .children
            .retain(|c| matches!(c, XmlChild::Element(e) if e.is("pPr")));
        self.element.push_element(build_run(prefix.as_deref(), text));
    }

    /// Content of the paragraph's runs, including hyperlinked runs, in order.
    pub(crate) fn run_content_mut(&mut self) -> Vec<RunContent<'_>> {
        let mut content = Vec::new();
        for child in self.element.elements_mut() {
            if child.is("r") {
                push_run_content(child, &mut content);
            } else if child.is("hyperlink") {
                for run in child.elements_mut().filter(|e| e.is("r")) {
                    push_run_content(run, &mut content);
                }
            }
        }
        content
    }
}

/// Read-only view of a `w:r`.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    element: &'a XmlElement,
}

impl<'a> Run<'a> {
    pub fn text(&self) -> String {
        run_text(self.element)
    }

    /// Run properties (`w:rPr`), if any.
    pub fn properties(&self) -> Option<&'a XmlElement> {
        self.element.child("rPr")
    }

    pub fn is_bold(&self) -> bool {
        self.toggle("b")
    }

    pub fn is_italic(&self) -> bool {
        self.toggle("i")
    }

    fn toggle(&self, local_name: &str) -> bool {
        self.properties()
            .and_then(|props| props.child(local_name))
            .is_some_and(|flag| !matches!(flag.get_attribute("val"), Some("0" | "false" | "off")))
    }
}

/// Read-only view of a `w:tbl`.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    element: &'a XmlElement,
}

impl<'a> Table<'a> {
    pub fn rows(self) -> impl Iterator<Item = Row<'a>> {
        self.element
            .children_named("tr")
            .map(|element| Row { element })
    }

    /// Cell at `row`, `column`, counting physical `w:tc` elements.
    pub fn cell(self, row: usize, column: usize) -> Option<Cell<'a>> {
        self.rows().nth(row)?.cells().nth(column)
    }
}

/// Read-only view of a `w:tr`.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    element: &'a XmlElement,
}

impl<'a> Row<'a> {
    pub fn cells(self) -> impl Iterator<Item = Cell<'a>> {
        self.element
            .children_named("tc")
            .map(|element| Cell { element })
    }
}

/// Read-only view of a `w:tc`.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    element: &'a XmlElement,
}

impl<'a> Cell<'a> {
    pub fn paragraphs(self) -> impl Iterator<Item = Paragraph<'a>> {
        self.element.children_named("p").map(Paragraph::new)
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(body: &str) -> Document {
        Document::from_xml(&format!(
            r#"<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
            WORDPROCESSINGML_NS, body
        ))
        .unwrap()
    }

    #[test]
    fn test_paragraph_text_joins_runs() {
        let doc = doc(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Dear </w:t></w:r><w:r><w:t>{{name}}</w:t><w:tab/><w:t>x</w:t></w:r></w:p>"#,
        );
        let paragraphs: Vec<String> = doc.paragraphs().map(|p| p.text()).collect();
        assert_eq!(paragraphs, vec!["Dear {{name}}\tx".to_string()]);
    }

    #[test]
    fn test_paragraph_text_includes_hyperlinks_and_breaks() {
        let doc = doc(
            r#"<w:p><w:r><w:t>a</w:t><w:br/></w:r><w:hyperlink><w:r><w:t>b</w:t></w:r></w:hyperlink><w:r><w:br w:type="page"/><w:t>c</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.paragraphs().next().unwrap().text(), "a\nbc");
    }

    #[test]
    fn test_run_formatting_flags() {
        let doc = doc(
            r#"<w:p><w:r><w:rPr><w:b/><w:i w:val="0"/></w:rPr><w:t>x</w:t></w:r></w:p>"#,
        );
        let run = doc.paragraphs().next().unwrap().runs().next().unwrap();
        assert!(run.is_bold());
        assert!(!run.is_italic());
    }

    #[test]
    fn test_paragraph_style() {
        let doc = doc(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr></w:p><w:p/>"#);
        let styles: Vec<Option<&str>> = doc.paragraphs().map(|p| p.style()).collect();
        assert_eq!(styles, vec![Some("Heading1"), None]);
    }

    #[test]
    fn test_set_text_keeps_only_paragraph_properties() {
        let mut doc = doc(
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:bookmarkStart w:id="0"/><w:r><w:rPr><w:b/></w:rPr><w:t>old</w:t></w:r></w:p>"#,
        );
        {
            let mut paragraphs = doc.paragraphs_mut();
            paragraphs[0].set_text(" new\tline\nend");
        }

        let body = doc.root().child("body").unwrap();
        insta::assert_snapshot!(
            xml::write_element(body).unwrap(),
            @r#"<w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t xml:space="preserve"> new</w:t><w:tab/><w:t>line</w:t><w:br/><w:t>end</w:t></w:r></w:p></w:body>"#
        );
    }

    #[test]
    fn test_paragraphs_mut_visits_body_before_tables() {
        let mut doc = doc(
            r#"<w:p><w:r><w:t>one</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>two</w:t></w:r></w:p>"#,
        );
        let order: Vec<String> = doc.paragraphs_mut().iter().map(|p| p.text()).collect();
        assert_eq!(order, vec!["one", "two", "cell"]);
    }

    #[test]
    fn test_add_paragraph_before_section_properties() {
        let mut doc = Document::new();
        doc.add_paragraph("Hello").unwrap();
        doc.add_paragraph("").unwrap();

        let body = doc.root().child("body").unwrap();
        let names: Vec<&str> = body.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["p", "p", "sectPr"]);
        assert_eq!(doc.text(), "Hello\n");
        assert!(body.elements().nth(1).unwrap().children.is_empty());
    }

    #[test]
    fn test_add_table_cells() {
        let mut doc = Document::new();
        doc.add_table(&[
            vec!["Item".to_string(), "Price".to_string()],
            vec!["{{item}}".to_string(), "{{ price }}".to_string()],
        ])
        .unwrap();

        let table = doc.tables().next().unwrap();
        assert_eq!(table.rows().count(), 2);
        assert_eq!(table.cell(1, 1).unwrap().text(), "{{ price }}");
        assert!(table.cell(2, 0).is_none());
    }

    #[test]
    fn test_rejects_missing_body() {
        let result = Document::from_xml(r#"<w:document xmlns:w="urn:w"/>"#);
        assert!(matches!(result, Err(DocxError::InvalidStructure(_))));
    }

    #[test]
    fn test_rejects_wrong_root() {
        let result = Document::from_xml("<w:body/>");
        assert!(matches!(result, Err(DocxError::InvalidStructure(_))));
    }
}
