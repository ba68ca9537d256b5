//! Subset of the slide document tree needed to find text.
//!
//! Field names follow the presentation store's JSON so the same types can be
//! deserialized straight from `presentations.get`.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(default)]
    pub presentation_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slides: Vec<Page>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub object_id: String,
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    #[serde(default)]
    pub object_id: String,
    pub shape: Option<Shape>,
    pub table: Option<Table>,
    pub element_group: Option<ElementGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Shape {
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableCell {
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ElementGroup {
    #[serde(default)]
    pub children: Vec<PageElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

impl TextContent {
    pub fn from_runs<S: Into<String>>(runs: impl IntoIterator<Item = S>) -> Self {
        Self {
            text_elements: runs
                .into_iter()
                .map(|content| TextElement {
                    text_run: Some(TextRun {
                        content: content.into(),
                    }),
                })
                .collect(),
        }
    }

    /// Text of all runs joined, which is what a replace instruction matches against.
    pub fn plain_text(&self) -> String {
        self.text_elements
            .iter()
            .filter_map(|element| element.text_run.as_ref())
            .map(|run| run.content.as_str())
            .collect()
    }

    pub fn runs(&self) -> impl Iterator<Item = &str> {
        self.text_elements
            .iter()
            .filter_map(|element| element.text_run.as_ref())
            .map(|run| run.content.as_str())
    }
}

impl PageElement {
    pub fn shape_with_text(object_id: &str, text: TextContent) -> Self {
        Self {
            object_id: object_id.to_string(),
            shape: Some(Shape { text: Some(text) }),
            ..Self::default()
        }
    }

    fn visit_text<'a>(&'a self, out: &mut Vec<&'a TextContent>) {
        if let Some(text) = self.shape.as_ref().and_then(|shape| shape.text.as_ref()) {
            out.push(text);
        }
        if let Some(table) = &self.table {
            for row in &table.table_rows {
                out.extend(row.table_cells.iter().filter_map(|cell| cell.text.as_ref()));
            }
        }
        if let Some(group) = &self.element_group {
            for child in &group.children {
                child.visit_text(out);
            }
        }
    }

    fn visit_text_mut<'a>(&'a mut self, out: &mut Vec<&'a mut TextContent>) {
        if let Some(text) = self.shape.as_mut().and_then(|shape| shape.text.as_mut()) {
            out.push(text);
        }
        if let Some(table) = &mut self.table {
            for row in &mut table.table_rows {
                out.extend(
                    row.table_cells
                        .iter_mut()
                        .filter_map(|cell| cell.text.as_mut()),
                );
            }
        }
        if let Some(group) = &mut self.element_group {
            for child in &mut group.children {
                child.visit_text_mut(out);
            }
        }
    }
}

impl Presentation {
    /// Every text body on every slide: shapes, table cells and grouped elements.
    pub fn text_bodies(&self) -> Vec<&TextContent> {
        let mut out = Vec::new();
        for page in &self.slides {
            for element in &page.page_elements {
                element.visit_text(&mut out);
            }
        }
        out
    }

    pub fn text_bodies_mut(&mut self) -> Vec<&mut TextContent> {
        let mut out = Vec::new();
        for page in &mut self.slides {
            for element in &mut page.page_elements {
                element.visit_text_mut(&mut out);
            }
        }
        out
    }

    pub fn count_occurrences(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        self.text_bodies()
            .iter()
            .map(|text| text.plain_text().matches(needle).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "presentationId": "deck-1",
        "title": "Employee_Presentation",
        "slides": [{
            "objectId": "p1",
            "pageElements": [
                {"objectId": "title", "shape": {"text": {"textElements": [
                    {"paragraphMarker": {}},
                    {"textRun": {"content": "[Placeholder for Name]\n"}}
                ]}}},
                {"objectId": "image", "image": {"contentUrl": "x"}},
                {"objectId": "grid", "table": {"rows": 1, "tableRows": [{"tableCells": [
                    {"text": {"textElements": [{"textRun": {"content": "[Placeholder for ID]"}}]}},
                    {"text": {"textElements": [{"textRun": {"content": "Age: [Placeholder for Age]"}}]}}
                ]}]}},
                {"objectId": "group", "elementGroup": {"children": [
                    {"objectId": "inner", "shape": {"text": {"textElements": [
                        {"textRun": {"content": "[Placeholder "}},
                        {"textRun": {"content": "for Country]"}}
                    ]}}}
                ]}}
            ]
        }]
    }"#;

    #[test]
    fn parses_store_json_and_walks_all_text() {
        let presentation: Presentation =
            serde_json::from_str(SAMPLE).expect("sample should deserialize");

        assert_eq!(presentation.presentation_id, "deck-1");
        assert_eq!(presentation.text_bodies().len(), 4);
    }

    #[test]
    fn counts_tokens_across_runs_and_nested_elements() {
        let presentation: Presentation =
            serde_json::from_str(SAMPLE).expect("sample should deserialize");

        assert_eq!(presentation.count_occurrences("[Placeholder for Name]"), 1);
        assert_eq!(presentation.count_occurrences("[Placeholder for ID]"), 1);
        assert_eq!(presentation.count_occurrences("[Placeholder for Age]"), 1);
        assert_eq!(presentation.count_occurrences("[Placeholder for Country]"), 1);
        assert_eq!(presentation.count_occurrences("[Placeholder for Occupation]"), 0);
        assert_eq!(presentation.count_occurrences(""), 0);
    }

    #[test]
    fn plain_text_skips_non_run_elements() {
        let text = TextContent {
            text_elements: vec![
                TextElement { text_run: None },
                TextElement {
                    text_run: Some(TextRun {
                        content: "hello".to_string(),
                    }),
                },
            ],
        };

        assert_eq!(text.plain_text(), "hello");
    }
}
