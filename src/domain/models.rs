use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};
use super::markup::escape_html;

pub const POLL_FORM_ID: &str = "poll-form";
pub const RESPONSE_FIELD_ID: &str = "response";
pub const OUTPUT_ELEMENT_ID: &str = "output";

pub const CALC_FORM_ID: &str = "calc-form";
pub const EXPRESSION_FIELD_ID: &str = "expression";
pub const CALC_RESULT_ELEMENT_ID: &str = "calc-result";

/// The two forms on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Poll,
    Calc,
}

impl FormKind {
    pub fn form_id(self) -> &'static str {
        match self {
            FormKind::Poll => POLL_FORM_ID,
            FormKind::Calc => CALC_FORM_ID,
        }
    }

    pub fn field_id(self) -> &'static str {
        match self {
            FormKind::Poll => RESPONSE_FIELD_ID,
            FormKind::Calc => EXPRESSION_FIELD_ID,
        }
    }

    pub fn output_id(self) -> &'static str {
        match self {
            FormKind::Poll => OUTPUT_ELEMENT_ID,
            FormKind::Calc => CALC_RESULT_ELEMENT_ID,
        }
    }

    pub fn other(self) -> Self {
        match self {
            FormKind::Poll => FormKind::Calc,
            FormKind::Calc => FormKind::Poll,
        }
    }
}

/// Page state: the last submitted field values and the text content of each
/// output element.
///
/// Element content is plain text. There is no way to store markup in a
/// `Page`; [`Page::render_html`] escapes everything it emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub response: String,
    pub expression: String,
    elements: BTreeMap<String, String>,
}

impl Default for Page {
    fn default() -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(OUTPUT_ELEMENT_ID.to_string(), String::new());
        elements.insert(CALC_RESULT_ELEMENT_ID.to_string(), String::new());

        Self {
            response: String::new(),
            expression: String::new(),
            elements,
        }
    }
}

impl Page {
    /// Replaces the text content of an element.
    pub fn set_text_content(&mut self, element_id: &str, text: &str) -> DomainResult<()> {
        match self.elements.get_mut(element_id) {
            Some(content) => {
                content.clear();
                content.push_str(text);
                Ok(())
            }
            None => Err(DomainError::UnknownElement(element_id.to_string())),
        }
    }

    pub fn text_content(&self, element_id: &str) -> DomainResult<&str> {
        self.elements
            .get(element_id)
            .map(String::as_str)
            .ok_or_else(|| DomainError::UnknownElement(element_id.to_string()))
    }

    pub fn field_value(&self, form: FormKind) -> &str {
        match form {
            FormKind::Poll => &self.response,
            FormKind::Calc => &self.expression,
        }
    }

    pub fn set_field_value(&mut self, form: FormKind, value: &str) {
        let field = match form {
            FormKind::Poll => &mut self.response,
            FormKind::Calc => &mut self.expression,
        };
        field.clear();
        field.push_str(value);
    }

    /// Brings a deserialized page back to the required shape.
    ///
    /// Snapshots may come from anywhere, so unknown elements are dropped and
    /// missing ones are recreated empty.
    pub fn normalize(mut self) -> Self {
        let mut elements = BTreeMap::new();
        for id in [OUTPUT_ELEMENT_ID, CALC_RESULT_ELEMENT_ID] {
            let content = self.elements.remove(id).unwrap_or_default();
            elements.insert(id.to_string(), content);
        }
        self.elements = elements;
        self
    }

    /// Renders the page as a standalone HTML document.
    pub fn render_html(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n<title>pollcalc</title>\n</head>\n<body>\n");

        for form in [FormKind::Poll, FormKind::Calc] {
            html.push_str(&format!(
                "<form id=\"{}\">\n  <input type=\"text\" id=\"{}\" name=\"{}\" value=\"{}\">\n  <button type=\"submit\">Submit</button>\n</form>\n",
                form.form_id(),
                form.field_id(),
                form.field_id(),
                escape_html(self.field_value(form)),
            ));
            html.push_str(&format!(
                "<div id=\"{}\">{}</div>\n",
                form.output_id(),
                escape_html(self.elements.get(form.output_id()).map(String::as_str).unwrap_or_default()),
            ));
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}
