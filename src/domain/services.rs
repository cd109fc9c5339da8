//! Form submission handlers.
//!
//! Each handler takes the submitted field value, records it on the [`Page`]
//! and writes its output as element text content.

use tracing::{debug, info, warn};

use super::errors::EvalResult;
use super::models::{FormKind, Page, CALC_RESULT_ELEMENT_ID, OUTPUT_ELEMENT_ID};
use super::parser::{ExpressionEvaluator, Parser};

/// Prefix shown in front of an echoed poll response.
pub const MESSAGE_PREFIX: &str = "You said: ";

/// Handler for the poll form.
///
/// # Examples
///
/// ```
/// use pollcalc::domain::{MessageDisplay, Page, OUTPUT_ELEMENT_ID};
///
/// let mut page = Page::default();
/// MessageDisplay::display(&mut page, "<b>hi</b>");
/// assert_eq!(page.text_content(OUTPUT_ELEMENT_ID).unwrap(), "You said: <b>hi</b>");
/// ```
pub struct MessageDisplay;

impl MessageDisplay {
    /// Echoes `response` into the output element as plain text.
    pub fn display(page: &mut Page, response: &str) {
        info!(form = FormKind::Poll.form_id(), len = response.chars().count(), "poll form submitted");

        page.set_field_value(FormKind::Poll, response);
        let message = format!("{MESSAGE_PREFIX}{response}");
        // The element always exists on a normalized page.
        if let Err(err) = page.set_text_content(OUTPUT_ELEMENT_ID, &message) {
            warn!(%err, "could not update output element");
        }
    }
}

/// Handler for the calc form.
///
/// # Examples
///
/// ```
/// use pollcalc::domain::{Calculator, Page, CALC_RESULT_ELEMENT_ID};
///
/// let mut page = Page::default();
/// assert_eq!(Calculator::calculate(&mut page, "2+2"), Ok(4.0));
/// assert_eq!(page.text_content(CALC_RESULT_ELEMENT_ID).unwrap(), "4");
///
/// assert!(Calculator::calculate(&mut page, "10/0").is_err());
/// assert_eq!(page.text_content(CALC_RESULT_ELEMENT_ID).unwrap(), "Error: Division by zero");
/// ```
pub struct Calculator;

impl Calculator {
    /// Parses and evaluates an arithmetic expression.
    pub fn evaluate(expression: &str) -> EvalResult<f64> {
        let mut parser = Parser::new(expression)?;
        let ast = parser.parse()?;
        debug!(?ast, "parsed expression");
        ExpressionEvaluator::new().evaluate(&ast)
    }

    /// Evaluates `expression` and writes the outcome into the result element.
    ///
    /// Errors are shown on the page as `Error: <message>` and also returned.
    pub fn calculate(page: &mut Page, expression: &str) -> EvalResult<f64> {
        info!(form = FormKind::Calc.form_id(), len = expression.chars().count(), "calc form submitted");

        page.set_field_value(FormKind::Calc, expression);
        let result = Self::evaluate(expression);

        let text = match &result {
            Ok(value) => format_number(*value),
            Err(err) => {
                warn!(%err, syntax = err.is_syntax_error(), "expression rejected");
                format!("Error: {err}")
            }
        };

        if let Err(err) = page.set_text_content(CALC_RESULT_ELEMENT_ID, &text) {
            warn!(%err, "could not update calc result element");
        }

        result
    }
}

/// Formats a result the way it is shown in the result element.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EvalError;

    #[test]
    fn test_display_sets_output_text() {
        let mut page = Page::default();
        MessageDisplay::display(&mut page, "hello");

        assert_eq!(page.response, "hello");
        assert_eq!(page.text_content(OUTPUT_ELEMENT_ID).unwrap(), "You said: hello");
    }

    #[test]
    fn test_display_keeps_markup_as_text() {
        let mut page = Page::default();
        let payload = "<script>alert('x')</script>";
        MessageDisplay::display(&mut page, payload);

        assert_eq!(
            page.text_content(OUTPUT_ELEMENT_ID).unwrap(),
            format!("You said: {payload}")
        );
        assert!(!page.render_html().contains("<script>"));
    }

    #[test]
    fn test_display_replaces_previous_message() {
        let mut page = Page::default();
        MessageDisplay::display(&mut page, "first");
        MessageDisplay::display(&mut page, "");
        assert_eq!(page.text_content(OUTPUT_ELEMENT_ID).unwrap(), "You said: ");
    }

    #[test]
    fn test_calculate_success() {
        let mut page = Page::default();
        assert_eq!(Calculator::calculate(&mut page, "2+2"), Ok(4.0));
        assert_eq!(page.expression, "2+2");
        assert_eq!(page.text_content(CALC_RESULT_ELEMENT_ID).unwrap(), "4");

        assert_eq!(Calculator::calculate(&mut page, "1/4"), Ok(0.25));
        assert_eq!(page.text_content(CALC_RESULT_ELEMENT_ID).unwrap(), "0.25");
    }

    #[test]
    fn test_calculate_division_by_zero() {
        let mut page = Page::default();
        assert_eq!(Calculator::calculate(&mut page, "10/0"), Err(EvalError::DivisionByZero));
        assert_eq!(
            page.text_content(CALC_RESULT_ELEMENT_ID).unwrap(),
            "Error: Division by zero"
        );
    }

    #[test]
    fn test_calculate_rejects_code() {
        let mut page = Page::default();
        let err = Calculator::calculate(&mut page, "alert(document.cookie)").unwrap_err();
        assert!(err.is_syntax_error());
        assert!(page
            .text_content(CALC_RESULT_ELEMENT_ID)
            .unwrap()
            .starts_with("Error: Invalid expression"));
    }

    #[test]
    fn test_handlers_are_independent() {
        let mut page = Page::default();
        MessageDisplay::display(&mut page, "hi");
        Calculator::calculate(&mut page, "3*3").unwrap();

        assert_eq!(page.text_content(OUTPUT_ELEMENT_ID).unwrap(), "You said: hi");
        assert_eq!(page.text_content(CALC_RESULT_ELEMENT_ID).unwrap(), "9");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(1e21), "1000000000000000000000");
    }
}
