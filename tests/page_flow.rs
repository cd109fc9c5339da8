use pollcalc::domain::{
    decode_character_references, Calculator, EvalError, MessageDisplay, Page,
    CALC_RESULT_ELEMENT_ID, MESSAGE_PREFIX, OUTPUT_ELEMENT_ID,
};
use pollcalc::infrastructure::FileRepository;
use proptest::prelude::*;
use tempfile::TempDir;

/// Pulls the raw markup between an element's opening and closing tags.
fn element_markup<'a>(html: &'a str, id: &str) -> &'a str {
    let open = format!("<div id=\"{id}\">");
    let start = html.find(&open).expect("element present") + open.len();
    let end = start + html[start..].find("</div>").expect("element closed");
    &html[start..end]
}

#[test]
fn script_payload_is_rendered_as_text() {
    let mut page = Page::default();
    MessageDisplay::display(&mut page, "<script>document.location='//evil'</script>");

    let html = page.render_html();
    let markup = element_markup(&html, OUTPUT_ELEMENT_ID);

    assert_eq!(
        markup,
        "You said: &lt;script&gt;document.location=&#39;//evil&#39;&lt;/script&gt;"
    );
    assert_eq!(html.matches("<script").count(), 0);
}

#[test]
fn arithmetic_results() {
    assert_eq!(Calculator::evaluate("2+2"), Ok(4.0));
    assert_eq!(Calculator::evaluate(" 1.5 * (4 - 2) "), Ok(3.0));
    assert_eq!(Calculator::evaluate("10/0"), Err(EvalError::DivisionByZero));
}

#[test]
fn code_is_never_executed() {
    for input in [
        "alert(1)",
        "process.exit()",
        "var x = 1; x",
        "1; drop()",
        "`${1+1}`",
        "[1,2].length",
        "0x10",
        "1e3",
    ] {
        let err = Calculator::evaluate(input).unwrap_err();
        assert!(err.is_syntax_error(), "{input:?} gave {err:?}");
    }
}

#[test]
fn exported_page_re_reads_to_original_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.html");
    let path = path.to_str().unwrap();

    let text = "Tom & Jerry say \"<hi>\" isn't it";
    let mut page = Page::default();
    MessageDisplay::display(&mut page, text);
    Calculator::calculate(&mut page, "1/").unwrap_err();

    FileRepository::export_html(&page, path).unwrap();
    let html = std::fs::read_to_string(path).unwrap();

    let output = decode_character_references(element_markup(&html, OUTPUT_ELEMENT_ID));
    assert_eq!(output, format!("{MESSAGE_PREFIX}{text}"));

    let calc = decode_character_references(element_markup(&html, CALC_RESULT_ELEMENT_ID));
    assert_eq!(calc, page.text_content(CALC_RESULT_ELEMENT_ID).unwrap());
    assert!(calc.starts_with("Error: Invalid expression"));
}

proptest! {
    #[test]
    fn displayed_text_never_becomes_markup(text in ".*") {
        let mut page = Page::default();
        MessageDisplay::display(&mut page, &text);

        let html = page.render_html();
        let markup = element_markup(&html, OUTPUT_ELEMENT_ID);
        prop_assert!(!markup.contains('<'));
        prop_assert!(!markup.contains('>'));
        prop_assert_eq!(
            decode_character_references(markup),
            format!("{MESSAGE_PREFIX}{text}")
        );
    }

    #[test]
    fn evaluation_never_panics(input in ".{0,200}") {
        let mut page = Page::default();
        let result = Calculator::calculate(&mut page, &input);
        let shown = page.text_content(CALC_RESULT_ELEMENT_ID).unwrap().to_string();
        match result {
            Ok(value) => prop_assert!(value.is_finite()),
            Err(_) => prop_assert!(shown.starts_with("Error: ")),
        }
    }

    #[test]
    fn integer_sums_are_exact(a in -10_000i32..10_000, b in -10_000i32..10_000) {
        let expr = format!("{a} + ({b})");
        prop_assert_eq!(Calculator::evaluate(&expr), Ok(f64::from(a) + f64::from(b)));
    }
}
