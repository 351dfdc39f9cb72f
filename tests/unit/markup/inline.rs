use super::*;

fn md(text: &str) -> String {
    InlineMarkdown::new().unwrap().render(text)
}

#[test]
fn emphasis_strong_and_strike() {
    assert_eq!(md("Hello **world**"), "<p>Hello <strong>world</strong></p>");
    assert_eq!(
        md("a *b* ~~c~~ _d_ __e__"),
        "<p>a <em>b</em> <del>c</del> <em>d</em> <strong>e</strong></p>"
    );
}

#[test]
fn paragraphs_and_line_breaks() {
    assert_eq!(
        md("line1\nline2\n\n\npara2\n"),
        "<p>line1<br>line2</p><p>para2</p>"
    );
    assert_eq!(md(""), "");
}

#[test]
fn links_open_in_new_context_without_referrer() {
    assert_eq!(
        md("[site](https://example.com/a_b_c)"),
        r#"<p><a href="https://example.com/a_b_c" target="_blank" rel="noopener noreferrer">site</a></p>"#
    );
}

#[test]
fn link_urls_are_not_rewritten_by_emphasis() {
    assert_eq!(
        md("see [**init**](https://docs.python.org/3/reference/datamodel.html#object.__init__) *now*"),
        concat!(
            r#"<p>see <a href="https://docs.python.org/3/reference/datamodel.html#object.__init__" "#,
            r#"target="_blank" rel="noopener noreferrer"><strong>init</strong></a> <em>now</em></p>"#
        )
    );
    assert!(md("[x](https://a.example/~~b~~/*c*)").contains(r#"href="https://a.example/~~b~~/*c*""#));
}

#[test]
fn unsafe_links_and_markup_are_neutralized() {
    let out = md("[x](javascript:alert(1)) <script>");
    assert!(!out.contains("<a"));
    assert!(!out.contains("<script>"));
    assert!(out.contains("&lt;script&gt;"));
}

#[test]
fn intraword_underscores_are_literal() {
    assert_eq!(md("snake_case_name"), "<p>snake_case_name</p>");
}

#[test]
fn capability_acquires_inline_renderer() {
    let cap = InlineMarkdown::capability();
    assert_eq!(cap.render("*hi*"), "<p><em>hi</em></p>");
    assert_eq!(cap.is_acquired(), Some(true));
}
