use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builder_collects_parts() {
    let diag = Diagnostic::warning(ErrorCode::W3004)
        .with_message("name `x` shadows an outer declaration")
        .with_label(Span::new(10, 11), "declared here")
        .with_secondary_label(Span::new(0, 1), "outer `x`")
        .with_note("the outer value is not reachable inside the branch")
        .with_suggestion("rename the binding");

    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), Some(Span::new(10, 11)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn display_renders_all_sections() {
    let diag = Diagnostic::error(ErrorCode::E3005)
        .with_message("missing `component2`")
        .with_label(Span::new(4, 6), "no accessor")
        .with_note("positional entries use componentN");

    assert_eq!(
        diag.to_string(),
        "error [E3005]: missing `component2`\n  --> 4..6: no accessor\n  = note: positional entries use componentN"
    );
}

#[test]
fn primary_span_ignores_secondary_labels() {
    let diag =
        Diagnostic::error(ErrorCode::E3001).with_secondary_label(Span::new(1, 2), "context");
    assert_eq!(diag.primary_span(), None);
}
