use quest_sift::sections::markdown_sections;

#[test]
fn three_sections_concatenate_in_fixed_order() {
    let md = "## Description\nFoo\n## Progress\nBar\n## Completion\nBaz\n## Other\nQux";
    assert_eq!(markdown_sections(md).unwrap(), "FooBarBaz");
}

#[test]
fn missing_progress_leaves_no_gap() {
    let md = "## Description\nFoo\n## Completion\nBaz\n## Other\nQux";
    assert_eq!(markdown_sections(md).unwrap(), "FooBaz");
}

#[test]
fn missing_description_yields_absent() {
    let md = "## Progress\nBar\n## Completion\nBaz";
    assert!(markdown_sections(md).is_none());
}

#[test]
fn description_alone_reaches_end_of_document() {
    let md = "intro line\n## Description\nSlay ten boars.\nReturn to camp.";
    assert_eq!(
        markdown_sections(md).unwrap(),
        "Slay ten boars.\nReturn to camp."
    );
}

#[test]
fn linked_headings_are_normalized_before_slicing() {
    let md = "## Description\nFoo\n## [Progress](javascript:)\nBar\n\
              ## [Completion](javascript:)\nBaz\n## Other";
    assert_eq!(markdown_sections(md).unwrap(), "FooBarBaz");
}

#[test]
fn rewrapped_output_extracts_unchanged() {
    let md = "## Description\nSlay ten boars.\n\nReturn to camp.\n## Progress\nStill hunting?\n## Other";
    let first = markdown_sections(md).unwrap();

    // The extracted text holds no headings of its own, so wrapping it back
    // under a description heading must reproduce it exactly.
    let rewrapped = format!("## Description\n{first}");
    let second = markdown_sections(&rewrapped).unwrap();
    assert_eq!(second, first);
}

#[test]
fn deeper_heading_ends_a_section() {
    let md = "## Description\nFoo\n### Notes\nignored";
    assert_eq!(markdown_sections(md).unwrap(), "Foo");
}
