use quest_sift::sections::{html_section, strip_tags};

const HEADING: &str = "<h2 class=\"heading-size-3\">Description</h2>";
const NEXT: &str = "<h2";

#[test]
fn well_formed_section_is_sliced_and_stripped() {
    let html = format!(
        "<html><body>{HEADING}\n<p>Slay <b>ten</b> boars.</p>\n\
         <h2 class=\"heading-size-3\">Rewards</h2><p>Gold.</p></body></html>"
    );
    let out = html_section(&html, HEADING, NEXT).unwrap();
    assert_eq!(out, "\nSlay ten boars.\n");
    assert!(!out.contains('<'));
    assert!(!out.contains('>'));
}

#[test]
fn missing_heading_yields_absent() {
    let html = "<html><body><h2>Rewards</h2>Gold.</body></html>";
    assert!(html_section(html, HEADING, NEXT).is_none());
}

#[test]
fn no_following_heading_slices_to_end() {
    let html = format!("{HEADING}<p>Last section.</p>");
    let out = html_section(&html, HEADING, NEXT).unwrap();
    assert_eq!(out, "Last section.");
}

#[test]
fn unterminated_tag_terminates_with_remainder_kept() {
    let out = strip_tags("Bring the head <of");
    assert_eq!(out, "Bring the head <of");

    let out = strip_tags("Bring <b>the</b> head <of");
    assert_eq!(out, "Bring the head <of");
}

#[test]
fn unterminated_tag_inside_section_does_not_hang() {
    let html = format!("{HEADING}Kill <b>five</b> wolves <unclosed");
    let out = html_section(&html, HEADING, NEXT).unwrap();
    assert_eq!(out, "Kill five wolves <unclosed");
}

#[test]
fn tagless_fragment_passes_through() {
    assert_eq!(strip_tags("plain quest text"), "plain quest text");
}
