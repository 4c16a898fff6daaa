use quest_sift::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../quest-sift.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.selection.min_length, 500);
    assert!(cfg.sections.description_heading.contains("Description"));
    assert!(cfg.convert.line_width > 0);
}

#[test]
fn empty_config_falls_back_to_defaults() {
    let cfg: Config = toml::from_str("").expect("parse empty TOML");
    assert_eq!(cfg.global.workers, 0);
    assert_eq!(cfg.selection.min_length, 500);
    assert_eq!(cfg.sections.next_heading, "<h2");
    assert!(!cfg.logging.json);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let cfg: Config = toml::from_str("[selection]\nmin_length = 42\n").unwrap();
    assert_eq!(cfg.selection.min_length, 42);
    assert_eq!(cfg.convert.line_width, 80);
}
