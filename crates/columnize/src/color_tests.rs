use super::*;

#[test]
fn colorize_wraps_text_in_escape_codes() {
    assert_eq!(colorize(Color::Green, "data.bin"), "\x1b[32mdata.bin\x1b[0m");
    assert_eq!(colorize(Color::Blue, "src"), "\x1b[34msrc\x1b[0m");
}

#[test]
fn colorize_none_is_passthrough() {
    assert_eq!(colorize(Color::None, "plain.txt"), "plain.txt");
}

#[test]
fn every_color_except_none_has_a_code() {
    let colors = [
        Color::Reset,
        Color::Green,
        Color::Yellow,
        Color::Red,
        Color::Blue,
        Color::LightBlue,
        Color::White,
        Color::BlinkingRedBackground,
    ];
    for c in colors {
        assert!(c.code().starts_with('\x1b'), "{c:?} should be an escape");
    }
    assert!(Color::None.code().is_empty());
}
