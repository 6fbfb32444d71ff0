//! Key synthesis: text and key intents to key-down/up primitives.
//!
//! Characters map onto the platform keycode space (letters, digits,
//! space). Anything outside that set makes the whole text operation fall
//! back to a clipboard paste instead of a per-character key stream.

use tracing::debug;

/// Platform keycodes used by the synthesizer
pub mod keycode {
    /// Digit row base: `'0'` maps here, `'9'` maps nine above
    pub const KEY_0: i32 = 2000;
    /// Letter base: `'a'`/`'A'` map here, `'z'`/`'Z'` map 25 above
    pub const KEY_A: i32 = 2017;
    /// Letter `V`, for the paste combination
    pub const KEY_V: i32 = 2038;
    /// Left shift
    pub const KEY_SHIFT_LEFT: i32 = 2047;
    /// Space bar
    pub const KEY_SPACE: i32 = 2050;
    /// Delete backward
    pub const KEY_DEL: i32 = 2055;
    /// Left control
    pub const KEY_CTRL_LEFT: i32 = 2072;
    /// Move caret to end of text
    pub const KEY_MOVE_END: i32 = 2305;
}

/// Modifier bit for shift
pub const MODIFIER_SHIFT: u32 = 1;
/// Modifier bit for control
pub const MODIFIER_CTRL: u32 = 2;

/// A keycode plus the modifier mask it is pressed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    /// Platform keycode
    pub code: i32,
    /// Modifier mask held during the press
    pub modifiers: u32,
}

impl KeyStroke {
    /// A stroke with no modifiers
    #[must_use]
    pub const fn plain(code: i32) -> Self {
        Self {
            code,
            modifiers: 0,
        }
    }

    /// A stroke with shift held
    #[must_use]
    pub const fn shifted(code: i32) -> Self {
        Self {
            code,
            modifiers: MODIFIER_SHIFT,
        }
    }
}

/// Map one character to a key stroke.
///
/// Uppercase letters become shift+letter; lowercase letters, digits and
/// space map directly. Everything else has no mapping.
#[must_use]
pub fn keycode_for_char(c: char) -> Option<KeyStroke> {
    match c {
        'A'..='Z' => Some(KeyStroke::shifted(keycode::KEY_A + (c as i32 - 'A' as i32))),
        'a'..='z' => Some(KeyStroke::plain(keycode::KEY_A + (c as i32 - 'a' as i32))),
        '0'..='9' => Some(KeyStroke::plain(keycode::KEY_0 + (c as i32 - '0' as i32))),
        ' ' => Some(KeyStroke::plain(keycode::KEY_SPACE)),
        _ => None,
    }
}

/// How a text input operation is carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputPlan {
    /// One stroke per character
    Keys(Vec<KeyStroke>),
    /// Whole string pasted through the host clipboard
    Paste,
}

/// Plan the key stream for a piece of text.
///
/// A single unmappable character downgrades the entire operation to the
/// paste fallback; there is no partial key stream.
#[must_use]
pub fn plan_input_text(text: &str) -> TextInputPlan {
    let mut strokes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match keycode_for_char(c) {
            Some(stroke) => strokes.push(stroke),
            None => {
                debug!(%c, "unmappable character, falling back to paste");
                return TextInputPlan::Paste;
            }
        }
    }
    TextInputPlan::Keys(strokes)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod mapping_tests {
        use super::*;

        #[test]
        fn test_lowercase_letter() {
            assert_eq!(keycode_for_char('b'), Some(KeyStroke::plain(2018)));
        }

        #[test]
        fn test_uppercase_letter_is_shifted() {
            let stroke = keycode_for_char('A').unwrap();
            assert_eq!(stroke.code, keycode::KEY_A);
            assert_eq!(stroke.modifiers, MODIFIER_SHIFT);
        }

        #[test]
        fn test_digit() {
            assert_eq!(keycode_for_char('1'), Some(KeyStroke::plain(2001)));
            assert_eq!(keycode_for_char('9'), Some(KeyStroke::plain(2009)));
        }

        #[test]
        fn test_space() {
            assert_eq!(
                keycode_for_char(' '),
                Some(KeyStroke::plain(keycode::KEY_SPACE))
            );
        }

        #[test]
        fn test_unmappable() {
            assert!(keycode_for_char('!').is_none());
            assert!(keycode_for_char('é').is_none());
            assert!(keycode_for_char('\n').is_none());
        }
    }

    mod plan_tests {
        use super::*;

        #[test]
        fn test_plan_mixed_text() {
            let plan = plan_input_text("Ab1 ");
            let TextInputPlan::Keys(strokes) = plan else {
                panic!("expected key plan");
            };
            assert_eq!(
                strokes,
                vec![
                    KeyStroke::shifted(keycode::KEY_A),
                    KeyStroke::plain(keycode::KEY_A + 1),
                    KeyStroke::plain(keycode::KEY_0 + 1),
                    KeyStroke::plain(keycode::KEY_SPACE),
                ]
            );
        }

        #[test]
        fn test_one_bad_character_downgrades_whole_string() {
            assert_eq!(plan_input_text("abc!def"), TextInputPlan::Paste);
        }

        #[test]
        fn test_empty_text_plans_no_strokes() {
            assert_eq!(plan_input_text(""), TextInputPlan::Keys(Vec::new()));
        }
    }
}
