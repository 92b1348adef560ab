#[cfg(test)]
mod tests {
    use super::super::text_input::TextInput;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut input = TextInput::new();
        type_text(&mut input, "hello");
        assert_eq!(input.text(), "hello");

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('X')));
        assert_eq!(input.text(), "helXlo");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::new();
        type_text(&mut input, "abc");
        assert!(input.handle_key(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "ab");

        input.handle_key(key(KeyCode::Home));
        assert!(input.handle_key(key(KeyCode::Delete)));
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn test_backspace_on_empty_reports_no_change() {
        let mut input = TextInput::new();
        assert!(!input.handle_key(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new();
        type_text(&mut input, "héllo");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        assert!(input.handle_key(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "hllo");
    }

    #[test]
    fn test_ctrl_u_clears_to_line_start() {
        let mut input = TextInput::new();
        type_text(&mut input, "hello world");
        assert!(input.handle_key(ctrl('u')));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_ctrl_w_deletes_previous_word() {
        let mut input = TextInput::new();
        type_text(&mut input, "hello world");
        assert!(input.handle_key(ctrl('w')));
        assert_eq!(input.text(), "hello ");
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut input = TextInput::new();
        input.set_text("abc".to_string());
        input.handle_key(key(KeyCode::Char('d')));
        assert_eq!(input.text(), "abcd");
    }
}
