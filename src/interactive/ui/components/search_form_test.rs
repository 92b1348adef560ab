#[cfg(test)]
mod tests {
    use super::super::search_form::SearchForm;
    use crate::client::params::{QueryDraft, SearchField};
    use crate::interactive::ui::components::Component;
    use crate::interactive::ui::events::Message;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn deleted_index() -> usize {
        SearchField::ALL
            .iter()
            .position(|field| field.is_flag())
            .unwrap()
    }

    #[test]
    fn test_typing_emits_draft_change_for_focused_field() {
        let mut form = SearchForm::new();
        let message = form.handle_key(key(KeyCode::Char('h')));
        match message {
            Some(Message::DraftChanged(SearchField::Query, text)) => assert_eq!(text, "h"),
            other => panic!("expected a draft change, got {other:?}"),
        }
    }

    #[test]
    fn test_arrows_move_field_focus() {
        let mut form = SearchForm::new();
        assert!(matches!(
            form.handle_key(key(KeyCode::Down)),
            Some(Message::FocusNextField)
        ));
        assert!(matches!(
            form.handle_key(key(KeyCode::Up)),
            Some(Message::FocusPrevField)
        ));
    }

    #[test]
    fn test_enter_submits_the_search() {
        let mut form = SearchForm::new();
        assert!(matches!(
            form.handle_key(key(KeyCode::Enter)),
            Some(Message::SubmitSearch)
        ));
    }

    #[test]
    fn test_space_toggles_the_flag_field() {
        let mut form = SearchForm::new();
        form.set_focus(deleted_index());
        assert!(matches!(
            form.handle_key(key(KeyCode::Char(' '))),
            Some(Message::ToggleDeleted)
        ));
        // Typing text into the checkbox does nothing.
        assert!(form.handle_key(key(KeyCode::Char('x'))).is_none());
    }

    #[test]
    fn test_draft_sync_preserves_cursor_when_unchanged() {
        let mut form = SearchForm::new();
        form.handle_key(key(KeyCode::Char('a')));
        form.handle_key(key(KeyCode::Char('b')));
        form.handle_key(key(KeyCode::Left));

        let draft = QueryDraft {
            q: "ab".to_string(),
            ..QueryDraft::default()
        };
        form.set_draft(&draft);

        // The cursor is still before 'b', so typing lands between the two.
        let message = form.handle_key(key(KeyCode::Char('X')));
        match message {
            Some(Message::DraftChanged(SearchField::Query, text)) => assert_eq!(text, "aXb"),
            other => panic!("expected a draft change, got {other:?}"),
        }
    }

    #[test]
    fn test_tab_asks_for_the_results_pane() {
        let mut form = SearchForm::new();
        assert!(matches!(
            form.handle_key(key(KeyCode::Tab)),
            Some(Message::FocusResults)
        ));
    }
}
