#[cfg(test)]
mod tests {
    use crate::panels::settings::*;
    use crate::state::*;
    use chat_core::markup::{Block, Span};
    use chat_types::config::{ChatConfig, StorageBackendType};
    use chat_types::conversation::ConversationSummary;
    use chat_types::event::SessionEvent;
    use chat_types::message::{Message, MessageStatus, Role};

    fn appended(message: Message) -> SessionEvent {
        SessionEvent::MessageAppended { message }
    }

    fn summary(id: &str, title: &str) -> ConversationSummary {
        ConversationSummary {
            conversation_id: id.to_string(),
            title: title.to_string(),
            updated_at: "2026-03-01".to_string(),
        }
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert!(state.messages.is_empty());
        assert!(state.conversation_id.is_none());
        assert!(state.typing.is_empty());
        assert!(state.input_text.is_empty());
        assert_eq!(state.active_tab, ChatTab::Chat);
        assert_eq!(state.history, HistoryView::NotLoaded);
        assert!(!state.show_settings);
        assert_eq!(state.status_text, "Ready");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_ui_state_message_appended() {
        let mut state = UiState::new();
        let message = Message::pending_user("hello");
        let id = message.id.clone();
        state.process_events(vec![appended(message)]);

        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].message_id, id);
        assert_eq!(state.messages[0].role, Role::User);
        assert_eq!(state.messages[0].text, "hello");
        assert_eq!(state.messages[0].status, MessageStatus::Pending);
        assert!(!state.messages[0].is_notice);
    }

    #[test]
    fn test_ui_state_user_text_not_formatted() {
        let mut state = UiState::new();
        state.process_events(vec![appended(Message::user("**not bold**"))]);
        assert!(state.messages[0].blocks.is_empty());
    }

    #[test]
    fn test_ui_state_reply_is_formatted() {
        let mut state = UiState::new();
        state.process_events(vec![appended(Message::assistant("Bring **ID**\n- form"))]);
        assert_eq!(
            state.messages[0].blocks,
            vec![
                Block::Line(vec![Span::plain("Bring "), Span::bold("ID")]),
                Block::Bullet(vec![Span::plain("form")]),
            ]
        );
    }

    #[test]
    fn test_ui_state_notice_is_plain() {
        let mut state = UiState::new();
        state.process_events(vec![appended(Message::notice("Error: **quota**"))]);
        assert!(state.messages[0].is_notice);
        assert!(state.messages[0].blocks.is_empty());
        assert_eq!(state.messages[0].status, MessageStatus::Failed);
    }

    #[test]
    fn test_ui_state_status_changed() {
        let mut state = UiState::new();
        let message = Message::pending_user("hi");
        let id = message.id.clone();
        state.process_events(vec![
            appended(message),
            SessionEvent::MessageStatusChanged {
                message_id: id,
                status: MessageStatus::Confirmed,
            },
        ]);
        assert_eq!(state.messages[0].status, MessageStatus::Confirmed);
    }

    #[test]
    fn test_ui_state_status_changed_unknown_id() {
        let mut state = UiState::new();
        state.process_events(vec![
            appended(Message::pending_user("hi")),
            SessionEvent::MessageStatusChanged {
                message_id: "missing".to_string(),
                status: MessageStatus::Failed,
            },
        ]);
        assert_eq!(state.messages[0].status, MessageStatus::Pending);
    }

    #[test]
    fn test_ui_state_typing_pairs() {
        let mut state = UiState::new();
        state.process_events(vec![
            SessionEvent::TypingStarted { request_id: 1 },
            SessionEvent::TypingStarted { request_id: 2 },
        ]);
        assert!(state.is_busy());
        assert_eq!(state.typing.len(), 2);
        assert_eq!(state.status_text, "Waiting for reply...");

        state.process_events(vec![SessionEvent::TypingStopped { request_id: 1 }]);
        assert!(state.is_busy());

        state.process_events(vec![SessionEvent::TypingStopped { request_id: 2 }]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_unknown_typing_stop_is_harmless() {
        let mut state = UiState::new();
        state.process_events(vec![SessionEvent::TypingStopped { request_id: 9 }]);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_ui_state_conversation_id_assigned() {
        let mut state = UiState::new();
        state.process_events(vec![SessionEvent::ConversationIdAssigned {
            conversation_id: "c1".to_string(),
        }]);
        assert_eq!(state.conversation_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_ui_state_new_conversation_id_invalidates_history() {
        let mut state = UiState::new();
        state.process_events(vec![SessionEvent::HistoryLoaded {
            summaries: vec![summary("c1", "Permits")],
        }]);

        state.process_events(vec![SessionEvent::ConversationIdAssigned {
            conversation_id: "c2".to_string(),
        }]);
        assert_eq!(state.history, HistoryView::NotLoaded);
    }

    #[test]
    fn test_ui_state_id_assigned_keeps_history_fetch_in_progress() {
        let mut state = UiState::new();
        state.history = HistoryView::Loading;
        state.process_events(vec![SessionEvent::ConversationIdAssigned {
            conversation_id: "c2".to_string(),
        }]);
        assert_eq!(state.history, HistoryView::Loading);
    }

    #[test]
    fn test_ui_state_reset_replaces_messages() {
        let mut state = UiState::new();
        state.process_events(vec![appended(Message::user("old"))]);

        state.process_events(vec![
            SessionEvent::ConversationReset {
                conversation_id: Some("c7".to_string()),
            },
            appended(Message::user("q")),
            appended(Message::assistant("a")),
        ]);

        assert_eq!(state.conversation_id.as_deref(), Some("c7"));
        let texts: Vec<&str> = state.messages.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["q", "a"]);
    }

    #[test]
    fn test_ui_state_cleared() {
        let mut state = UiState::new();
        state.process_events(vec![
            SessionEvent::ConversationIdAssigned {
                conversation_id: "c1".to_string(),
            },
            appended(Message::user("hi")),
            SessionEvent::ConversationCleared,
        ]);
        assert!(state.is_empty());
        assert!(state.conversation_id.is_none());
    }

    #[test]
    fn test_ui_state_history_empty_vs_failed() {
        let mut state = UiState::new();
        state.process_events(vec![SessionEvent::HistoryLoaded { summaries: vec![] }]);
        assert_eq!(state.history, HistoryView::Empty);

        state.process_events(vec![SessionEvent::HistoryFailed {
            message: "Network error".to_string(),
        }]);
        assert_eq!(state.history, HistoryView::Failed("Network error".to_string()));
    }

    #[test]
    fn test_ui_state_history_loaded() {
        let mut state = UiState::new();
        state.process_events(vec![SessionEvent::HistoryLoaded {
            summaries: vec![summary("c1", "Permits"), summary("c2", "Taxes")],
        }]);
        match &state.history {
            HistoryView::Loaded(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[0].title, "Permits");
            }
            other => panic!("unexpected history view: {:?}", other),
        }
    }

    #[test]
    fn test_ui_state_error_in_status() {
        let mut state = UiState::new();
        state.process_events(vec![SessionEvent::Error {
            message: "Could not open conversation".to_string(),
        }]);
        assert!(state.status_text.contains("Could not open conversation"));
        assert!(state.messages.is_empty());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_ui_state_failed_send_lifecycle() {
        let mut state = UiState::new();
        let user = Message::pending_user("hours?");
        let id = user.id.clone();

        state.process_events(vec![
            appended(user),
            SessionEvent::TypingStarted { request_id: 1 },
        ]);
        assert!(state.is_busy());

        state.process_events(vec![
            SessionEvent::MessageStatusChanged {
                message_id: id,
                status: MessageStatus::Failed,
            },
            appended(Message::notice("Network error. Please check your connection and try again.")),
            SessionEvent::TypingStopped { request_id: 1 },
        ]);

        assert!(!state.is_busy());
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].status, MessageStatus::Failed);
        assert!(state.messages[1].is_notice);
    }

    #[test]
    fn test_ui_state_default() {
        let state = UiState::default();
        assert!(state.messages.is_empty());
        assert!(!state.is_busy());
    }

    // ─── Settings Tests ──────────────────────────────────────

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&ChatConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let mut config = ChatConfig::default();
        config.storage.key = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_api_base() {
        let mut config = ChatConfig::default();
        config.backend.api_base = "https://mycebu.example".to_string();
        assert!(validate_config(&config).is_ok());
        config.backend.api_base = "/portal".to_string();
        assert!(validate_config(&config).is_ok());
        config.backend.api_base = "mycebu.example".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_storage_descriptions_cover_all_backends() {
        for backend in StorageBackendType::all() {
            assert!(!storage_description(backend).is_empty());
        }
    }
}
