// SPDX-License-Identifier: MPL-2.0
//! Comments section of a gallery.
//!
//! Lists visitor comments newest first and holds the draft form. A draft is
//! only sent when the folder accepts comments and both trimmed fields are
//! non-empty; while a post is in flight further submits are ignored. A
//! successful post is prepended and clears the draft.

use crate::domain::{self, Comment, CommentDraft};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Row, Text};
use iced::{Element, Length};

#[derive(Debug, Clone, Default)]
pub struct State {
    enabled: bool,
    comments: Vec<Comment>,
    draft: CommentDraft,
    submitting: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    CommentChanged(String),
    Submit,
    /// Result of loading the list; errors carry an i18n key.
    Loaded(Result<Vec<Comment>, &'static str>),
    /// Result of posting the draft; errors carry an i18n key.
    Posted(Result<Comment, &'static str>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send this draft to the store.
    Post(CommentDraft),
    Posted,
    Failed(&'static str),
}

impl State {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::NameChanged(name) => {
                self.draft.name = name;
                Effect::None
            }
            Message::CommentChanged(comment) => {
                self.draft.comment = comment;
                Effect::None
            }
            Message::Submit => {
                if !self.can_submit() {
                    return Effect::None;
                }
                self.submitting = true;
                Effect::Post(self.draft.clone())
            }
            Message::Loaded(Ok(mut comments)) => {
                domain::folder::sort_newest_first(&mut comments);
                self.comments = comments;
                Effect::None
            }
            Message::Loaded(Err(key)) => Effect::Failed(key),
            Message::Posted(Ok(comment)) => {
                self.submitting = false;
                self.comments.insert(0, comment);
                self.draft.clear();
                Effect::Posted
            }
            Message::Posted(Err(key)) => {
                self.submitting = false;
                Effect::Failed(key)
            }
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.enabled && !self.submitting && self.draft.validated().is_some()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub fn draft(&self) -> &CommentDraft {
        &self.draft
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

/// Renders the form and the list.
pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let title = Text::new(i18n.tr_with_args(
        "comments-title",
        &[("count", &state.comments.len().to_string())],
    ))
    .size(typography::TITLE_SM);

    let name_input = text_input(&i18n.tr("comments-name-placeholder"), &state.draft.name)
        .on_input(Message::NameChanged)
        .padding(spacing::XS);

    let mut comment_input =
        text_input(&i18n.tr("comments-message-placeholder"), &state.draft.comment)
            .on_input(Message::CommentChanged)
            .padding(spacing::XS);
    if state.can_submit() {
        comment_input = comment_input.on_submit(Message::Submit);
    }

    let submit_label = if state.submitting {
        i18n.tr("comments-submitting")
    } else {
        i18n.tr("comments-submit")
    };
    let submit = button(Text::new(submit_label))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary)
        .on_press_maybe(state.can_submit().then_some(Message::Submit));

    let form = Column::new()
        .spacing(spacing::XS)
        .push(name_input)
        .push(comment_input)
        .push(submit);

    let list: Element<'a, Message> = if state.comments.is_empty() {
        Text::new(i18n.tr("comments-empty"))
            .size(typography::BODY_SM)
            .into()
    } else {
        Column::with_children(state.comments.iter().map(comment_row))
            .spacing(spacing::SM)
            .into()
    };

    Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(title)
            .push(form)
            .push(list),
    )
    .width(Length::Fill)
    .padding(spacing::LG)
    .style(styles::container::card)
    .into()
}

fn comment_row(comment: &Comment) -> Element<'_, Message> {
    let header = Row::new()
        .spacing(spacing::XS)
        .push(Text::new(comment.name.as_str()).size(typography::BODY))
        .push(
            Text::new(comment.created_at.format("%Y-%m-%d %H:%M").to_string())
                .size(typography::CAPTION),
        );
    Column::new()
        .spacing(spacing::XXS)
        .push(header)
        .push(Text::new(comment.comment.as_str()).size(typography::BODY_SM))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn comment(id: &str, hour: u32) -> Comment {
        Comment {
            id: id.to_string(),
            name: "Ana".to_string(),
            comment: "Lovely".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).single().unwrap_or_default(),
        }
    }

    fn filled(state: &mut State) {
        state.handle(Message::NameChanged("  Ana ".into()));
        state.handle(Message::CommentChanged("So happy for you".into()));
    }

    #[test]
    fn blank_draft_cannot_be_submitted() {
        let mut state = State::new(true);
        state.handle(Message::NameChanged("Ana".into()));
        state.handle(Message::CommentChanged("   ".into()));
        assert_eq!(state.handle(Message::Submit), Effect::None);
    }

    #[test]
    fn disabled_section_never_posts() {
        let mut state = State::new(false);
        filled(&mut state);
        assert_eq!(state.handle(Message::Submit), Effect::None);
    }

    #[test]
    fn submit_posts_once_until_result() {
        let mut state = State::new(true);
        filled(&mut state);
        assert!(matches!(state.handle(Message::Submit), Effect::Post(_)));
        assert!(state.is_submitting());
        assert_eq!(state.handle(Message::Submit), Effect::None);
    }

    #[test]
    fn posted_comment_is_prepended_and_draft_cleared() {
        let mut state = State::new(true);
        state.handle(Message::Loaded(Ok(vec![comment("old", 8)])));
        filled(&mut state);
        state.handle(Message::Submit);

        assert_eq!(state.handle(Message::Posted(Ok(comment("new", 9)))), Effect::Posted);
        assert_eq!(state.comments()[0].id, "new");
        assert!(state.draft().name.is_empty());
        assert!(!state.is_submitting());
    }

    #[test]
    fn failed_post_keeps_draft() {
        let mut state = State::new(true);
        filled(&mut state);
        state.handle(Message::Submit);
        assert_eq!(
            state.handle(Message::Posted(Err("error-gallery-load"))),
            Effect::Failed("error-gallery-load")
        );
        assert_eq!(state.draft().comment, "So happy for you");
        assert!(state.can_submit());
    }

    #[test]
    fn loaded_comments_are_sorted_newest_first() {
        let mut state = State::new(true);
        state.handle(Message::Loaded(Ok(vec![comment("a", 7), comment("b", 10), comment("c", 9)])));
        let ids: Vec<&str> = state.comments().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }
}
