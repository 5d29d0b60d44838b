//! Transcript page rendering using Handlebars for templating.
//! Handlebars adds additional security controls since it can't do
//! much out of the box without registering your own helpers. Model
//! output is untrusted, so only assistant messages (which carry the
//! span rich-text marker) render unescaped; user input is always
//! escaped.

use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

use crate::groq::{Message, Role};

const CHAT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Medical Assistant</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <main class="chat">
    <h1>Medical Assistant</h1>
    {{#if flash}}
    <div class="flash">{{flash}}</div>
    {{/if}}
    <section class="messages">
      {{#each messages}}
      <div class="message {{css_class}}">
        {{#if is_user}}{{content}}{{else}}{{{content}}}{{/if}}
      </div>
      {{/each}}
    </section>
    <form id="message-form" method="post" action="/">
      <input id="user-message" type="text" name="user_message"
             placeholder="Type your message..." autocomplete="off" autofocus>
      <button type="submit">Send</button>
    </form>
    <form id="reset-form" method="post" action="/reset">
      <button type="submit" class="reset">Reset conversation</button>
    </form>
  </main>
</body>
</html>
"#;

#[derive(Serialize)]
struct MessageView {
    css_class: &'static str,
    is_user: bool,
    content: String,
}

#[derive(Serialize)]
struct ChatPage<'a> {
    messages: Vec<MessageView>,
    flash: Option<&'a str>,
}

fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string("chat_page", CHAT_PAGE)
        .expect("Failed to register template");
    registry
}

/// Render the transcript page. `flash` is the pending one-shot
/// operator notice, if any.
pub fn render_chat_page(messages: &[Message], flash: Option<&str>) -> Result<String> {
    let messages = messages
        .iter()
        .map(|message| {
            let (css_class, is_user) = match message.role {
                Role::User => ("user", true),
                Role::Assistant => ("assistant", false),
                // System messages never reach the stored transcript,
                // but render them escaped if one ever does
                Role::System => ("system", true),
            };
            MessageView {
                css_class,
                is_user,
                content: message.content.clone(),
            }
        })
        .collect();

    let page = templates().render("chat_page", &ChatPage { messages, flash })?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_assistant_markup_unescaped() {
        let messages = vec![Message::new(Role::Assistant, "<span>Hello!</span>")];
        let page = render_chat_page(&messages, None).unwrap();

        assert!(page.contains("<span>Hello!</span>"));
        assert!(page.contains(r#"class="message assistant""#));
    }

    #[test]
    fn test_escapes_user_content() {
        let messages = vec![Message::new(Role::User, "<script>alert('x')</script>")];
        let page = render_chat_page(&messages, None).unwrap();

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_renders_flash_notice_when_present() {
        let messages = vec![Message::new(Role::Assistant, "<span>Hi</span>")];

        let page = render_chat_page(&messages, Some("Status code: 500")).unwrap();
        assert!(page.contains(r#"class="flash""#));
        assert!(page.contains("Status code: 500"));

        let page = render_chat_page(&messages, None).unwrap();
        assert!(!page.contains(r#"class="flash""#));
    }

    #[test]
    fn test_renders_messages_in_order() {
        let messages = vec![
            Message::new(Role::Assistant, "<span>first</span>"),
            Message::new(Role::User, "second"),
            Message::new(Role::Assistant, "<span>third</span>"),
        ];
        let page = render_chat_page(&messages, None).unwrap();

        let first = page.find("first").unwrap();
        let second = page.find("second").unwrap();
        let third = page.find("third").unwrap();
        assert!(first < second && second < third);
    }
}
