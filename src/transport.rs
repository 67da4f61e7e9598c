//! Transport and image pager collaborators.
//!
//! Message delivery and image navigation belong to the chat layer. The
//! pipeline only talks to them through these traits.

use std::borrow::Cow;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;
use crate::render::ImagePages;

/// Delivers text to the user.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one message.
    ///
    /// Size rejections must be reported as
    /// [`crate::Error::TransportRejected`] so the caller can escalate to a
    /// paste link.
    async fn send(&self, content: &str) -> Result<()>;
}

/// Presents an ordered image sequence with user-driven navigation.
#[async_trait]
pub trait ImagePager: Send + Sync {
    /// Show the images; cursor state is the pager's business.
    async fn paginate(&self, pages: &ImagePages) -> Result<()>;
}

fn mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"@(everyone|here|[!&]?\d+>)").expect("valid mention regex")
    })
}

/// Neutralize mass mentions and user/role mention markup.
///
/// A zero-width space is inserted after the `@`, so the text still reads the
/// same but no longer pings anyone. The result may be longer than the input.
pub fn clean_content(text: &str) -> Cow<'_, str> {
    mention_regex().replace_all(text, "@\u{200b}$1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_mass_mentions() {
        assert_eq!(clean_content("hi @everyone"), "hi @\u{200b}everyone");
        assert_eq!(clean_content("@here now"), "@\u{200b}here now");
    }

    #[test]
    fn test_clean_user_and_role_mentions() {
        assert_eq!(
            clean_content("<@123456789012345678>"),
            "<@\u{200b}123456789012345678>"
        );
        assert_eq!(
            clean_content("<@!123456789012345678> <@&123456789012345678>"),
            "<@\u{200b}!123456789012345678> <@\u{200b}&123456789012345678>"
        );
    }

    #[test]
    fn test_clean_short_id_mentions() {
        assert_eq!(clean_content("<@123>"), "<@\u{200b}123>");
        assert_eq!(clean_content("<@&7>"), "<@\u{200b}&7>");
    }

    #[test]
    fn test_clean_leaves_plain_text() {
        let text = "user@example.com paid $5";
        assert!(matches!(clean_content(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_clean_grows_text() {
        let cleaned = clean_content("@everyone");
        assert!(cleaned.len() > "@everyone".len());
    }
}
