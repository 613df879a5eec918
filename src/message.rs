use crate::epic::FreeGameOffer;

/// Zero-width space used as the link text of the cover image, so Telegram
/// builds a preview card without printing the URL.
const ZERO_WIDTH_SPACE: char = '\u{200b}';

const UNKNOWN_TITLE: &str = "Unknown";

/// Renders the Markdown notification for a single free game.
pub fn render(game: &FreeGameOffer) -> String {
    let title = if game.title.is_empty() {
        UNKNOWN_TITLE
    } else {
        &game.title
    };

    format!(
        "[{ZERO_WIDTH_SPACE}]({image})\n\
         🔥 *Epic Free Game Alert* 🔥\n\n\
         🎮 *{title}*\n\
         ⏰ Ends: {end_date}\n\n\
         📝 {description}\n\n\
         🔗 [Claim the game]({link})",
        image = game.image,
        end_date = game.end_date,
        description = game.description,
        link = game.link,
    )
}
