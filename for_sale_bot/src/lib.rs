//! Source code for the for-sale notice bot. Whatever anyone sends it,
//! it answers with the same notice saying the bot is up for sale.

/// Sorting incoming messages into the shapes the bot reacts to.
mod types;
pub use types::*;

/// Functions that handle events from Telegram.
mod handlers;
pub use handlers::*;

/// Entry function that starts the bot.
mod entry;
pub use entry::*;

/// The one and only reply this bot ever sends.
pub static SALE_MESSAGE: &str = concat!(
    "🤖 Данный телеграм-бот находится на продаже. 🛒\n\n",
    "Для приобретения обратитесь к @wlzeusgod\n\n\n",
    "Bot is on sale: @wlzeusgod",
);
