use std::sync::Arc;

use bot_commons::{token_from_env, TokenError, TOKEN_ENV_VAR};
use teloxide::{
    prelude::*,
    types::AllowedUpdate,
    update_listeners::{Polling, PollingBuilder},
};

use crate::{handler_tree, ReplyFailureLogger};

/// Kinds of updates the bot asks Telegram for. Nothing else is ever delivered.
pub const ALLOWED_UPDATES: [AllowedUpdate; 2] =
    [AllowedUpdate::Message, AllowedUpdate::EditedMessage];

/// Long polling set up to receive only [`ALLOWED_UPDATES`], skipping
/// whatever piled up while the bot was down.
pub fn polling_builder(bot: Bot) -> PollingBuilder<Bot> {
    Polling::builder(bot)
        .allowed_updates(ALLOWED_UPDATES.to_vec())
        .drop_pending_updates()
}

/// Start the bot with the token from [`TOKEN_ENV_VAR`], and run it until
/// it's interrupted.
///
/// # Errors
///
/// Returns an error without touching the network if there's no token.
pub async fn entry() -> Result<(), TokenError> {
    entry_with_token_from(TOKEN_ENV_VAR).await
}

/// Same as [`entry`], but the token is read from the environment variable `var`.
pub async fn entry_with_token_from(var: &'static str) -> Result<(), TokenError> {
    let token = token_from_env(var)?;
    let bot = Bot::new(token);

    log::info!("Bot is starting...");

    let listener = polling_builder(bot.clone()).build();

    Dispatcher::builder(bot, handler_tree())
        .default_handler(|_| async {})
        .error_handler(Arc::new(ReplyFailureLogger))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("it appears we have been bonked.");

    Ok(())
}
