use bot_commons::*;

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "WARN,for_sale_bot=info,bot_commons=info");
    }
    if let Err(e) = start_everything(for_sale_bot::entry()) {
        log::error!("Could not start the bot: {e}");
        std::process::exit(1);
    }
}
