pub mod callback_handler;
pub mod command_handler;
pub mod render_sender;

pub use callback_handler::CallbackHandler;
pub use command_handler::CommandHandler;
pub use render_sender::RenderSender;
