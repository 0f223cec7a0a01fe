// Services module - external integrations

pub mod discord;
pub mod openai;

pub use discord::DiscordService;
pub use openai::OpenAIService;
