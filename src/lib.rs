//! # Tech News Bot
//!
//! Answers a free-text question about technology news with a structured
//! reply: a friendly intro plus up to five current articles from NewsAPI,
//! each with a title, summary, source, and link.
//!
//! ## Flow
//!
//! 1. **Validation**: the raw `{ "query": ... }` payload is checked
//! 2. **Retrieval**: one GET to the NewsAPI `everything` endpoint
//! 3. **Normalization**: the top five articles are mapped to [`NewsItem`]s
//! 4. **Output check**: the [`Reply`] is checked against its schema
//!
//! ```ignore
//! let bot = SchemaChecked::new(TechNewsBot::new(HttpTransport::new(), config));
//! let reply = bot.invoke(&json!({"query": "AI chips"})).await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod models;
pub mod normalize;
pub mod utils;
pub mod validator;

pub use api::{HttpReply, HttpTransport, NewsTransport};
pub use config::NewsApiConfig;
pub use error::{BotError, Result, UpstreamError};
pub use flow::{Flow, SchemaChecked, TechNewsBot};
pub use models::{NewsItem, Reply, TechNewsBotInput};
