//! The callable boundary around the news lookup.
//!
//! # Architecture
//!
//! - [`Flow`]: A named async function from a typed input to a typed output
//! - [`TechNewsBot`]: The flow that retrieves and normalizes news
//! - [`SchemaChecked`]: Decorator that decodes raw JSON into any flow's input
//!   type before the inner flow runs and checks the output against its schema
//!   afterwards
//!
//! A caller that holds only JSON goes through [`SchemaChecked::invoke`]; a
//! caller that already has a [`TechNewsBotInput`] may call [`Flow::run`].

use crate::api::{NewsTransport, search_articles};
use crate::config::NewsApiConfig;
use crate::error::{BotError, Result};
use crate::models::{MAX_NEWS_ITEMS, Reply, TechNewsBotInput};
use crate::normalize::{assemble_reply, select_news};
use crate::validator::validate_input;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Name under which the news flow is registered.
pub const FLOW_NAME: &str = "techNewsBotFlow";

/// Name of the prompt definition the flow was derived from.
pub const PROMPT_NAME: &str = "techNewsBotPrompt";

/// Instruction text of the prompt definition. `{{{query}}}` is the user's query.
pub const INSTRUCTION_TEMPLATE: &str = r#"You are "Techie," a friendly and knowledgeable AI chatbot expert on the latest technology news.
Your role is to provide users with concise and accurate updates on what's happening in the tech world.
Based on the user's query, search for articles/news on Google and provide a list of items.
For each news item, include the title, a brief summary, the source name, and the direct URL to the article.
If the direct URL is not available, provide a Google search URL for the article title.
At the bottom of each news item, clearly mention the source where you referred the information from.
Ensure the URLs are real and functional.
Start with a friendly introductory sentence.

User query: {{{query}}}"#;

/// Trait for a named async function with typed input and output.
pub trait Flow {
    type Input;
    type Output;

    fn name(&self) -> &'static str;

    async fn run(&self, input: Self::Input) -> Result<Self::Output>;
}

/// Output types that can be checked against their declared schema.
pub trait OutputSchema {
    fn check(&self) -> std::result::Result<(), String>;
}

impl OutputSchema for Reply {
    fn check(&self) -> std::result::Result<(), String> {
        if self.intro.is_empty() {
            return Err("`intro` must not be empty".to_string());
        }
        if self.news.len() > MAX_NEWS_ITEMS {
            return Err(format!(
                "`news` has {} items, at most {MAX_NEWS_ITEMS} allowed",
                self.news.len()
            ));
        }
        if let Some(i) = self.news.iter().position(|n| n.summary.is_empty()) {
            return Err(format!("`news[{i}].summary` must not be empty"));
        }
        Ok(())
    }
}

/// Retrieves current tech news for a query and shapes it into a [`Reply`].
///
/// Holds no mutable state; one instance can serve concurrent callers.
pub struct TechNewsBot<T> {
    transport: T,
    config: NewsApiConfig,
}

impl<T: NewsTransport> TechNewsBot<T> {
    pub fn new(transport: T, config: NewsApiConfig) -> Self {
        Self { transport, config }
    }
}

impl<T> fmt::Debug for TechNewsBot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TechNewsBot")
            .field("config", &self.config)
            .finish()
    }
}

impl<T: NewsTransport> Flow for TechNewsBot<T> {
    type Input = TechNewsBotInput;
    type Output = Reply;

    fn name(&self) -> &'static str {
        FLOW_NAME
    }

    #[instrument(level = "info", skip_all, fields(flow = FLOW_NAME))]
    async fn run(&self, input: TechNewsBotInput) -> Result<Reply> {
        let articles = search_articles(&self.transport, &self.config, &input.query).await?;
        let reply = assemble_reply(select_news(articles));
        info!(returned = reply.news.len(), "Assembled reply");
        Ok(reply)
    }
}

/// Wrapper that enforces the input and output schemas around any [`Flow`].
pub struct SchemaChecked<F> {
    inner: F,
}

impl<F> SchemaChecked<F>
where
    F: Flow,
    F::Input: DeserializeOwned,
    F::Output: OutputSchema,
{
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    /// Validate `raw`, run the inner flow, and check its output.
    ///
    /// # Arguments
    ///
    /// * `raw` - The caller's JSON payload, decoded into `F::Input`
    ///
    /// # Returns
    ///
    /// The inner flow's output once it passes [`OutputSchema::check`].
    ///
    /// # Errors
    ///
    /// [`BotError::Validation`] if `raw` does not decode (the inner flow is
    /// not run), any error from the inner flow, or [`BotError::OutputSchema`]
    /// if the output fails its check.
    #[instrument(level = "info", skip_all, fields(flow = self.inner.name()))]
    pub async fn invoke(&self, raw: &Value) -> Result<F::Output> {
        let t0 = Instant::now();
        let res = self.call(raw).await;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        match &res {
            Ok(_) => info!(elapsed_ms, "Flow succeeded"),
            Err(e) => error!(elapsed_ms, kind = e.kind(), error = %e, "Flow failed"),
        }
        res
    }

    async fn call(&self, raw: &Value) -> Result<F::Output> {
        let input: F::Input = validate_input(raw)?;
        let output = self.inner.run(input).await?;
        output.check().map_err(BotError::OutputSchema)?;
        Ok(output)
    }
}

impl<F> fmt::Debug for SchemaChecked<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaChecked").finish_non_exhaustive()
    }
}

/// Render the instruction text for `input`.
pub fn render_instruction(input: &TechNewsBotInput) -> String {
    INSTRUCTION_TEMPLATE.replace("{{{query}}}", &input.query)
}

/// Describe the flow: its names, input/output schemas, and instruction template.
pub fn describe() -> Value {
    json!({
        "name": FLOW_NAME,
        "prompt": PROMPT_NAME,
        "inputSchema": {
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "The user's question about tech news."}
            },
            "required": ["query"]
        },
        "outputSchema": {
            "type": "object",
            "properties": {
                "intro": {
                    "type": "string",
                    "description": "A friendly introductory sentence before listing the news items."
                },
                "news": {
                    "type": "array",
                    "maxItems": MAX_NEWS_ITEMS,
                    "description": "A list of the latest tech news articles related to the user's query.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string", "description": "The headline of the news article."},
                            "summary": {"type": "string", "description": "A brief summary of the news article."},
                            "source": {"type": "string", "description": "The source of the news (e.g., The Verge, TechCrunch)."},
                            "url": {"type": "string", "description": "The direct URL to the full news article."}
                        },
                        "required": ["title", "summary"]
                    }
                }
            },
            "required": ["intro", "news"]
        },
        "instruction": INSTRUCTION_TEMPLATE,
    })
}
